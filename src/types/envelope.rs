//! Envelope-related types.

use crate::types::core::NString;

/// The envelope structure of a message.
///
/// Computed by the server from the RFC 2822 header. Note that addresses are *not*
/// re-parsed here: each slot carries exactly what the server sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Envelope<'a> {
    pub date: NString<'a>,
    pub subject: NString<'a>,
    pub from: Vec<Address<'a>>,
    pub sender: Vec<Address<'a>>,
    pub reply_to: Vec<Address<'a>>,
    pub to: Vec<Address<'a>>,
    pub cc: Vec<Address<'a>>,
    pub bcc: Vec<Address<'a>>,
    pub in_reply_to: NString<'a>,
    pub message_id: NString<'a>,
}

/// An address structure describes an electronic mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address<'a> {
    /// Personal name
    pub name: NString<'a>,
    /// At-domain-list (source route)
    pub adl: NString<'a>,
    /// Mailbox name or, if `host` is NIL, an RFC 2822 group name
    pub mailbox: NString<'a>,
    /// Host name; NIL indicates RFC 2822 group syntax
    pub host: NString<'a>,
}
