//! Mailbox-related types.

use std::borrow::Cow;

use crate::types::core::{AString, IString};

/// A mailbox name.
///
/// "INBOX is case-insensitive. All case variants of INBOX (e.g., "iNbOx") MUST be
/// interpreted as INBOX not as an astring." ([RFC 3501](https://www.rfc-editor.org/rfc/rfc3501.html))
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mailbox<'a> {
    Inbox,
    Other(MailboxOther<'a>),
}

/// A mailbox that is not INBOX.
///
/// It's guaranteed that this type can't represent INBOX.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MailboxOther<'a>(pub(crate) AString<'a>);

impl<'a> MailboxOther<'a> {
    pub fn inner(&self) -> &AString<'a> {
        &self.0
    }
}

impl<'a> From<AString<'a>> for Mailbox<'a> {
    fn from(value: AString<'a>) -> Self {
        let is_inbox = match &value {
            AString::Atom(atom) => atom.as_ref().eq_ignore_ascii_case("inbox"),
            AString::String(IString::Quoted(quoted)) => {
                quoted.as_ref().eq_ignore_ascii_case("inbox")
            }
            AString::String(IString::Literal(literal)) => {
                literal.as_ref().eq_ignore_ascii_case(b"inbox")
            }
        };

        if is_inbox {
            Self::Inbox
        } else {
            Self::Other(MailboxOther(value))
        }
    }
}

impl<'a> TryFrom<&'a str> for Mailbox<'a> {
    type Error = <AString<'a> as TryFrom<&'a str>>::Error;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Ok(Mailbox::from(AString::try_from(value)?))
    }
}

impl<'a> Mailbox<'a> {
    /// The raw name as sent by the server; `b"INBOX"` for the INBOX variant.
    pub fn as_bytes(&self) -> Cow<[u8]> {
        match self {
            Self::Inbox => Cow::Borrowed(b"INBOX".as_ref()),
            Self::Other(other) => Cow::Borrowed(other.0.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbox_case_folding() {
        for raw in ["inbox", "INBOX", "iNbOx"] {
            assert_eq!(Mailbox::try_from(raw).unwrap(), Mailbox::Inbox);
        }

        assert!(matches!(
            Mailbox::try_from("inbox.sent").unwrap(),
            Mailbox::Other(_)
        ));
    }
}
