//! Fetch-related types.

use std::num::NonZeroU32;

use crate::types::{
    body::BodyStructure,
    core::{AString, NString, Quoted, Vec1},
    envelope::Envelope,
    flag::FlagFetch,
};

/// A part section within a `BODY[...]` item.
///
/// A part number is a dot-separated list of non-zero integers, e.g. `4.1.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Part(pub Vec1<NonZeroU32>);

/// A message section within a `BODY[...]` item.
///
/// The section wire syntax is preserved structurally: `HEADER.FIELDS` keeps the
/// server-supplied header-field names with their original case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Section<'a> {
    Part(Part),

    Header(Option<Part>),

    /// The subset of the header that only includes the listed fields.
    HeaderFields(Option<Part>, Vec1<AString<'a>>),

    /// The subset of the header that excludes the listed fields.
    HeaderFieldsNot(Option<Part>, Vec1<AString<'a>>),

    /// The text body of the message, omitting the header.
    Text(Option<Part>),

    /// The MIME-IMB header for this part.
    Mime(Part),
}

/// Specifier inside a section, before it is assembled into [`Section`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartSpecifier<'a> {
    PartNumber(u32),
    Header,
    HeaderFields(Vec1<AString<'a>>),
    HeaderFieldsNot(Vec1<AString<'a>>),
    Mime,
    Text,
}

/// A single `key value` item inside the parenthesized `msg-att` list of a FETCH response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageDataItem<'a> {
    /// `BODY` -- a form of `BODYSTRUCTURE` without extension data.
    Body(BodyStructure<'a>),

    /// `BODY[<section>]<<origin octet>>` -- the body contents of the specified section.
    BodyExt {
        /// The specified section.
        section: Option<Section<'a>>,
        /// The origin octet, if a partial fetch was requested.
        ///
        /// A substring fetch of a HEADER.FIELDS or HEADER.FIELDS.NOT part attribute
        /// returns the headers with the requested offset applied.
        origin: Option<u32>,
        /// The 8-bit text of the section, or NIL.
        data: NString<'a>,
    },

    /// `BODYSTRUCTURE` -- the MIME-IMB body structure of the message.
    BodyStructure(BodyStructure<'a>),

    /// `ENVELOPE` -- the envelope structure of the message.
    Envelope(Envelope<'a>),

    /// `FLAGS` -- a parenthesized list of flags that are set for this message.
    Flags(Vec<FlagFetch<'a>>),

    /// `INTERNALDATE` -- the internal date of the message.
    ///
    /// Kept as the server-supplied quoted date-time string.
    InternalDate(Quoted<'a>),

    /// `RFC822` -- equivalent to `BODY[]`.
    Rfc822(NString<'a>),

    /// `RFC822.HEADER` -- equivalent to `BODY[HEADER]`.
    Rfc822Header(NString<'a>),

    /// `RFC822.SIZE` -- a number expressing the RFC 2822 size of the message.
    Rfc822Size(u64),

    /// `RFC822.TEXT` -- equivalent to `BODY[TEXT]`.
    Rfc822Text(NString<'a>),

    /// `UID` -- the unique identifier of the message.
    Uid(NonZeroU32),

    /// `MODSEQ (n)` -- the per-message modification sequence (RFC 7162).
    ModSeq(u64),
}
