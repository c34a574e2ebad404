//! Body(structure)-related types.

use crate::types::{
    core::{IString, NString, Vec1},
    envelope::Envelope,
};

/// The `BODY` / `BODYSTRUCTURE` of a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BodyStructure<'a> {
    /// A non-multipart body part.
    Single {
        body: Body<'a>,
        /// Extension data, only present in `BODYSTRUCTURE` fetches.
        extension_data: Option<SinglePartExtensionData<'a>>,
    },

    /// A multipart body part.
    ///
    /// `bodies` is empty only for the malformed `("MIXED")` form some servers produce
    /// (see the `quirk_multipart_no_parts` feature).
    Multi {
        bodies: Vec<BodyStructure<'a>>,
        subtype: IString<'a>,
        extension_data: Option<MultiPartExtensionData<'a>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Body<'a> {
    /// Basic fields
    pub basic: BasicFields<'a>,
    /// Type-specific fields
    pub specific: SpecificFields<'a>,
}

/// The basic fields of a non-multipart body part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasicFields<'a> {
    /// List of attribute/value pairs (`body-fld-param`).
    pub parameter_list: Vec<(IString<'a>, IString<'a>)>,

    /// Content id (`body-fld-id`).
    pub id: NString<'a>,

    /// Content description (`body-fld-desc`).
    pub description: NString<'a>,

    /// Content transfer encoding (`body-fld-enc`).
    pub content_transfer_encoding: IString<'a>,

    /// Size of the body in octets (`body-fld-octets`).
    ///
    /// Note that this size is the size in its transfer encoding
    /// and not the resulting size after any decoding.
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpecificFields<'a> {
    /// # Example (not in IMAP format)
    ///
    /// ```text
    /// Content-Type: application/voodoo
    /// ```
    Basic {
        /// Media type (`"application"` in the example above).
        r#type: IString<'a>,

        /// Media subtype (`"voodoo"` in the example above).
        subtype: IString<'a>,
    },

    /// A body of type `message/rfc822` contains, immediately after the basic fields, the
    /// envelope structure, body structure, and size in text lines of the encapsulated
    /// message.
    Message {
        envelope: Box<Envelope<'a>>,
        body_structure: Box<BodyStructure<'a>>,

        /// Number of lines (`body-fld-lines`).
        number_of_lines: u32,
    },

    /// A body of type `text` contains, immediately after the basic fields, the size of
    /// the body in text lines.
    Text {
        subtype: IString<'a>,

        /// Number of lines (`body-fld-lines`).
        number_of_lines: u32,
    },
}

/// The extension data of a non-multipart body part.
///
/// These fields are defined as a tail sequence: a field is only present when all fields
/// before it are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SinglePartExtensionData<'a> {
    /// Content MD5 (`body-fld-md5`).
    pub md5: NString<'a>,

    /// (Optional) disposition and everything that can follow it.
    pub tail: Option<Disposition<'a>>,
}

/// The extension data of a multipart body part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiPartExtensionData<'a> {
    /// List of attribute/value pairs (`body-fld-param`).
    pub parameter_list: Vec<(IString<'a>, IString<'a>)>,

    /// (Optional) disposition and everything that can follow it.
    pub tail: Option<Disposition<'a>>,
}

/// Content disposition (`body-fld-dsp`) plus any following extension fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Disposition<'a> {
    pub disposition: Option<(IString<'a>, Vec<(IString<'a>, IString<'a>)>)>,
    pub tail: Option<Language<'a>>,
}

/// Content language (`body-fld-lang`) plus any following extension fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language<'a> {
    pub language: Vec<IString<'a>>,
    pub tail: Option<Location<'a>>,
}

/// Content location (`body-fld-loc`) plus any trailing extensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location<'a> {
    pub location: NString<'a>,

    /// Extension data. Clients MUST accept it, servers MUST NOT generate it (except as
    /// defined by future revisions).
    pub extensions: Vec<BodyExtension<'a>>,
}

/// Future expansion of the body-structure grammar.
///
/// ```abnf
/// body-extension = nstring /
///                  number /
///                  "(" body-extension *(SP body-extension) ")"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BodyExtension<'a> {
    NString(NString<'a>),
    Number(u32),
    List(Vec1<BodyExtension<'a>>),
}
