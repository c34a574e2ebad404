//! Response-related types.

use std::{
    borrow::Cow,
    fmt::{Debug, Display, Formatter},
    num::{NonZeroU32, NonZeroU64},
};

use crate::types::{
    core::{impl_try_from, AString, Atom, Charset, IString, NString, QuotedChar, Tag, Text, Vec1},
    fetch::MessageDataItem,
    flag::{Flag, FlagNameAttribute, FlagPerm},
    mailbox::Mailbox,
    sequence::{SequenceSet, UidSet},
    status::StatusDataItem,
};

/// A server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response<'a> {
    /// Status responses can be tagged or untagged. Tagged status responses indicate the
    /// completion result (OK, NO, or BAD status) of a client command, and have a tag
    /// matching the command.
    Status(Status<'a>),
    /// All server data is untagged. An untagged response is indicated by the token "*"
    /// instead of a tag.
    Data(Data<'a>),
    /// Command continuation request responses use the token "+" instead of a tag. These
    /// responses are sent by the server to indicate acceptance of an incomplete client
    /// command and readiness for the remainder of the command.
    Continue(Continue<'a>),
    /// An untagged response whose label has no structural parser in this crate, e.g.
    /// `* 99 NOOP`.
    ///
    /// The response is kept rather than rejected; its payload stays undecoded. Labels
    /// from the known set never end up here: their payload has to parse.
    Ignored {
        /// The dispatch label.
        name: Atom<'a>,
        data: UnparsedData<'a>,
    },
}

/// The undecoded payload of a [`Response::Ignored`] response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparsedData<'a> {
    /// A leading number, as in `* 99 NOOP`.
    pub number: Option<u32>,
    /// Everything after the label up to (but not including) the final CRLF.
    pub text: Cow<'a, [u8]>,
}

/// ## 7.1. Server Responses - Status Responses
///
/// Status responses are OK, NO, BAD, PREAUTH and BYE.
/// OK, NO, and BAD can be tagged or untagged.
/// PREAUTH and BYE are always untagged.
/// Status responses MAY include an OPTIONAL "response code" (see [`Code`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status<'a> {
    /// ### 7.1.1. OK Response
    ///
    /// The OK response indicates an information message from the server. When tagged, it
    /// indicates successful completion of the associated command.
    Ok {
        tag: Option<Tag<'a>>,
        /// Response code (optional)
        code: Option<Code<'a>>,
        /// Human-readable text
        text: Text<'a>,
    },

    /// ### 7.1.2. NO Response
    ///
    /// The NO response indicates an operational error message from the server. When
    /// tagged, it indicates unsuccessful completion of the associated command. The
    /// untagged form indicates a warning; the command can still complete successfully.
    No {
        tag: Option<Tag<'a>>,
        code: Option<Code<'a>>,
        text: Text<'a>,
    },

    /// ### 7.1.3. BAD Response
    ///
    /// The BAD response indicates an error message from the server. When tagged, it
    /// reports a protocol-level error in the client's command.
    Bad {
        tag: Option<Tag<'a>>,
        code: Option<Code<'a>>,
        text: Text<'a>,
    },

    /// ### 7.1.4. PREAUTH Response
    ///
    /// The PREAUTH response is always untagged, and is one of three possible greetings at
    /// connection startup. It indicates that the connection has already been
    /// authenticated by external means.
    PreAuth {
        code: Option<Code<'a>>,
        text: Text<'a>,
    },

    /// ### 7.1.5. BYE Response
    ///
    /// The BYE response is always untagged, and indicates that the server is about to
    /// close the connection. The client SHOULD continue to read response data from the
    /// server until the connection is closed.
    Bye {
        code: Option<Code<'a>>,
        text: Text<'a>,
    },
}

impl<'a> Status<'a> {
    pub fn ok<T>(tag: Option<Tag<'a>>, code: Option<Code<'a>>, text: T) -> Result<Self, T::Error>
    where
        T: TryInto<Text<'a>>,
    {
        Ok(Status::Ok {
            tag,
            code,
            text: text.try_into()?,
        })
    }

    pub fn no<T>(tag: Option<Tag<'a>>, code: Option<Code<'a>>, text: T) -> Result<Self, T::Error>
    where
        T: TryInto<Text<'a>>,
    {
        Ok(Status::No {
            tag,
            code,
            text: text.try_into()?,
        })
    }

    pub fn bad<T>(tag: Option<Tag<'a>>, code: Option<Code<'a>>, text: T) -> Result<Self, T::Error>
    where
        T: TryInto<Text<'a>>,
    {
        Ok(Status::Bad {
            tag,
            code,
            text: text.try_into()?,
        })
    }

    pub fn preauth<T>(code: Option<Code<'a>>, text: T) -> Result<Self, T::Error>
    where
        T: TryInto<Text<'a>>,
    {
        Ok(Status::PreAuth {
            code,
            text: text.try_into()?,
        })
    }

    pub fn bye<T>(code: Option<Code<'a>>, text: T) -> Result<Self, T::Error>
    where
        T: TryInto<Text<'a>>,
    {
        Ok(Status::Bye {
            code,
            text: text.try_into()?,
        })
    }

    // ---------------------------------------------------------------------------------------------

    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Status::Ok { tag, .. } | Status::No { tag, .. } | Status::Bad { tag, .. } => {
                tag.as_ref()
            }
            Status::PreAuth { .. } | Status::Bye { .. } => None,
        }
    }

    pub fn code(&self) -> Option<&Code> {
        match self {
            Status::Ok { code, .. }
            | Status::No { code, .. }
            | Status::Bad { code, .. }
            | Status::PreAuth { code, .. }
            | Status::Bye { code, .. } => code.as_ref(),
        }
    }

    pub fn text(&self) -> &Text {
        match self {
            Status::Ok { text, .. }
            | Status::No { text, .. }
            | Status::Bad { text, .. }
            | Status::PreAuth { text, .. }
            | Status::Bye { text, .. } => text,
        }
    }
}

/// ## 7.2 - 7.4 Server and Mailbox Status; Mailbox Size; Message Status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Data<'a> {
    /// ### 7.2.1. CAPABILITY Response
    ///
    /// A space-separated listing of capability names that the server supports.
    Capability(Vec1<Capability<'a>>),

    /// ### 7.2.2. LIST Response
    ///
    /// Returns a single name that matches the LIST specification. There can be multiple
    /// LIST responses for a single LIST command.
    List {
        /// Name attributes
        items: Vec<FlagNameAttribute<'a>>,
        /// Hierarchy delimiter
        delimiter: Option<QuotedChar>,
        /// Name
        mailbox: Mailbox<'a>,
    },

    /// ### 7.2.3. LSUB Response
    ///
    /// The data is identical in format to the LIST response.
    Lsub {
        items: Vec<FlagNameAttribute<'a>>,
        delimiter: Option<QuotedChar>,
        mailbox: Mailbox<'a>,
    },

    /// XLIST Response (pre-RFC 6154 special-use mailboxes)
    ///
    /// The data is identical in format to the LIST response.
    XList {
        items: Vec<FlagNameAttribute<'a>>,
        delimiter: Option<QuotedChar>,
        mailbox: Mailbox<'a>,
    },

    /// ### 7.2.4 STATUS Response
    ///
    /// Returns the mailbox name and the requested mailbox status information.
    Status {
        /// Name
        mailbox: Mailbox<'a>,
        /// Status parenthesized list
        items: Vec<StatusDataItem>,
    },

    /// ### 7.2.5. SEARCH Response
    ///
    /// The number(s) refer to those messages that match the search criteria. The optional
    /// second element is the highest mod-sequence of the matched messages (RFC 7162).
    Search(Vec<NonZeroU32>, Option<NonZeroU64>),

    /// SORT Response (RFC 5256)
    ///
    /// Like SEARCH, but the numbers are in sorted order.
    Sort(Vec<NonZeroU32>, Option<NonZeroU64>),

    /// ESEARCH Response (RFC 4731)
    Extended(Esearch<'a>),

    /// ### 7.2.6. FLAGS Response
    ///
    /// The flag parenthesized list identifies the flags that are applicable for this
    /// mailbox.
    Flags(Vec<Flag<'a>>),

    /// ### 7.3.1. EXISTS Response
    ///
    /// Reports the number of messages in the mailbox.
    Exists(u32),

    /// ### 7.3.2. RECENT Response
    ///
    /// Reports the number of messages with the \Recent flag set.
    Recent(u32),

    /// ### 7.4.1. EXPUNGE Response
    ///
    /// Reports that the specified message sequence number has been permanently removed
    /// from the mailbox.
    Expunge(NonZeroU32),

    /// ### 7.4.2. FETCH Response
    ///
    /// Returns data about a message to the client.
    Fetch {
        /// Sequence number.
        seq: NonZeroU32,
        /// Message data items.
        items: Vec1<MessageDataItem<'a>>,
    },

    /// ENABLED Response (RFC 5161)
    Enabled {
        capabilities: Vec<Capability<'a>>,
    },

    /// NAMESPACE Response (RFC 2342)
    Namespace {
        personal: Namespaces<'a>,
        other: Namespaces<'a>,
        shared: Namespaces<'a>,
    },

    /// QUOTA Response (RFC 2087/9208)
    Quota {
        /// Quota root.
        root: AString<'a>,
        /// List of quotas.
        quotas: Vec1<QuotaGet<'a>>,
    },

    /// QUOTAROOT Response (RFC 2087/9208)
    QuotaRoot {
        /// Mailbox name.
        mailbox: Mailbox<'a>,
        /// List of quota roots.
        roots: Vec<AString<'a>>,
    },

    /// ACL Response (RFC 4314)
    Acl {
        mailbox: Mailbox<'a>,
        entries: Vec<AclEntry<'a>>,
    },

    /// ID Response (RFC 2971)
    Id {
        parameters: Option<Vec<(IString<'a>, NString<'a>)>>,
    },
}

/// ESEARCH data (RFC 4731).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Esearch<'a> {
    /// The tag of the command that caused this response, when the server echoes one.
    pub correlator: Option<Tag<'a>>,
    /// Whether the returned numbers are UIDs.
    pub uid: bool,
    /// The requested return data items.
    pub returns: Vec<SearchReturnData>,
}

/// A single `search-return-data` item of an ESEARCH response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchReturnData {
    /// `MIN` -- lowest matching number.
    Min(NonZeroU32),
    /// `MAX` -- highest matching number.
    Max(NonZeroU32),
    /// `ALL` -- all matching numbers as a sequence set.
    All(SequenceSet),
    /// `COUNT` -- number of matches.
    Count(u32),
    /// `MODSEQ` -- highest mod-sequence of the matches (RFC 7162).
    ModSeq(NonZeroU64),
}

/// A single `identifier rights` pair of an ACL response (RFC 4314).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclEntry<'a> {
    pub identifier: AString<'a>,
    pub rights: AString<'a>,
}

/// A list of namespace definitions; empty means `NIL` on the wire.
pub type Namespaces<'a> = Vec<Namespace<'a>>;

/// A single namespace description (RFC 2342).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace<'a> {
    pub prefix: IString<'a>,
    pub delimiter: Option<QuotedChar>,
    /// Optional extension data for this namespace.
    pub extensions: Vec<NamespaceResponseExtension<'a>>,
}

/// Extension data for a namespace response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceResponseExtension<'a> {
    pub key: IString<'a>,
    pub values: Vec1<IString<'a>>,
}

/// A `resource usage limit` triple of a QUOTA response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaGet<'a> {
    pub resource: Resource<'a>,
    /// The current usage of the resource.
    pub usage: u64,
    /// The resource limit.
    pub limit: u64,
}

/// A resource type for use in IMAP's QUOTA extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource<'a> {
    /// The physical space estimate, in units of 1024 octets, of the mailboxes governed by
    /// the quota root.
    Storage,
    /// The number of messages stored within the mailboxes governed by the quota root.
    Message,
    /// The number of mailboxes governed by the quota root.
    Mailbox,
    /// The maximum size of all annotations, in units of 1024 octets.
    AnnotationStorage,
    /// Other.
    Other(ResourceOther<'a>),
}

impl<'a> From<Atom<'a>> for Resource<'a> {
    fn from(value: Atom<'a>) -> Self {
        match value.inner().to_ascii_lowercase().as_ref() {
            "storage" => Resource::Storage,
            "message" => Resource::Message,
            "mailbox" => Resource::Mailbox,
            "annotation-storage" => Resource::AnnotationStorage,
            _ => Resource::Other(ResourceOther(value)),
        }
    }
}

impl_try_from!(Atom<'a>, 'a, &'a str, Resource<'a>);

/// A resource type (name) not known to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceOther<'a>(pub(crate) Atom<'a>);

/// ## 7.5. Server Responses - Command Continuation Request
///
/// Indicated by a "+" token instead of a tag. This form of response indicates that the
/// server is ready to accept the continuation of a command from the client, e.g., the
/// octets of a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continue<'a> {
    pub code: Option<Code<'a>>,
    /// The remainder of the line; may be empty.
    pub text: Text<'a>,
}

impl<'a> Continue<'a> {
    pub fn new<T>(code: Option<Code<'a>>, text: T) -> Result<Self, T::Error>
    where
        T: TryInto<Text<'a>>,
    {
        Ok(Continue {
            code,
            text: text.try_into()?,
        })
    }
}

/// A response code: data inside square brackets in the form of an atom, possibly followed
/// by a space and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code<'a> {
    /// `ALERT`
    ///
    /// The human-readable text contains a special alert that MUST be presented to the
    /// user.
    Alert,

    /// `BADCHARSET`
    ///
    /// Optionally followed by a parenthesized list of charsets. A SEARCH failed because
    /// the given charset is not supported by this implementation.
    BadCharset { allowed: Vec<Charset<'a>> },

    /// `CAPABILITY`
    ///
    /// Followed by a list of capabilities. This can appear in the initial OK or PREAUTH
    /// response to transmit an initial capabilities list.
    Capability(Vec1<Capability<'a>>),

    /// `PARSE`
    ///
    /// The human-readable text represents an error in parsing the RFC 2822 header or
    /// MIME-IMB headers of a message in the mailbox.
    Parse,

    /// `PERMANENTFLAGS`
    ///
    /// Followed by a parenthesized list of flags, indicates which of the known flags the
    /// client can change permanently. The list can also include the special flag `\*`,
    /// which indicates that it is possible to create new keywords.
    PermanentFlags(Vec<FlagPerm<'a>>),

    /// `READ-ONLY`
    ///
    /// The mailbox is selected read-only.
    ReadOnly,

    /// `READ-WRITE`
    ///
    /// The mailbox is selected read-write.
    ReadWrite,

    /// `TRYCREATE`
    ///
    /// An APPEND or COPY attempt is failing because the target mailbox does not exist.
    TryCreate,

    /// `UIDNEXT`
    ///
    /// Followed by a decimal number, indicates the next unique identifier value.
    UidNext(NonZeroU32),

    /// `UIDVALIDITY`
    ///
    /// Followed by a decimal number, indicates the unique identifier validity value.
    UidValidity(NonZeroU32),

    /// `UNSEEN`
    ///
    /// Followed by a decimal number, indicates the number of the first message without
    /// the \Seen flag set.
    Unseen(NonZeroU32),

    /// `APPENDUID` (RFC 4315)
    ///
    /// In the tagged OK of an APPEND: the UIDVALIDITY of the destination mailbox and the
    /// UID(s) assigned to the appended message(s).
    AppendUid {
        uid_validity: NonZeroU32,
        uids: UidSet,
    },

    /// `COPYUID` (RFC 4315)
    ///
    /// In the tagged OK of a COPY: the UIDVALIDITY of the destination mailbox, the UIDs
    /// of the copied messages, and the UIDs assigned to them in the destination, in the
    /// same order.
    CopyUid {
        uid_validity: NonZeroU32,
        source: UidSet,
        destination: UidSet,
    },

    /// `UIDNOTSTICKY` (RFC 4315)
    ///
    /// The selected mailbox does not support persistent UIDs.
    UidNotSticky,

    /// `NOMODSEQ` (RFC 7162)
    ///
    /// The selected mailbox does not support the persistent storage of mod-sequences.
    NoModSeq,

    /// `HIGHESTMODSEQ` (RFC 7162)
    ///
    /// Followed by the highest mod-sequence value of all messages in the mailbox.
    HighestModSeq(NonZeroU64),

    /// Additional response codes defined by particular client or server implementations
    /// SHOULD be prefixed with an "X" until they are added to a revision of this
    /// protocol. Client implementations SHOULD ignore response codes that they do not
    /// recognize.
    ///
    /// Note: We use this as a fallback for everything that was not recognized as
    /// [`Code`]. This includes, e.g., variants with missing parameters.
    Other(CodeOther<'a>),
}

/// An (unknown) code.
///
/// It's guaranteed that this type can't represent any code from [`Code`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CodeOther<'a>(Cow<'a, [u8]>);

// We want a more readable `Debug` implementation.
impl<'a> Debug for CodeOther<'a> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        struct BStr<'a>(&'a Cow<'a, [u8]>);

        impl<'a> Debug for BStr<'a> {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(
                    f,
                    "b\"{}\"",
                    crate::utils::escape_byte_string(self.0.as_ref())
                )
            }
        }

        f.debug_tuple("CodeOther").field(&BStr(&self.0)).finish()
    }
}

impl<'a> CodeOther<'a> {
    pub(crate) fn unvalidated<D: 'a>(data: D) -> Self
    where
        D: Into<Cow<'a, [u8]>>,
    {
        Self(data.into())
    }

    pub fn inner(&self) -> &[u8] {
        self.0.as_ref()
    }
}

/// A server capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Capability<'a> {
    Imap4Rev1,
    /// An `AUTH=` mechanism.
    Auth(Atom<'a>),
    /// See RFC 2177.
    Idle,
    /// See RFC 5161.
    Enable,
    /// See RFC 7162.
    CondStore,
    /// See RFC 7162.
    QResync,
    /// See RFC 2342.
    Namespace,
    /// See RFC 2087 and RFC 9208.
    Quota,
    /// See RFC 9208.
    QuotaRes(Resource<'a>),
    /// See RFC 9208.
    QuotaSet,
    /// See RFC 4315.
    UidPlus,
    /// See RFC 6851.
    Move,
    /// See RFC 7888.
    LiteralPlus,
    /// See RFC 7888.
    LiteralMinus,
    /// See RFC 4731.
    ESearch,
    /// See RFC 5256.
    Sort,
    /// See RFC 2971.
    Id,
    /// See RFC 4314.
    Acl,
    /// Other/Unknown.
    Other(CapabilityOther<'a>),
}

impl<'a> Display for Capability<'a> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Imap4Rev1 => write!(f, "IMAP4REV1"),
            Self::Auth(mechanism) => write!(f, "AUTH={}", mechanism),
            Self::Idle => write!(f, "IDLE"),
            Self::Enable => write!(f, "ENABLE"),
            Self::CondStore => write!(f, "CONDSTORE"),
            Self::QResync => write!(f, "QRESYNC"),
            Self::Namespace => write!(f, "NAMESPACE"),
            Self::Quota => write!(f, "QUOTA"),
            Self::QuotaRes(resource) => {
                let name = match resource {
                    Resource::Storage => "STORAGE",
                    Resource::Message => "MESSAGE",
                    Resource::Mailbox => "MAILBOX",
                    Resource::AnnotationStorage => "ANNOTATION-STORAGE",
                    Resource::Other(other) => other.0.inner(),
                };

                write!(f, "QUOTA=RES-{}", name)
            }
            Self::QuotaSet => write!(f, "QUOTASET"),
            Self::UidPlus => write!(f, "UIDPLUS"),
            Self::Move => write!(f, "MOVE"),
            Self::LiteralPlus => write!(f, "LITERAL+"),
            Self::LiteralMinus => write!(f, "LITERAL-"),
            Self::ESearch => write!(f, "ESEARCH"),
            Self::Sort => write!(f, "SORT"),
            Self::Id => write!(f, "ID"),
            Self::Acl => write!(f, "ACL"),
            Self::Other(other) => write!(f, "{}", other.0),
        }
    }
}

impl_try_from!(Atom<'a>, 'a, &'a str, Capability<'a>);

impl<'a> From<Atom<'a>> for Capability<'a> {
    fn from(atom: Atom<'a>) -> Self {
        match atom.as_ref().to_ascii_lowercase().as_ref() {
            "imap4rev1" => Self::Imap4Rev1,
            "idle" => Self::Idle,
            "enable" => Self::Enable,
            "condstore" => Self::CondStore,
            "qresync" => Self::QResync,
            "namespace" => Self::Namespace,
            "quota" => Self::Quota,
            "quotaset" => Self::QuotaSet,
            "uidplus" => Self::UidPlus,
            "move" => Self::Move,
            "literal+" => Self::LiteralPlus,
            "literal-" => Self::LiteralMinus,
            "esearch" => Self::ESearch,
            "sort" => Self::Sort,
            "id" => Self::Id,
            "acl" => Self::Acl,
            lowercase => {
                if let Some(mechanism) = lowercase.strip_prefix("auth=") {
                    // Safety: `unvalidated` is safe: a non-empty suffix of an atom is an atom.
                    if !mechanism.is_empty() {
                        return Self::Auth(Atom::unvalidated(mechanism.to_owned()));
                    }
                }

                if let Some(resource) = lowercase.strip_prefix("quota=res-") {
                    // Safety: `unvalidated` is safe: a non-empty suffix of an atom is an atom.
                    if !resource.is_empty() {
                        return Self::QuotaRes(Resource::from(Atom::unvalidated(resource.to_owned())));
                    }
                }

                Self::Other(CapabilityOther(atom))
            }
        }
    }
}

/// An (unknown) capability.
///
/// It's guaranteed that this type can't represent any capability from [`Capability`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapabilityOther<'a>(pub(crate) Atom<'a>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_from_atom() {
        let tests = [
            ("IMAP4rev1", Capability::Imap4Rev1),
            ("IDLE", Capability::Idle),
            ("condstore", Capability::CondStore),
            ("LITERAL+", Capability::LiteralPlus),
            (
                "AUTH=PLAIN",
                Capability::Auth(Atom::try_from("plain").unwrap()),
            ),
            (
                "QUOTA=RES-STORAGE",
                Capability::QuotaRes(Resource::Storage),
            ),
            (
                "XYZZY",
                Capability::Other(CapabilityOther(Atom::try_from("XYZZY").unwrap())),
            ),
        ];

        for (test, expected) in tests {
            let got = Capability::from(Atom::try_from(test).unwrap());
            assert_eq!(expected, got);
        }
    }

    #[test]
    fn test_status_accessors() {
        let status = Status::ok(
            Some(Tag::try_from("A1").unwrap()),
            Some(Code::Alert),
            "hello",
        )
        .unwrap();

        assert_eq!(status.tag().unwrap().inner(), "A1");
        assert_eq!(status.code(), Some(&Code::Alert));
        assert_eq!(status.text().inner(), "hello");

        let bye = Status::bye(None, "shutting down").unwrap();
        assert_eq!(bye.tag(), None);
    }
}
