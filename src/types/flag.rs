//! Flag-related types.

use std::fmt::{Display, Formatter};

use crate::{error::ValidationError, types::core::Atom};

/// There are two types of flags in IMAP4rev1: System and keyword flags.
///
/// A system flag is a flag name that is pre-defined in RFC 3501. All system flags begin
/// with "\\". Flags that begin with "\\" but are not pre-defined system flags are
/// extension flags; clients MUST accept them.
///
/// A keyword is defined by the server implementation. Keywords do not begin with "\\".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Flag<'a> {
    /// Message has been answered (`\Answered`).
    Answered,
    /// Message is "deleted" for removal by later EXPUNGE (`\Deleted`).
    Deleted,
    /// Message has not completed composition (marked as a draft) (`\Draft`).
    Draft,
    /// Message is "flagged" for urgent/special attention (`\Flagged`).
    Flagged,
    /// Message has been read (`\Seen`).
    Seen,
    /// A future expansion of a system flag.
    Extension(FlagExtension<'a>),
    /// A keyword.
    Keyword(Atom<'a>),
}

/// An (extension) flag.
///
/// It's guaranteed that this type can't represent any flag from [`Flag`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlagExtension<'a>(pub(crate) Atom<'a>);

impl<'a> Flag<'a> {
    /// Canonicalize a `\`-prefixed flag name.
    pub fn system(atom: Atom<'a>) -> Self {
        match atom.as_ref().to_ascii_lowercase().as_ref() {
            "answered" => Self::Answered,
            "deleted" => Self::Deleted,
            "draft" => Self::Draft,
            "flagged" => Self::Flagged,
            "seen" => Self::Seen,
            _ => Self::Extension(FlagExtension(atom)),
        }
    }

    pub fn keyword(atom: Atom<'a>) -> Self {
        Self::Keyword(atom)
    }
}

impl<'a> TryFrom<&'a str> for Flag<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        use crate::error::ValidationErrorKind;

        Ok(if let Some(value) = value.strip_prefix('\\') {
            Self::system(
                Atom::try_from(value)
                    .map_err(|_| ValidationError::new(ValidationErrorKind::Invalid))?,
            )
        } else {
            Self::keyword(
                Atom::try_from(value)
                    .map_err(|_| ValidationError::new(ValidationErrorKind::Invalid))?,
            )
        })
    }
}

impl Display for Flag<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Flag::Answered => f.write_str("\\Answered"),
            Flag::Deleted => f.write_str("\\Deleted"),
            Flag::Draft => f.write_str("\\Draft"),
            Flag::Flagged => f.write_str("\\Flagged"),
            Flag::Seen => f.write_str("\\Seen"),
            Flag::Extension(other) => write!(f, "\\{}", other.0),
            Flag::Keyword(atom) => write!(f, "{atom}"),
        }
    }
}

/// A flag in a FETCH response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlagFetch<'a> {
    Flag(Flag<'a>),

    /// Message is "recently" arrived in this mailbox (`\Recent`).
    ///
    /// Note: This flag can not be altered by the client.
    Recent,
}

impl<'a> From<Flag<'a>> for FlagFetch<'a> {
    fn from(flag: Flag<'a>) -> Self {
        Self::Flag(flag)
    }
}

/// A flag in a PERMANENTFLAGS response code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlagPerm<'a> {
    Flag(Flag<'a>),

    /// Indicates that it is possible to create new keywords by
    /// attempting to store those flags in the mailbox (`\*`).
    Asterisk,
}

impl<'a> From<Flag<'a>> for FlagPerm<'a> {
    fn from(flag: Flag<'a>) -> Self {
        Self::Flag(flag)
    }
}

/// Mailbox name attributes in a LIST/LSUB/XLIST response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlagNameAttribute<'a> {
    /// It is not possible for any child levels of hierarchy to exist
    /// under this name (`\Noinferiors`).
    Noinferiors,

    /// It is not possible to use this name as a selectable mailbox (`\Noselect`).
    Noselect,

    /// The mailbox has been marked "interesting" by the server (`\Marked`).
    Marked,

    /// The mailbox does not contain any additional messages since the
    /// last time the mailbox was selected (`\Unmarked`).
    Unmarked,

    /// An extension flag.
    Extension(FlagNameAttributeExtension<'a>),
}

/// An extension flag.
///
/// It's guaranteed that this type can't represent any attribute from [`FlagNameAttribute`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlagNameAttributeExtension<'a>(pub(crate) Atom<'a>);

impl FlagNameAttribute<'_> {
    pub fn is_selectability(&self) -> bool {
        matches!(
            self,
            FlagNameAttribute::Noselect | FlagNameAttribute::Marked | FlagNameAttribute::Unmarked
        )
    }
}

impl<'a> From<Atom<'a>> for FlagNameAttribute<'a> {
    fn from(atom: Atom<'a>) -> Self {
        match atom.as_ref().to_ascii_lowercase().as_ref() {
            "noinferiors" => Self::Noinferiors,
            "noselect" => Self::Noselect,
            "marked" => Self::Marked,
            "unmarked" => Self::Unmarked,
            _ => Self::Extension(FlagNameAttributeExtension(atom)),
        }
    }
}

impl Display for FlagNameAttribute<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Noinferiors => f.write_str("\\Noinferiors"),
            Self::Noselect => f.write_str("\\Noselect"),
            Self::Marked => f.write_str("\\Marked"),
            Self::Unmarked => f.write_str("\\Unmarked"),
            Self::Extension(extension) => write!(f, "\\{}", extension.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_system_canonicalization() {
        assert_eq!(Flag::system(Atom::try_from("SEEN").unwrap()), Flag::Seen);
        assert_eq!(Flag::system(Atom::try_from("seen").unwrap()), Flag::Seen);
        assert_eq!(
            Flag::system(Atom::try_from("Deletedx").unwrap()),
            Flag::Extension(FlagExtension(Atom::try_from("Deletedx").unwrap()))
        );
    }

    #[test]
    fn test_flagnameattribute() {
        assert_eq!(
            FlagNameAttribute::from(Atom::try_from("Noselect").unwrap()),
            FlagNameAttribute::Noselect
        );
        let atom = Atom::try_from("Custom").unwrap();
        assert_eq!(
            FlagNameAttribute::from(atom.clone()),
            FlagNameAttribute::Extension(FlagNameAttributeExtension(atom))
        );
    }
}
