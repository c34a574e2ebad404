//! The IMAP ACL extension (RFC 4314).
//!
//! Additional changes:
//!
//! ```abnf
//! mailbox-data =/ acl-data
//! ```

use abnf_core::streaming::sp;
use nom::{
    bytes::streaming::tag_no_case,
    multi::many0,
    sequence::{preceded, tuple},
};

use crate::{
    decode::IMAPResult,
    parse::{core::astring, mailbox::mailbox},
    types::response::{AclEntry, Data},
};

/// ```abnf
/// acl-data = "ACL" SP mailbox *(SP identifier SP rights)
///
/// identifier = astring
///
/// rights = astring
/// ```
pub(crate) fn acl_data(input: &[u8]) -> IMAPResult<&[u8], Data> {
    let mut parser = tuple((
        tag_no_case("ACL "),
        mailbox,
        many0(preceded(sp, acl_entry)),
    ));

    let (remaining, (_, mailbox, entries)) = parser(input)?;

    Ok((remaining, Data::Acl { mailbox, entries }))
}

fn acl_entry(input: &[u8]) -> IMAPResult<&[u8], AclEntry> {
    let mut parser = tuple((astring, sp, astring));

    let (remaining, (identifier, _, rights)) = parser(input)?;

    Ok((
        remaining,
        AclEntry {
            identifier,
            rights,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{core::AString, mailbox::Mailbox};

    #[test]
    fn test_parse_acl_data() {
        let (rem, got) = acl_data(b"ACL INBOX Fred rwipslda steve lrs\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(
            got,
            Data::Acl {
                mailbox: Mailbox::Inbox,
                entries: vec![
                    AclEntry {
                        identifier: AString::try_from("Fred").unwrap(),
                        rights: AString::try_from("rwipslda").unwrap(),
                    },
                    AclEntry {
                        identifier: AString::try_from("steve").unwrap(),
                        rights: AString::try_from("lrs").unwrap(),
                    },
                ],
            }
        );
    }

    #[test]
    fn test_parse_acl_data_without_entries() {
        let (rem, got) = acl_data(b"ACL other.mailbox\r\n").unwrap();
        assert_eq!(rem, b"\r\n");

        match got {
            Data::Acl { entries, .. } => assert!(entries.is_empty()),
            other => panic!("expected ACL, got {other:?}"),
        }
    }
}
