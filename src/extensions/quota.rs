//! The IMAP QUOTA Extension (RFC 2087, updated by RFC 9208).
//!
//! Additional changes:
//!
//! ```abnf
//! mailbox-data =/ "QUOTA" SP astring SP quota-list /
//!                 "QUOTAROOT" SP mailbox *(SP astring)
//! ```

use abnf_core::streaming::sp;
use nom::{
    bytes::streaming::{tag, tag_no_case},
    combinator::map,
    multi::{many0, separated_list1},
    sequence::{delimited, preceded, tuple},
};

use crate::{
    decode::IMAPResult,
    parse::{
        core::{astring, atom, number64},
        mailbox::mailbox,
    },
    types::{
        core::Vec1,
        response::{Data, QuotaGet, Resource},
    },
};

/// ```abnf
/// quota-response = "QUOTA" SP astring SP quota-list
/// ```
pub(crate) fn quota_response(input: &[u8]) -> IMAPResult<&[u8], Data> {
    let mut parser = tuple((tag_no_case("QUOTA "), astring, sp, quota_list));

    let (remaining, (_, root, _, quotas)) = parser(input)?;

    Ok((remaining, Data::Quota { root, quotas }))
}

/// ```abnf
/// quota-list = "(" quota-resource *(SP quota-resource) ")"
/// ```
fn quota_list(input: &[u8]) -> IMAPResult<&[u8], Vec1<QuotaGet>> {
    delimited(
        tag("("),
        map(separated_list1(sp, quota_resource), Vec1::unvalidated),
        tag(")"),
    )(input)
}

/// ```abnf
/// quota-resource = resource-name SP resource-usage SP resource-limit
///
/// resource-name = "STORAGE" / "MESSAGE" / "MAILBOX" / "ANNOTATION-STORAGE" /
///                 resource-name-ext
///
/// resource-usage = number64
///
/// resource-limit = number64
/// ```
fn quota_resource(input: &[u8]) -> IMAPResult<&[u8], QuotaGet> {
    let mut parser = tuple((map(atom, Resource::from), sp, number64, sp, number64));

    let (remaining, (resource, _, usage, _, limit)) = parser(input)?;

    Ok((
        remaining,
        QuotaGet {
            resource,
            usage,
            limit,
        },
    ))
}

/// ```abnf
/// quotaroot-response = "QUOTAROOT" SP mailbox *(SP astring)
/// ```
pub(crate) fn quotaroot_response(input: &[u8]) -> IMAPResult<&[u8], Data> {
    let mut parser = tuple((
        tag_no_case("QUOTAROOT "),
        mailbox,
        many0(preceded(sp, astring)),
    ));

    let (remaining, (_, mailbox, roots)) = parser(input)?;

    Ok((remaining, Data::QuotaRoot { mailbox, roots }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{core::AString, mailbox::Mailbox};

    #[test]
    fn test_parse_quota_response() {
        let (rem, got) = quota_response(b"QUOTA \"\" (STORAGE 10 512)\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(
            got,
            Data::Quota {
                root: AString::try_from("").unwrap(),
                quotas: Vec1::from(QuotaGet {
                    resource: Resource::Storage,
                    usage: 10,
                    limit: 512,
                }),
            }
        );
    }

    #[test]
    fn test_parse_quota_response_unknown_resource() {
        let (_, got) = quota_response(b"QUOTA root (X-CUSTOM 0 100)\r\n").unwrap();

        match got {
            Data::Quota { quotas, .. } => {
                assert!(matches!(quotas.as_ref()[0].resource, Resource::Other(_)));
            }
            other => panic!("expected QUOTA, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_quotaroot_response() {
        let (rem, got) = quotaroot_response(b"QUOTAROOT INBOX \"\"\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(
            got,
            Data::QuotaRoot {
                mailbox: Mailbox::Inbox,
                roots: vec![AString::try_from("").unwrap()],
            }
        );
    }
}
