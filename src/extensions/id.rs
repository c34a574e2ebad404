//! The IMAP4 ID extension (RFC 2971).
//!
//! Additional changes:
//!
//! ```abnf
//! response-data =/ "*" SP id-response CRLF
//! ```

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, value},
    multi::separated_list0,
    sequence::{delimited, preceded, separated_pair},
};

use crate::{
    decode::IMAPResult,
    parse::core::{nil, nstring, string},
    types::core::{IString, NString},
};

/// ```abnf
/// id-response = "ID" SP id-params-list
/// ```
#[allow(clippy::type_complexity)]
pub(crate) fn id_response(input: &[u8]) -> IMAPResult<&[u8], Option<Vec<(IString, NString)>>> {
    preceded(tag_no_case("ID "), id_params_list)(input)
}

/// ```abnf
/// id-params-list = "(" [string SP nstring *(SP string SP nstring)] ")" / nil
/// ```
///
/// Note: Updated ABNF. (See <https://github.com/modern-email/defects/issues/12>)
#[allow(clippy::type_complexity)]
pub(crate) fn id_params_list(input: &[u8]) -> IMAPResult<&[u8], Option<Vec<(IString, NString)>>> {
    alt((
        map(
            delimited(
                tag("("),
                separated_list0(sp, separated_pair(string, sp, nstring)),
                tag(")"),
            ),
            Some,
        ),
        value(None, nil),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_response() {
        let (rem, got) = id_response(b"ID (\"name\" \"Cyrus\" \"version\" NIL)\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(
            got,
            Some(vec![
                (
                    IString::try_from("name").unwrap(),
                    NString::try_from("Cyrus").unwrap(),
                ),
                (IString::try_from("version").unwrap(), NString(None)),
            ])
        );

        let (rem, got) = id_response(b"ID NIL\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(got, None);

        let (rem, got) = id_response(b"ID ()\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(got, Some(vec![]));
    }
}
