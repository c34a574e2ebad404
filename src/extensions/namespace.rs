//! The IMAP NAMESPACE Extension (RFC 2342).
//!
//! Additional changes:
//!
//! ```abnf
//! response-data =/ "*" SP namespace-response CRLF
//! ```

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, value},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, preceded, tuple},
};

use crate::{
    decode::IMAPResult,
    parse::core::{nil, quoted_char, string},
    types::{
        core::Vec1,
        response::{Data, Namespace, NamespaceResponseExtension, Namespaces},
    },
};

/// ```abnf
/// namespace-response = "NAMESPACE" SP namespace SP namespace SP namespace
/// ```
///
/// The three groups are the personal, other-users', and shared namespaces.
pub(crate) fn namespace_response(input: &[u8]) -> IMAPResult<&[u8], Data> {
    let mut parser = tuple((
        tag_no_case("NAMESPACE "),
        namespaces,
        preceded(sp, namespaces),
        preceded(sp, namespaces),
    ));

    let (remaining, (_, personal, other, shared)) = parser(input)?;

    Ok((
        remaining,
        Data::Namespace {
            personal,
            other,
            shared,
        },
    ))
}

/// ```abnf
/// namespace = nil / "(" 1*namespace-descr ")"
/// ```
fn namespaces(input: &[u8]) -> IMAPResult<&[u8], Namespaces> {
    alt((
        delimited(tag("("), many1(namespace), tag(")")),
        map(nil, |_| Vec::new()),
    ))(input)
}

/// ```abnf
/// namespace-descr = "(" string SP (DQUOTE QUOTED-CHAR DQUOTE / nil)
///                    *(namespace-response-extension) ")"
/// ```
fn namespace(input: &[u8]) -> IMAPResult<&[u8], Namespace> {
    let delimiter_parser = alt((
        map(delimited(tag("\""), quoted_char, tag("\"")), Some),
        value(None, nil),
    ));

    map(
        delimited(
            tag("("),
            tuple((
                string,
                sp,
                delimiter_parser,
                many0(namespace_response_extension),
            )),
            tag(")"),
        ),
        |(prefix, _, delimiter, extensions)| Namespace {
            prefix,
            delimiter,
            extensions,
        },
    )(input)
}

/// ```abnf
/// namespace-response-extension = SP string SP "(" string *(SP string) ")"
/// ```
fn namespace_response_extension(input: &[u8]) -> IMAPResult<&[u8], NamespaceResponseExtension> {
    map(
        preceded(
            sp,
            tuple((
                string,
                sp,
                delimited(tag("("), separated_list1(sp, string), tag(")")),
            )),
        ),
        |(key, _, values)| NamespaceResponseExtension {
            key,
            values: Vec1::unvalidated(values),
        },
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::core::{IString, QuotedChar};

    #[test]
    fn test_parse_namespace_response() {
        let (rem, got) =
            namespace_response(b"NAMESPACE ((\"\" \"/\")) NIL NIL\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(
            got,
            Data::Namespace {
                personal: vec![Namespace {
                    prefix: IString::try_from("").unwrap(),
                    delimiter: Some(QuotedChar::try_from('/').unwrap()),
                    extensions: vec![],
                }],
                other: vec![],
                shared: vec![],
            }
        );
    }

    #[test]
    fn test_parse_namespace_response_with_extension() {
        let (rem, got) = namespace_response(
            b"NAMESPACE ((\"\" \"/\") (\"#mh/\" \"/\" \"X-PARAM\" (\"FLAG1\" \"FLAG2\"))) NIL NIL\r\n",
        )
        .unwrap();
        assert_eq!(rem, b"\r\n");

        match got {
            Data::Namespace { personal, .. } => {
                assert_eq!(personal.len(), 2);
                assert_eq!(personal[1].extensions.len(), 1);
                assert_eq!(
                    personal[1].extensions[0].key,
                    IString::try_from("X-PARAM").unwrap()
                );
            }
            other => panic!("expected NAMESPACE, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_namespace_requires_three_groups() {
        assert!(namespace_response(b"NAMESPACE NIL NIL\r\n").is_err());
    }
}
