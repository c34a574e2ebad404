//! The IMAP extended SEARCH response (RFC 4731, RFC 9051).
//!
//! Additional changes:
//!
//! ```abnf
//! response-data =/ "*" SP esearch-response CRLF
//! ```

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt},
    error::ErrorKind,
    multi::many0,
    sequence::{delimited, preceded, terminated, tuple},
};

use crate::{
    decode::{IMAPErrorKind, IMAPParseError, IMAPResult},
    extensions::condstore::mod_sequence_value,
    parse::{
        core::{number, nz_number, quoted},
        keyword_end,
        sequence::sequence_set,
    },
    types::{
        core::Tag,
        response::{Data, Esearch, SearchReturnData},
    },
};

/// ```abnf
/// esearch-response = "ESEARCH" [search-correlator] [SP "UID"]
///                    *(SP search-return-data)
/// ```
pub(crate) fn esearch_response(input: &[u8]) -> IMAPResult<&[u8], Data> {
    let mut parser = tuple((
        terminated(tag_no_case(b"ESEARCH"), keyword_end),
        opt(preceded(sp, search_correlator)),
        opt(preceded(sp, tag_no_case(b"UID"))),
        many0(preceded(sp, search_return_data)),
    ));

    let (remaining, (_, correlator, uid, returns)) = parser(input)?;

    Ok((
        remaining,
        Data::Extended(Esearch {
            correlator,
            uid: uid.is_some(),
            returns,
        }),
    ))
}

/// ```abnf
/// search-correlator = SP "(" "TAG" SP tag-string ")"
///
/// tag-string = astring
///               ; represents a tag
/// ```
///
/// The leading SP is handled by the caller.
fn search_correlator(input: &[u8]) -> IMAPResult<&[u8], Tag> {
    let (remaining, quoted) = delimited(tag_no_case("(TAG "), quoted, tag(")"))(input)?;

    match Tag::try_from(quoted.into_inner()) {
        Ok(tag) => Ok((remaining, tag)),
        Err(_) => Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(ErrorKind::Verify),
        })),
    }
}

/// ```abnf
/// search-return-data = "MIN" SP nz-number /
///                      "MAX" SP nz-number /
///                      "ALL" SP sequence-set /
///                      "COUNT" SP number /
///                      "MODSEQ" SP mod-sequence-value ; RFC 7162
/// ```
fn search_return_data(input: &[u8]) -> IMAPResult<&[u8], SearchReturnData> {
    alt((
        map(
            preceded(tag_no_case(b"MIN "), nz_number),
            SearchReturnData::Min,
        ),
        map(
            preceded(tag_no_case(b"MAX "), nz_number),
            SearchReturnData::Max,
        ),
        map(
            preceded(tag_no_case(b"ALL "), sequence_set),
            SearchReturnData::All,
        ),
        map(
            preceded(tag_no_case(b"COUNT "), number),
            SearchReturnData::Count,
        ),
        map(
            preceded(tag_no_case(b"MODSEQ "), mod_sequence_value),
            SearchReturnData::ModSeq,
        ),
    ))(input)
}
