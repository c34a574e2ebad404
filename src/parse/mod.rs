//! # 9. Formal Syntax
//!
//! One parser per ABNF production, with the production quoted in the doc comment.
//!
//! [ABNF] rules MUST be followed strictly; in particular:
//!
//! * (1) Except as noted otherwise, all alphabetic characters are case-insensitive. The
//!   use of upper or lower case characters to define token strings is for editorial
//!   clarity only.
//! * (2) In all cases, SP refers to exactly one space. It is NOT permitted to substitute
//!   TAB, insert additional spaces, or otherwise treat SP as being equivalent to LWSP.
//! * (3) The ASCII NUL character, %x00, MUST NOT be used at any time.
//!
//! The places where real-world servers are known to deviate from the grammar are handled
//! behind the `quirk_*` features.

use abnf_core::streaming::crlf;

use crate::decode::{IMAPErrorKind, IMAPParseError, IMAPResult};

pub mod body;
pub mod core;
pub mod envelope;
pub mod fetch;
pub mod flag;
pub mod mailbox;
pub mod response;
pub mod sequence;
pub mod status;

/// The end of a response: exactly one CRLF.
///
/// Some servers emit spaces before the CRLF; those are skipped (with a warning) when the
/// `quirk_trailing_space` feature is enabled.
pub(crate) fn response_end(input: &[u8]) -> IMAPResult<&[u8], &[u8]> {
    #[cfg(not(feature = "quirk_trailing_space"))]
    {
        nom::combinator::recognize(crlf)(input)
    }

    #[cfg(feature = "quirk_trailing_space")]
    {
        let (remaining, (spaces, crlf)) = nom::sequence::tuple((
            nom::bytes::streaming::take_while(|byte| byte == b' '),
            nom::combinator::recognize(crlf),
        ))(input)?;

        if !spaces.is_empty() {
            log::warn!("Skipped {} trailing space(s) before CRLF", spaces.len());
        }

        Ok((remaining, crlf))
    }
}

/// Succeeds (without consuming) when a keyword ends here, i.e. a SP or the final CRLF
/// follows.
///
/// Used after keywords that may stand alone, such as `SEARCH` or `ENABLED`, so that an
/// unknown label sharing the prefix (e.g. `SEARCHRES`) is not misread.
pub(crate) fn keyword_end(input: &[u8]) -> IMAPResult<&[u8], ()> {
    match input.first() {
        None => Err(nom::Err::Incomplete(nom::Needed::new(1))),
        Some(b' ') | Some(b'\r') => Ok((input, ())),
        Some(_) => Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(nom::error::ErrorKind::Verify),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_end() {
        assert!(keyword_end(b" 1").is_ok());
        assert!(keyword_end(b"\r\n").is_ok());
        assert!(keyword_end(b"X").is_err());
        assert!(matches!(keyword_end(b""), Err(nom::Err::Incomplete(_))));
    }

    #[test]
    fn test_response_end() {
        assert!(response_end(b"\r\nrest").is_ok());

        #[cfg(feature = "quirk_trailing_space")]
        {
            let (rem, _) = response_end(b"   \r\nrest").unwrap();
            assert_eq!(rem, b"rest");
        }

        #[cfg(not(feature = "quirk_trailing_space"))]
        assert!(response_end(b" \r\n").is_err());

        assert!(response_end(b"x\r\n").is_err());
    }
}
