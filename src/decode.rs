//! # Decoding of responses.
//!
//! The [`Decode`] trait is implemented for [`Response`]; use it to parse one complete
//! server response.
//!
//! IMAP literals make separating the parsing logic from the application logic difficult.
//! When the parser recognizes a literal prefix (e.g. `{42}\r\n`) at the end of the
//! available data, it cannot proceed before the announced number of bytes arrived. This is
//! reported as [`DecodeError::LiteralFound`] so the transport layer can keep reading; the
//! client MUST accept the literal and has no option to reject it. Read the remaining
//! bytes, append them to the buffer, and call [`Decode::decode`] again with the whole
//! response.

use std::num::{ParseIntError, TryFromIntError};

use nom::error::{ErrorKind, FromExternalError, ParseError};

use crate::{parse::response::response, types::response::Response};

/// An extended version of [`nom::IResult`].
pub(crate) type IMAPResult<I, O> = Result<(I, O), nom::Err<IMAPParseError<I>>>;

/// An extended version of [`nom::error::Error`].
#[derive(Debug)]
pub(crate) struct IMAPParseError<I> {
    pub input: I,
    pub kind: IMAPErrorKind,
}

/// An extended version of [`nom::error::ErrorKind`].
#[derive(Debug)]
pub(crate) enum IMAPErrorKind {
    Literal {
        length: u32,
    },
    BadNumber,
    LiteralContainsNull,
    RecursionLimitExceeded,
    /// A response-condition label that is not `OK`, `NO`, or `BAD`.
    ///
    /// This is a semantic error: the response was syntactically a tagged response, but its
    /// condition is not in the allowed set.
    InvalidStatus,
    Nom(ErrorKind),
}

impl<I> ParseError<I> for IMAPParseError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::Nom(kind),
        }
    }

    fn append(input: I, kind: ErrorKind, _: Self) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::Nom(kind),
        }
    }
}

impl<I> FromExternalError<I, ParseIntError> for IMAPParseError<I> {
    fn from_external_error(input: I, _: ErrorKind, _: ParseIntError) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::BadNumber,
        }
    }
}

impl<I> FromExternalError<I, TryFromIntError> for IMAPParseError<I> {
    fn from_external_error(input: I, _: ErrorKind, _: TryFromIntError) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::BadNumber,
        }
    }
}

/// Error during response decoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// More data is needed.
    Incomplete,

    /// The decoder stopped at the beginning of literal data.
    ///
    /// Read `length` more bytes and decode the whole response again.
    LiteralFound {
        /// Literal length.
        length: u32,
    },

    /// The response-condition label of a (tagged) status response was not `OK`, `NO`, or
    /// `BAD`.
    InvalidStatus {
        /// Byte offset of the offending label.
        position: usize,
    },

    /// Decoding failed.
    Failed {
        /// Byte offset at which no grammar rule matched.
        position: usize,
    },
}

/// Decoder.
///
/// Implemented for types that know how to decode themselves from a byte buffer.
pub trait Decode<'a>: Sized + 'a {
    fn decode(input: &'a [u8]) -> Result<(&'a [u8], Self), DecodeError>;
}

impl<'a> Decode<'a> for Response<'a> {
    fn decode(input: &'a [u8]) -> Result<(&'a [u8], Self), DecodeError> {
        match response(input) {
            Ok((rem, rsp)) => Ok((rem, rsp)),
            Err(nom::Err::Incomplete(_)) => Err(DecodeError::Incomplete),
            Err(nom::Err::Error(error) | nom::Err::Failure(error)) => {
                let position = input.len().saturating_sub(error.input.len());

                match error.kind {
                    IMAPErrorKind::Literal { length } => Err(DecodeError::LiteralFound { length }),
                    IMAPErrorKind::InvalidStatus => Err(DecodeError::InvalidStatus { position }),
                    _ => Err(DecodeError::Failed { position }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;
    use crate::types::{
        core::{IString, Literal, NString, Vec1},
        fetch::MessageDataItem,
        response::{Data, Response},
    };

    #[test]
    fn test_decode_response() {
        let tests = [
            // Incomplete
            (b"".as_ref(), Err(DecodeError::Incomplete)),
            (b"*".as_ref(), Err(DecodeError::Incomplete)),
            (b"* ".as_ref(), Err(DecodeError::Incomplete)),
            (b"* S".as_ref(), Err(DecodeError::Incomplete)),
            (b"* SE".as_ref(), Err(DecodeError::Incomplete)),
            (b"* SEA".as_ref(), Err(DecodeError::Incomplete)),
            (b"* SEARCH".as_ref(), Err(DecodeError::Incomplete)),
            (b"* SEARCH ".as_ref(), Err(DecodeError::Incomplete)),
            (b"* SEARCH 1".as_ref(), Err(DecodeError::Incomplete)),
            (b"* SEARCH 1\r".as_ref(), Err(DecodeError::Incomplete)),
            // Ok
            (
                b"* SEARCH 1\r\n".as_ref(),
                Ok((
                    b"".as_ref(),
                    Response::Data(Data::Search(vec![NonZeroU32::new(1).unwrap()], None)),
                )),
            ),
            (
                b"* SEARCH 1\r\n???".as_ref(),
                Ok((
                    b"???".as_ref(),
                    Response::Data(Data::Search(vec![NonZeroU32::new(1).unwrap()], None)),
                )),
            ),
            (
                b"* 1 FETCH (RFC822 {5}\r\nhello)\r\n".as_ref(),
                Ok((
                    b"".as_ref(),
                    Response::Data(Data::Fetch {
                        seq: NonZeroU32::new(1).unwrap(),
                        items: Vec1::from(MessageDataItem::Rfc822(NString(Some(
                            IString::Literal(Literal::try_from(b"hello".as_ref()).unwrap()),
                        )))),
                    }),
                )),
            ),
            (
                b"* 1 FETCH (RFC822 {5}\r\n".as_ref(),
                Err(DecodeError::LiteralFound { length: 5 }),
            ),
            // Failed
            (
                b"*  search 1 2 3\r\n".as_ref(),
                Err(DecodeError::Failed { position: 2 }),
            ),
            // Semantic tier: a tag followed by something that is not OK/NO/BAD.
            (
                b"A001 MEH hello\r\n".as_ref(),
                Err(DecodeError::InvalidStatus { position: 5 }),
            ),
        ];

        for (test, expected) in tests {
            let got = Response::decode(test);
            dbg!((std::str::from_utf8(test).unwrap(), &expected, &got));
            assert_eq!(expected, got);
        }
    }
}
