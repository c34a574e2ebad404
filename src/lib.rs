//! # imap-client-codec
//!
//! Parsing of IMAP server responses ([RFC 3501], [RFC 9051]) for client
//! implementations, plus the `sequence-set` value type with its full set
//! algebra.
//!
//! The crate has two halves:
//!
//! * [`types`] contains misuse-resistant data types for everything a server
//!   can send: [`types::response::Response`] and its payloads, the core
//!   string types ([`types::core`]), and [`types::sequence::SequenceSet`].
//! * The parser: one [nom] function per grammar production, internal to the
//!   crate. The entry point is [`decode::Decode`]:
//!
//! ```rust
//! use imap_client_codec::{
//!     decode::Decode,
//!     types::response::{Data, Response},
//! };
//!
//! let (remaining, response) = Response::decode(b"* 23 EXISTS\r\n").unwrap();
//! assert!(remaining.is_empty());
//! assert_eq!(response, Response::Data(Data::Exists(23)));
//! ```
//!
//! Responses are parsed as a whole: the caller (typically the transport
//! layer) assembles one complete line -- including the bytes of any embedded
//! literal -- and hands it over. When a literal's data has not arrived yet,
//! decoding reports [`decode::DecodeError::LiteralFound`] with the announced
//! length so the caller can read on.
//!
//! Deviations that real-world servers are known to produce (trailing spaces,
//! `message/rfc822` parts without an envelope, multiparts without parts, ...)
//! are tolerated behind default-enabled `quirk_*` features and reported via
//! `log::warn!`.
//!
//! [RFC 3501]: https://datatracker.ietf.org/doc/html/rfc3501
//! [RFC 9051]: https://datatracker.ietf.org/doc/html/rfc9051

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod decode;
pub mod error;
mod extensions;
mod parse;
#[cfg(test)]
mod testing;
pub mod types;
pub mod utils;
