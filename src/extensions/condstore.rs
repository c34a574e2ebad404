//! The IMAP CONDSTORE/QRESYNC extension (RFC 7162).
//!
//! Additional changes:
//!
//! * `search-sort-mod-seq` may follow the numbers of a SEARCH/SORT response.
//! * `resp-text-code` gains `HIGHESTMODSEQ`, `NOMODSEQ`, and `MODIFIED`.
//! * `msg-att` gains `MODSEQ (n)` (handled in [`crate::parse::fetch`]).

use std::num::NonZeroU64;

use nom::{
    bytes::streaming::tag_no_case,
    character::streaming::char,
    combinator::map_res,
    sequence::{delimited, preceded},
};

use crate::{decode::IMAPResult, parse::core::number64};

/// Positive unsigned 64-bit integer (mod-sequence) (1 <= n < 18,446,744,073,709,551,615)
///
/// ```abnf
/// mod-sequence-value = 1*DIGIT
/// ```
pub(crate) fn mod_sequence_value(input: &[u8]) -> IMAPResult<&[u8], NonZeroU64> {
    map_res(number64, NonZeroU64::try_from)(input)
}

/// ```abnf
/// search-sort-mod-seq = "(" "MODSEQ" SP mod-sequence-value ")"
/// ```
pub(crate) fn search_sort_mod_seq(input: &[u8]) -> IMAPResult<&[u8], NonZeroU64> {
    delimited(
        char('('),
        preceded(tag_no_case("MODSEQ "), mod_sequence_value),
        char(')'),
    )(input)
}
