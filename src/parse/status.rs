//! Parsers for the STATUS data items.

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::tag_no_case,
    combinator::map,
    multi::separated_list1,
    sequence::preceded,
};

use crate::{
    decode::IMAPResult,
    parse::core::{number, number64, nz_number},
    types::status::StatusDataItem,
};

/// `status-att-list = status-att-val *(SP status-att-val)`
///
/// Note: See errata id: 261
pub(crate) fn status_att_list(input: &[u8]) -> IMAPResult<&[u8], Vec<StatusDataItem>> {
    separated_list1(sp, status_att_val)(input)
}

/// ```abnf
/// status-att-val  = "MESSAGES" SP number /
///                   "RECENT" SP number /
///                   "UIDNEXT" SP nz-number /
///                   "UIDVALIDITY" SP nz-number /
///                   "UNSEEN" SP number /
///                   "DELETED" SP number /
///                   "DELETED-STORAGE" SP number64 /
///                   "HIGHESTMODSEQ" SP mod-sequence-valzer
/// ```
///
/// Note: See errata id: 261
fn status_att_val(input: &[u8]) -> IMAPResult<&[u8], StatusDataItem> {
    alt((
        map(
            preceded(tag_no_case(b"MESSAGES "), number),
            StatusDataItem::Messages,
        ),
        map(
            preceded(tag_no_case(b"RECENT "), number),
            StatusDataItem::Recent,
        ),
        map(
            preceded(tag_no_case(b"UIDNEXT "), nz_number),
            StatusDataItem::UidNext,
        ),
        map(
            preceded(tag_no_case(b"UIDVALIDITY "), nz_number),
            StatusDataItem::UidValidity,
        ),
        map(
            preceded(tag_no_case(b"UNSEEN "), number),
            StatusDataItem::Unseen,
        ),
        map(
            preceded(tag_no_case(b"DELETED-STORAGE "), number64),
            StatusDataItem::DeletedStorage,
        ),
        map(
            preceded(tag_no_case(b"DELETED "), number),
            StatusDataItem::Deleted,
        ),
        map(
            preceded(tag_no_case(b"HIGHESTMODSEQ "), number64),
            StatusDataItem::HighestModSeq,
        ),
    ))(input)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    #[test]
    fn test_parse_status_att_list() {
        let (rem, got) = status_att_list(b"MESSAGES 231 UIDNEXT 44292)").unwrap();
        assert_eq!(rem, b")");
        assert_eq!(
            got,
            vec![
                StatusDataItem::Messages(231),
                StatusDataItem::UidNext(NonZeroU32::new(44292).unwrap()),
            ]
        );

        let (rem, got) = status_att_list(b"HIGHESTMODSEQ 7011231777)").unwrap();
        assert_eq!(rem, b")");
        assert_eq!(got, vec![StatusDataItem::HighestModSeq(7011231777)]);
    }
}
