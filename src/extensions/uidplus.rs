//! The IMAP UIDPLUS extension (RFC 4315).
//!
//! Additional changes:
//!
//! ```abnf
//! resp-text-code =/ resp-code-apnd / resp-code-copy / "UIDNOTSTICKY"
//! ```

use std::num::NonZeroU32;

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::map,
    multi::separated_list1,
    sequence::{separated_pair, tuple},
};

use crate::{
    decode::IMAPResult,
    parse::core::nz_number,
    types::{
        core::Vec1,
        response::Code,
        sequence::{UidElement, UidSet},
    },
};

/// ```abnf
/// resp-code-apnd = "APPENDUID" SP nz-number SP append-uid
///
/// append-uid = uniqueid / uid-set
///               ; only permitted if client uses [MULTIAPPEND]
/// ```
pub(crate) fn resp_code_apnd(input: &[u8]) -> IMAPResult<&[u8], Code> {
    let (rem, (_, uid_validity, _, uids)) =
        tuple((tag_no_case("APPENDUID "), nz_number, sp, uid_set))(input)?;

    Ok((rem, Code::AppendUid { uid_validity, uids }))
}

/// ```abnf
/// resp-code-copy = "COPYUID" SP nz-number SP uid-set SP uid-set
/// ```
pub(crate) fn resp_code_copy(input: &[u8]) -> IMAPResult<&[u8], Code> {
    let (rem, (_, uid_validity, _, source, _, destination)) =
        tuple((tag_no_case("COPYUID "), nz_number, sp, uid_set, sp, uid_set))(input)?;

    Ok((
        rem,
        Code::CopyUid {
            uid_validity,
            source,
            destination,
        },
    ))
}

/// ```abnf
/// uid-set = (uniqueid / uid-range) *("," uid-set)
/// ```
///
/// Modified ...
///
/// ```abnf
/// uid-set = (uniqueid / uid-range) *("," (uniqueid / uid-range))
/// ```
pub(crate) fn uid_set(input: &[u8]) -> IMAPResult<&[u8], UidSet> {
    map(
        separated_list1(
            tag(b","),
            alt((
                map(uid_range, |(a, b)| UidElement::range(a, b)),
                map(nz_number, UidElement::Single),
            )),
        ),
        // `unvalidated` is fine due to `separated_list1`.
        |set| UidSet(Vec1::unvalidated(set)),
    )(input)
}

/// ```abnf
/// ; two uniqueid values and all values between these two regards of order.
/// ; Example: 2:4 and 4:2 are equivalent.
/// uid-range = (uniqueid ":" uniqueid)
/// ```
pub(crate) fn uid_range(input: &[u8]) -> IMAPResult<&[u8], (NonZeroU32, NonZeroU32)> {
    separated_pair(nz_number, tag(b":"), nz_number)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap()
    }

    #[test]
    fn test_parse_uid_set() {
        let (rem, got) = uid_set(b"1001:1005,1010,1012:1015 ").unwrap();
        assert_eq!(rem, b" ");
        assert_eq!(
            got,
            UidSet(
                Vec1::try_from(vec![
                    UidElement::Range(nz(1001), nz(1005)),
                    UidElement::Single(nz(1010)),
                    UidElement::Range(nz(1012), nz(1015)),
                ])
                .unwrap()
            )
        );
    }

    #[test]
    fn test_parse_uid_set_normalizes_ranges() {
        let (_, got) = uid_set(b"5:2 ").unwrap();
        assert_eq!(
            got,
            UidSet(Vec1::from(UidElement::Range(nz(2), nz(5))))
        );
    }

    #[test]
    fn test_parse_resp_code_apnd() {
        let (rem, got) = resp_code_apnd(b"APPENDUID 38505 3955]").unwrap();
        assert_eq!(rem, b"]");
        assert_eq!(
            got,
            Code::AppendUid {
                uid_validity: nz(38505),
                uids: UidSet(Vec1::from(UidElement::Single(nz(3955)))),
            }
        );

        // MULTIAPPEND: several UIDs may be assigned.
        let (_, got) = resp_code_apnd(b"APPENDUID 38505 3955:3957]").unwrap();
        assert_eq!(
            got,
            Code::AppendUid {
                uid_validity: nz(38505),
                uids: UidSet(Vec1::from(UidElement::Range(nz(3955), nz(3957)))),
            }
        );
    }

    #[test]
    fn test_parse_resp_code_copy() {
        let (rem, got) = resp_code_copy(b"COPYUID 38505 304,319:320 3956:3958]").unwrap();
        assert_eq!(rem, b"]");
        assert_eq!(
            got,
            Code::CopyUid {
                uid_validity: nz(38505),
                source: UidSet(
                    Vec1::try_from(vec![
                        UidElement::Single(nz(304)),
                        UidElement::Range(nz(319), nz(320)),
                    ])
                    .unwrap()
                ),
                destination: UidSet(Vec1::from(UidElement::Range(nz(3956), nz(3958)))),
            }
        );
    }
}
