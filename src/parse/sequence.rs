//! Parsers for the `sequence-set` wire form.

use nom::{
    branch::alt,
    bytes::streaming::tag,
    combinator::{map, recognize, value},
    error::ErrorKind,
    multi::separated_list1,
    sequence::tuple,
};

use crate::{
    decode::{IMAPErrorKind, IMAPParseError, IMAPResult},
    parse::core::nz_number,
    types::sequence::{SeqOrUid, Sequence, SequenceSet},
};

/// `sequence-set = (seq-number / seq-range) ["," sequence-set]`
///
/// Set of seq-number values, regardless of order.
/// Servers MAY coalesce overlaps and/or execute the sequence in any order.
///
/// Example: a message sequence number set of
/// 2,4:7,9,12:* for a mailbox with 15 messages is
/// equivalent to 2,4,5,6,7,9,12,13,14,15
///
/// Simplified:
///
/// `sequence-set = (seq-number / seq-range) *("," (seq-number / seq-range))`
///
/// The textual form is preserved: rendering the returned set gives back the input bytes.
pub(crate) fn sequence_set(input: &[u8]) -> IMAPResult<&[u8], SequenceSet> {
    let (remaining, parsed) = recognize(separated_list1(
        tag(b","),
        alt((
            // Ordering is important!
            map(seq_range, |(from, to)| Sequence::Range(from, to)),
            map(seq_number, Sequence::Single),
        )),
    ))(input)?;

    // Safety: `unwrap` is safe because the grammar above only matches ASCII.
    //
    // The set constructor is stricter than `nz_number` (it rejects leading zeroes), so
    // its verdict is the one that counts.
    match SequenceSet::try_from(std::str::from_utf8(parsed).unwrap()) {
        Ok(set) => Ok((remaining, set)),
        Err(_) => Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(ErrorKind::Verify),
        })),
    }
}

/// `seq-range = seq-number ":" seq-number`
///
/// Two seq-number values and all values between these two regardless of order.
///
/// Example: 2:4 and 4:2 are equivalent and indicate values 2, 3, and 4.
///
/// Example: a unique identifier sequence range of 3291:* includes the UID
///          of the last message in the mailbox, even if that value is less than 3291.
pub(crate) fn seq_range(input: &[u8]) -> IMAPResult<&[u8], (SeqOrUid, SeqOrUid)> {
    let mut parser = tuple((seq_number, tag(b":"), seq_number));

    let (remaining, (from, _, to)) = parser(input)?;

    Ok((remaining, (from, to)))
}

/// `seq-number = nz-number / "*"`
///
/// Message sequence number (COPY, FETCH, STORE commands) or unique
/// identifier (UID COPY, UID FETCH, UID STORE commands).
///
/// "*" represents the largest number in use.
pub(crate) fn seq_number(input: &[u8]) -> IMAPResult<&[u8], SeqOrUid> {
    alt((
        map(nz_number, SeqOrUid::Value),
        value(SeqOrUid::Asterisk, tag(b"*")),
    ))(input)
}
