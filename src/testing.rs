//! Test helpers.

use std::fmt::Debug;

use crate::decode::IMAPResult;

pub(crate) fn known_answer_test_parse<'a, O, P>(
    (test, expected_remainder, expected_object): (&'a [u8], &[u8], O),
    parser: P,
) where
    O: Debug + PartialEq + 'a,
    P: Fn(&'a [u8]) -> IMAPResult<&'a [u8], O>,
{
    let (got_remainder, got_object) = parser(test).unwrap();
    assert_eq!(expected_object, got_object);
    assert_eq!(expected_remainder, got_remainder);
}
