//! Parsers for the envelope structure.

use abnf_core::streaming::sp;
use nom::{
    branch::alt,
    bytes::streaming::tag,
    combinator::map,
    multi::many1,
    sequence::{delimited, tuple},
};

use crate::{
    decode::IMAPResult,
    parse::core::{nil, nstring},
    types::{
        core::NString,
        envelope::{Address, Envelope},
    },
};

/// ```abnf
/// envelope = "("
///              env-date SP
///              env-subject SP
///              env-from SP
///              env-sender SP
///              env-reply-to SP
///              env-to SP
///              env-cc SP
///              env-bcc SP
///              env-in-reply-to SP
///              env-message-id
///            ")"
/// ```
pub(crate) fn envelope(input: &[u8]) -> IMAPResult<&[u8], Envelope> {
    let mut parser = delimited(
        tag(b"("),
        tuple((
            env_date,
            sp,
            env_subject,
            sp,
            address_list,
            sp,
            address_list,
            sp,
            address_list,
            sp,
            address_list,
            sp,
            address_list,
            sp,
            address_list,
            sp,
            env_in_reply_to,
            sp,
            env_message_id,
        )),
        tag(b")"),
    );

    let (
        remaining,
        (
            date,
            _,
            subject,
            _,
            from,
            _,
            sender,
            _,
            reply_to,
            _,
            to,
            _,
            cc,
            _,
            bcc,
            _,
            in_reply_to,
            _,
            message_id,
        ),
    ) = parser(input)?;

    Ok((
        remaining,
        Envelope {
            date,
            subject,
            from,
            sender,
            reply_to,
            to,
            cc,
            bcc,
            in_reply_to,
            message_id,
        },
    ))
}

#[inline]
/// `env-date = nstring`
fn env_date(input: &[u8]) -> IMAPResult<&[u8], NString> {
    nstring(input)
}

#[inline]
/// `env-subject = nstring`
fn env_subject(input: &[u8]) -> IMAPResult<&[u8], NString> {
    nstring(input)
}

/// `env-from = "(" 1*address ")" / nil`
///
/// Also: `env-sender`, `env-reply-to`, `env-to`, `env-cc`, `env-bcc` (same shape).
fn address_list(input: &[u8]) -> IMAPResult<&[u8], Vec<Address>> {
    alt((
        delimited(tag(b"("), many1(address), tag(b")")),
        map(nil, |_| Vec::new()),
    ))(input)
}

#[inline]
/// `env-in-reply-to = nstring`
fn env_in_reply_to(input: &[u8]) -> IMAPResult<&[u8], NString> {
    nstring(input)
}

#[inline]
/// `env-message-id = nstring`
fn env_message_id(input: &[u8]) -> IMAPResult<&[u8], NString> {
    nstring(input)
}

/// `address = "("
///             addr-name SP
///             addr-adl SP
///             addr-mailbox SP
///             addr-host
///             ")"`
///
/// The four slots are name, route, mailbox, and host; each is an `nstring`.
pub(crate) fn address(input: &[u8]) -> IMAPResult<&[u8], Address> {
    let mut parser = delimited(
        tag(b"("),
        tuple((nstring, sp, nstring, sp, nstring, sp, nstring)),
        tag(b")"),
    );

    let (remaining, (name, _, adl, _, mailbox, _, host)) = parser(input)?;

    Ok((
        remaining,
        Address {
            name,
            adl,
            mailbox,
            host,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::core::IString;

    #[test]
    fn test_parse_address() {
        let (rem, val) = address(b"(nil {3}\r\nxxx \"xxx\" nil)").unwrap();
        assert_eq!(
            val,
            Address {
                name: NString(None),
                adl: NString(Some(IString::Literal(
                    b"xxx".as_slice().try_into().unwrap()
                ))),
                mailbox: NString(Some(IString::Quoted("xxx".try_into().unwrap()))),
                host: NString(None),
            }
        );
        assert_eq!(rem, b"");
    }

    #[test]
    fn test_parse_envelope() {
        let (rem, val) = envelope(
            b"(\"date\" \"subject\" ((\"name\" NIL \"mailbox\" \"host\")) NIL NIL NIL NIL NIL NIL \"<id>\")|",
        )
        .unwrap();
        assert_eq!(rem, b"|");
        assert_eq!(val.date, NString::try_from("date").unwrap());
        assert_eq!(val.from.len(), 1);
        assert_eq!(val.sender, vec![]);
        assert_eq!(val.in_reply_to, NString(None));
        assert_eq!(val.message_id, NString::try_from("<id>").unwrap());
    }
}
