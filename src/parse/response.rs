//! Parsers for the response entry points.

use std::borrow::Cow;

#[cfg(any(feature = "quirk_empty_continue_req", feature = "quirk_missing_text"))]
use abnf_core::streaming::crlf;
use abnf_core::streaming::sp;
#[cfg(any(feature = "quirk_empty_continue_req", feature = "quirk_missing_text"))]
use nom::combinator::peek;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case, take_while},
    combinator::{map, opt, value},
    error::ErrorKind,
    multi::separated_list1,
    sequence::{delimited, preceded, terminated, tuple},
};

use crate::{
    decode::{IMAPErrorKind, IMAPParseError, IMAPResult},
    extensions::{
        acl::acl_data,
        condstore::mod_sequence_value,
        enable::enable_data,
        esearch::esearch_response,
        id::id_response,
        namespace::namespace_response,
        uidplus::{resp_code_apnd, resp_code_copy},
    },
    parse::{
        core::{atom, charset, number, nz_number, tag_imap, text},
        fetch::msg_att,
        flag::flag_perm,
        mailbox::mailbox_data,
        response_end,
    },
    types::{
        core::{Text, Vec1},
        response::{Capability, Code, CodeOther, Continue, Data, Response, Status, UnparsedData},
    },
};

/// `response = continue-req / response-data / response-done`
///
/// The first byte decides: `+` is a continuation request, `*` untagged data, anything
/// else a tagged status response.
pub(crate) fn response(input: &[u8]) -> IMAPResult<&[u8], Response> {
    match input.first() {
        None => Err(nom::Err::Incomplete(nom::Needed::new(1))),
        Some(b'+') => map(continue_req, Response::Continue)(input),
        Some(b'*') => response_data(input),
        Some(_) => map(response_tagged, Response::Status)(input),
    }
}

/// `continue-req = "+" SP resp-text CRLF`
///
/// Empty text is permitted (`+ \r\n`). Under `quirk_empty_continue_req`, the space
/// itself may be missing (`+\r\n`).
pub(crate) fn continue_req(input: &[u8]) -> IMAPResult<&[u8], Continue> {
    let (remaining, _) = tag(b"+")(input)?;
    let (remaining, space) = opt(sp)(remaining)?;

    if space.is_none() {
        #[cfg(feature = "quirk_empty_continue_req")]
        {
            let (remaining, _) = peek(crlf)(remaining)?;
            let (remaining, _) = response_end(remaining)?;

            log::warn!("Accepted continuation request without the required space");

            return Ok((
                remaining,
                Continue {
                    code: None,
                    text: Text::unvalidated(""),
                },
            ));
        }

        #[cfg(not(feature = "quirk_empty_continue_req"))]
        return Err(nom::Err::Error(IMAPParseError {
            input: remaining,
            kind: IMAPErrorKind::Nom(ErrorKind::Char),
        }));
    }

    let (remaining, (code, text)) = resp_text(remaining)?;
    let (remaining, _) = response_end(remaining)?;

    Ok((remaining, Continue { code, text }))
}

/// ```abnf
/// response-data = "*" SP (
///                    resp-cond-state /
///                    resp-cond-bye /
///                    "PREAUTH" SP resp-text /
///                    mailbox-data /
///                    message-data /
///                    capability-data /
///                    enable-data /
///                    esearch-response /
///                    namespace-response /
///                    acl-data /
///                    id-response /
///                    ignored-data
///                  ) CRLF
/// ```
///
/// `ignored-data` is the catch-all for labels this crate has no structural parser for.
pub(crate) fn response_data(input: &[u8]) -> IMAPResult<&[u8], Response> {
    delimited(
        tag(b"* "),
        alt((
            map(resp_cond_state, |(kind, code, text)| {
                Response::Status(match kind {
                    StatusKind::Ok => Status::Ok {
                        tag: None,
                        code,
                        text,
                    },
                    StatusKind::No => Status::No {
                        tag: None,
                        code,
                        text,
                    },
                    StatusKind::Bad => Status::Bad {
                        tag: None,
                        code,
                        text,
                    },
                })
            }),
            map(resp_cond_bye, |(code, text)| {
                Response::Status(Status::Bye { code, text })
            }),
            map(
                preceded(tag_no_case(b"PREAUTH "), resp_text),
                |(code, text)| Response::Status(Status::PreAuth { code, text }),
            ),
            map(mailbox_data, Response::Data),
            map(message_data, Response::Data),
            map(capability_data, |caps| {
                Response::Data(Data::Capability(caps))
            }),
            map(enable_data, Response::Data),
            map(esearch_response, Response::Data),
            map(namespace_response, Response::Data),
            map(acl_data, Response::Data),
            map(id_response, |parameters| {
                Response::Data(Data::Id { parameters })
            }),
            ignored_data,
        )),
        response_end,
    )(input)
}

#[derive(Clone, Copy)]
enum StatusKind {
    Ok,
    No,
    Bad,
}

/// `resp-cond-state = ("OK" / "NO" / "BAD") SP resp-text`
///
/// Status condition
#[allow(clippy::type_complexity)]
fn resp_cond_state(input: &[u8]) -> IMAPResult<&[u8], (StatusKind, Option<Code>, Text)> {
    let mut parser = tuple((
        alt((
            value(StatusKind::Ok, tag_no_case("OK ")),
            value(StatusKind::No, tag_no_case("NO ")),
            value(StatusKind::Bad, tag_no_case("BAD ")),
        )),
        resp_text,
    ));

    let (remaining, (kind, (maybe_code, text))) = parser(input)?;

    Ok((remaining, (kind, maybe_code, text)))
}

/// `resp-cond-bye = "BYE" SP resp-text`
fn resp_cond_bye(input: &[u8]) -> IMAPResult<&[u8], (Option<Code>, Text)> {
    preceded(tag_no_case(b"BYE "), resp_text)(input)
}

/// `response-tagged = tag SP resp-cond-state CRLF`
///
/// A condition label outside OK/NO/BAD fails with [`IMAPErrorKind::InvalidStatus`]: the
/// response is syntactically tagged, but its condition is not in the allowed set.
pub(crate) fn response_tagged(input: &[u8]) -> IMAPResult<&[u8], Status> {
    let (remaining, (tag, _)) = tuple((tag_imap, sp))(input)?;

    let (remaining, (kind, code, text)) = match resp_cond_state(remaining) {
        Ok(ok) => ok,
        Err(err @ nom::Err::Incomplete(_)) => return Err(err),
        Err(_) => {
            return Err(nom::Err::Failure(IMAPParseError {
                input: remaining,
                kind: IMAPErrorKind::InvalidStatus,
            }))
        }
    };

    let (remaining, _) = response_end(remaining)?;

    let tag = Some(tag);

    Ok((
        remaining,
        match kind {
            StatusKind::Ok => Status::Ok { tag, code, text },
            StatusKind::No => Status::No { tag, code, text },
            StatusKind::Bad => Status::Bad { tag, code, text },
        },
    ))
}

/// `message-data = nz-number SP ("EXPUNGE" / ("FETCH" SP msg-att))`
pub(crate) fn message_data(input: &[u8]) -> IMAPResult<&[u8], Data> {
    let (remaining, seq) = terminated(nz_number, sp)(input)?;

    alt((
        map(tag_no_case(b"EXPUNGE"), move |_| Data::Expunge(seq)),
        map(preceded(tag_no_case(b"FETCH "), msg_att), move |items| {
            Data::Fetch { seq, items }
        }),
    ))(remaining)
}

/// `resp-text = ["[" resp-text-code "]" SP] text`
pub(crate) fn resp_text(input: &[u8]) -> IMAPResult<&[u8], (Option<Code>, Text)> {
    // When the text starts with "[", we insist on parsing a code.
    // Otherwise, a broken code could be interpreted as text.
    let (_, start) = opt(tag(b"["))(input)?;

    if start.is_some() {
        tuple((
            preceded(
                tag(b"["),
                map(
                    alt((
                        terminated(resp_text_code, tag(b"]")),
                        map(
                            terminated(
                                take_while(|b: u8| b != b']' && b != b'\r' && b != b'\n'),
                                tag(b"]"),
                            ),
                            |bytes: &[u8]| Code::Other(CodeOther::unvalidated(bytes)),
                        ),
                    )),
                    Some,
                ),
            ),
            #[cfg(not(feature = "quirk_missing_text"))]
            preceded(sp, text),
            #[cfg(feature = "quirk_missing_text")]
            alt((
                preceded(sp, text),
                map(peek(crlf), |_| {
                    log::warn!("Rectified missing `text` to \"\"");

                    Text::unvalidated("")
                }),
            )),
        ))(input)
    } else {
        map(text, |text| (None, text))(input)
    }
}

/// ```abnf
/// resp-text-code = "ALERT" /
///                  "BADCHARSET" [SP "(" charset *(SP charset) ")" ] /
///                  capability-data /
///                  "PARSE" /
///                  "PERMANENTFLAGS" SP "(" [flag-perm *(SP flag-perm)] ")" /
///                  "READ-ONLY" /
///                  "READ-WRITE" /
///                  "TRYCREATE" /
///                  "UIDNEXT" SP nz-number /
///                  "UIDVALIDITY" SP nz-number /
///                  "UNSEEN" SP nz-number /
///                  resp-code-apnd /      ; RFC 4315
///                  resp-code-copy /      ; RFC 4315
///                  "UIDNOTSTICKY" /      ; RFC 4315
///                  "NOMODSEQ" /          ; RFC 7162
///                  "HIGHESTMODSEQ" SP mod-sequence-value / ; RFC 7162
///                  atom [SP 1*<any TEXT-CHAR except "]">]
/// ```
///
/// The final fallback (an unknown or malformed code) is handled by the caller,
/// [`resp_text`], which captures the bracketed bytes verbatim.
///
/// Note: See errata id: 261
pub(crate) fn resp_text_code(input: &[u8]) -> IMAPResult<&[u8], Code> {
    alt((
        value(Code::Alert, tag_no_case(b"ALERT")),
        map(
            preceded(
                tag_no_case(b"BADCHARSET"),
                opt(delimited(
                    tag(b" ("),
                    separated_list1(sp, charset),
                    tag(b")"),
                )),
            ),
            |maybe_charsets| Code::BadCharset {
                allowed: maybe_charsets.unwrap_or_default(),
            },
        ),
        map(capability_data, Code::Capability),
        value(Code::Parse, tag_no_case(b"PARSE")),
        map(
            preceded(
                tag_no_case(b"PERMANENTFLAGS "),
                delimited(
                    tag(b"("),
                    map(opt(separated_list1(sp, flag_perm)), |maybe_flags| {
                        maybe_flags.unwrap_or_default()
                    }),
                    tag(b")"),
                ),
            ),
            Code::PermanentFlags,
        ),
        value(Code::ReadOnly, tag_no_case(b"READ-ONLY")),
        value(Code::ReadWrite, tag_no_case(b"READ-WRITE")),
        value(Code::TryCreate, tag_no_case(b"TRYCREATE")),
        map(preceded(tag_no_case(b"UIDNEXT "), nz_number), Code::UidNext),
        map(
            preceded(tag_no_case(b"UIDVALIDITY "), nz_number),
            Code::UidValidity,
        ),
        map(preceded(tag_no_case(b"UNSEEN "), nz_number), Code::Unseen),
        resp_code_apnd,
        resp_code_copy,
        value(Code::UidNotSticky, tag_no_case(b"UIDNOTSTICKY")),
        value(Code::NoModSeq, tag_no_case(b"NOMODSEQ")),
        map(
            preceded(tag_no_case(b"HIGHESTMODSEQ "), mod_sequence_value),
            Code::HighestModSeq,
        ),
    ))(input)
}

/// `capability-data = "CAPABILITY" *(SP capability) SP "IMAP4rev1" *(SP capability)`
///
/// Simplified:
///
/// `capability-data = "CAPABILITY" 1*(SP capability)`
pub(crate) fn capability_data(input: &[u8]) -> IMAPResult<&[u8], Vec1<Capability>> {
    map(
        preceded(tag_no_case("CAPABILITY "), separated_list1(sp, capability)),
        Vec1::unvalidated,
    )(input)
}

/// `capability = ("AUTH=" auth-type) / atom`
pub(crate) fn capability(input: &[u8]) -> IMAPResult<&[u8], Capability> {
    map(atom, Capability::from)(input)
}

/// An untagged response whose label is outside the known set.
///
/// `ignored-data = [number SP] atom [SP 1*<any CHAR except CR/LF>]`
///
/// The payload is kept verbatim, e.g. `* 99 NOOP` yields the name `NOOP` with the number
/// 99 and empty text. Known labels never match here; their payload has to parse.
fn ignored_data(input: &[u8]) -> IMAPResult<&[u8], Response> {
    let (remaining, (number, name)) = tuple((opt(terminated(number, sp)), atom))(input)?;

    if is_known_label(name.as_ref()) {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::Nom(ErrorKind::Verify),
        }));
    }

    let (remaining, text) = opt(preceded(
        sp,
        take_while(|b: u8| b != b'\r' && b != b'\n'),
    ))(remaining)?;

    Ok((
        remaining,
        Response::Ignored {
            name,
            data: UnparsedData {
                number,
                text: Cow::Borrowed(text.unwrap_or_default()),
            },
        },
    ))
}

/// Labels with a structural parser somewhere above.
fn is_known_label(label: &str) -> bool {
    [
        "OK",
        "NO",
        "BAD",
        "BYE",
        "PREAUTH",
        "FLAGS",
        "LIST",
        "LSUB",
        "XLIST",
        "SEARCH",
        "SORT",
        "ESEARCH",
        "STATUS",
        "EXISTS",
        "RECENT",
        "EXPUNGE",
        "FETCH",
        "CAPABILITY",
        "ENABLED",
        "NAMESPACE",
        "QUOTA",
        "QUOTAROOT",
        "ACL",
        "ID",
    ]
    .iter()
    .any(|known| label.eq_ignore_ascii_case(known))
}
