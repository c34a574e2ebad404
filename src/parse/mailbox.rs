//! Parsers for mailbox-related data responses.

use abnf_core::streaming::{dquote, sp};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt, value},
    multi::many0,
    sequence::{delimited, preceded, terminated, tuple},
};

use crate::{
    decode::IMAPResult,
    extensions::{
        condstore::search_sort_mod_seq,
        quota::{quota_response, quotaroot_response},
    },
    parse::{
        core::{astring, nil, number, nz_number, quoted_char},
        flag::{flag_list, mbx_list_flags},
        keyword_end,
        status::status_att_list,
    },
    types::{
        core::QuotedChar,
        flag::FlagNameAttribute,
        mailbox::Mailbox,
        response::Data,
    },
};

/// `mailbox = "INBOX" / astring`
///
/// INBOX is case-insensitive. All case variants of INBOX (e.g., "iNbOx")
/// MUST be interpreted as INBOX not as an astring.
pub(crate) fn mailbox(input: &[u8]) -> IMAPResult<&[u8], Mailbox> {
    map(astring, Mailbox::from)(input)
}

/// ```abnf
/// mailbox-data = "FLAGS" SP flag-list /
///                "LIST" SP mailbox-list /
///                "LSUB" SP mailbox-list /
///                "XLIST" SP mailbox-list /
///                "SEARCH" *(SP nz-number) [SP "(" "MODSEQ" SP mod-sequence-value ")"] /
///                "SORT" *(SP nz-number) [SP "(" "MODSEQ" SP mod-sequence-value ")"] /
///                "STATUS" SP mailbox SP "(" [status-att-list] ")" /
///                number SP "EXISTS" /
///                number SP "RECENT"
/// ```
pub(crate) fn mailbox_data(input: &[u8]) -> IMAPResult<&[u8], Data> {
    alt((
        map(preceded(tag_no_case(b"FLAGS "), flag_list), Data::Flags),
        map(
            preceded(tag_no_case(b"LIST "), mailbox_list),
            |(items, delimiter, mailbox)| Data::List {
                items: items.unwrap_or_default(),
                mailbox,
                delimiter,
            },
        ),
        map(
            preceded(tag_no_case(b"LSUB "), mailbox_list),
            |(items, delimiter, mailbox)| Data::Lsub {
                items: items.unwrap_or_default(),
                mailbox,
                delimiter,
            },
        ),
        map(
            preceded(tag_no_case(b"XLIST "), mailbox_list),
            |(items, delimiter, mailbox)| Data::XList {
                items: items.unwrap_or_default(),
                mailbox,
                delimiter,
            },
        ),
        map(
            tuple((
                terminated(tag_no_case(b"SEARCH"), keyword_end),
                many0(preceded(sp, nz_number)),
                opt(preceded(sp, search_sort_mod_seq)),
            )),
            |(_, nums, modseq)| Data::Search(nums, modseq),
        ),
        map(
            tuple((
                terminated(tag_no_case(b"SORT"), keyword_end),
                many0(preceded(sp, nz_number)),
                opt(preceded(sp, search_sort_mod_seq)),
            )),
            |(_, nums, modseq)| Data::Sort(nums, modseq),
        ),
        map(
            tuple((
                tag_no_case(b"STATUS "),
                mailbox,
                delimited(tag(b" ("), opt(status_att_list), tag(b")")),
            )),
            |(_, mailbox, items)| Data::Status {
                mailbox,
                items: items.unwrap_or_default(),
            },
        ),
        map(terminated(number, tag_no_case(b" EXISTS")), Data::Exists),
        map(terminated(number, tag_no_case(b" RECENT")), Data::Recent),
        quotaroot_response,
        quota_response,
    ))(input)
}

/// `mailbox-list = "(" [mbx-list-flags] ")" SP
///                 (DQUOTE QUOTED-CHAR DQUOTE / nil) SP
///                 mailbox`
#[allow(clippy::type_complexity)]
pub(crate) fn mailbox_list(
    input: &[u8],
) -> IMAPResult<&[u8], (Option<Vec<FlagNameAttribute>>, Option<QuotedChar>, Mailbox)> {
    let mut parser = tuple((
        delimited(tag(b"("), opt(mbx_list_flags), tag(b")")),
        sp,
        alt((
            map(delimited(dquote, quoted_char, dquote), Option::Some),
            value(None, nil),
        )),
        sp,
        mailbox,
    ));

    let (remaining, (mbx_list_flags, _, maybe_delimiter, _, mailbox)) = parser(input)?;

    Ok((remaining, (mbx_list_flags, maybe_delimiter, mailbox)))
}
