//! The IMAP ENABLE Extension (RFC 5161).
//!
//! Additional changes:
//!
//! ```abnf
//! capability    =/ "ENABLE"
//! response-data =/ "*" SP enable-data CRLF
//! ```

use abnf_core::streaming::sp;
use nom::{
    bytes::streaming::tag_no_case,
    multi::many0,
    sequence::{preceded, terminated, tuple},
};

use crate::{
    decode::IMAPResult,
    parse::{keyword_end, response::capability},
    types::response::Data,
};

/// `enable-data = "ENABLED" *(SP capability)`
pub(crate) fn enable_data(input: &[u8]) -> IMAPResult<&[u8], Data> {
    let mut parser = tuple((
        terminated(tag_no_case(b"ENABLED"), keyword_end),
        many0(preceded(sp, capability)),
    ));

    let (remaining, (_, capabilities)) = parser(input)?;

    Ok((remaining, Data::Enabled { capabilities }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::response::Capability;

    #[test]
    fn test_parse_enable_data() {
        let (rem, got) = enable_data(b"ENABLED CONDSTORE QRESYNC\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(
            got,
            Data::Enabled {
                capabilities: vec![Capability::CondStore, Capability::QResync],
            }
        );

        let (rem, got) = enable_data(b"ENABLED\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(
            got,
            Data::Enabled {
                capabilities: vec![],
            }
        );
    }
}
