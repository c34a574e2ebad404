//! Parsers for IMAP extension responses.
//!
//! One module per extension, each holding the parsers for the data and response codes
//! the extension adds to the base grammar.

pub mod acl;
pub mod condstore;
pub mod enable;
pub mod esearch;
pub mod id;
pub mod namespace;
pub mod quota;
pub mod uidplus;
