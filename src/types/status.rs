//! Status-related types.

use std::num::NonZeroU32;

/// The currently defined status data items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusDataItemName {
    /// The number of messages in the mailbox.
    Messages,

    /// The number of messages with the \Recent flag set.
    Recent,

    /// The next unique identifier value of the mailbox.
    UidNext,

    /// The unique identifier validity value of the mailbox.
    UidValidity,

    /// The number of messages which do not have the \Seen flag set.
    Unseen,

    /// The number of messages with the \Deleted flag set.
    Deleted,

    /// The amount of storage space that can be reclaimed by expunging deleted messages.
    DeletedStorage,

    /// The highest mod-sequence value of all messages in the mailbox (RFC 7162).
    HighestModSeq,
}

/// A status data item with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusDataItem {
    /// The number of messages in the mailbox.
    Messages(u32),

    /// The number of messages with the \Recent flag set.
    Recent(u32),

    /// The next unique identifier value of the mailbox.
    UidNext(NonZeroU32),

    /// The unique identifier validity value of the mailbox.
    UidValidity(NonZeroU32),

    /// The number of messages which do not have the \Seen flag set.
    Unseen(u32),

    /// The number of messages with the \Deleted flag set.
    Deleted(u32),

    /// The amount of storage space that can be reclaimed by expunging deleted messages.
    DeletedStorage(u64),

    /// The highest mod-sequence value of all messages in the mailbox (RFC 7162).
    HighestModSeq(u64),
}
