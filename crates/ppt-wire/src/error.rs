/// The single failure kind of the decoder: the input violates the format.
///
/// Every structural or value violation surfaces as `Corrupted`, whether it
/// is a header constant that doesn't match, a record whose body length
/// doesn't add up, an out-of-range field, or a buffer that ends mid-read.
/// The error is propagated unchanged from the innermost record to the
/// caller; there is no partial tree and no resynchronization.
///
/// `offset` and `cause` exist for diagnostics only. Callers are not
/// expected to branch on the cause.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────┐
/// │ Corrupted { offset, cause }                             │
/// │   cause:                                                │
/// │   ├── UnexpectedEof        ← primitive read ran out     │
/// │   ├── HeaderMismatch       ← recVer/recInstance/...     │
/// │   ├── LengthMismatch       ← consumed != recLen         │
/// │   ├── ChildOverrun         ← child passes parent end    │
/// │   ├── TruncatedChild       ← < 8 bytes left for header  │
/// │   ├── MissingRecord        ← mandatory slot absent      │
/// │   ├── UnexpectedRecord     ← no catalog entry matched   │
/// │   ├── MutuallyExclusive    ← two one-of slots present   │
/// │   ├── OutOfRange           ← numeric bound violated     │
/// │   ├── InvalidEnumValue     ← not a member of the enum   │
/// │   ├── InvalidText          ← bad UTF-16 sequence        │
/// │   ├── DepthExceeded        ← nesting ceiling reached    │
/// │   └── ... edit chain causes (persist ids, cycles)       │
/// └─────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("corrupted record data at offset {offset:#X}: {cause}")]
pub struct Corrupted {
    /// Absolute byte offset in the buffer where the violation was detected.
    pub offset: usize,
    /// What went wrong, for humans.
    pub cause: Cause,
}

impl Corrupted {
    #[must_use]
    pub fn new(offset: usize, cause: Cause) -> Self {
        Self { offset, cause }
    }
}

/// Diagnostic detail attached to a [`Corrupted`] error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Cause {
    /// A primitive read needed more bytes than the buffer holds.
    #[error("unexpected end of buffer: needed {needed} bytes, {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A header field did not match the record's expected constants.
    #[error("{record}: unexpected {field} {found:#06X}")]
    HeaderMismatch {
        record: &'static str,
        field: &'static str,
        found: u32,
    },

    /// The bytes consumed by a record body differ from its declared length.
    #[error("declared length {declared} but body consumed {consumed} bytes")]
    LengthMismatch { declared: u32, consumed: usize },

    /// A child record extends past the end of its parent container.
    #[error("child record overruns its container by {overrun} bytes")]
    ChildOverrun { overrun: usize },

    /// Fewer than eight bytes remain in a container, so no child header fits.
    #[error("{remaining} trailing bytes cannot hold a record header")]
    TruncatedChild { remaining: usize },

    /// A mandatory child slot was empty.
    #[error("required {record} record is missing")]
    MissingRecord { record: &'static str },

    /// The next record does not fit the current slot.
    #[error("unexpected record type {record_type:#06X} where {expected} was required")]
    UnexpectedRecord {
        expected: &'static str,
        record_type: u16,
    },

    /// Two slots of a one-of group were both present.
    #[error("{first} and {second} are mutually exclusive")]
    MutuallyExclusive {
        first: &'static str,
        second: &'static str,
    },

    /// A numeric field fell outside its legal bounds.
    #[error("{field} value {value} is out of range")]
    OutOfRange { field: &'static str, value: i64 },

    /// A field value is not a member of its enumeration.
    #[error("invalid {enum_name} value: {value:#X}")]
    InvalidEnumValue { enum_name: &'static str, value: u32 },

    /// A fixed-length string could not be decoded.
    #[error("invalid {encoding} text")]
    InvalidText { encoding: &'static str },

    /// Records are nested deeper than the configured ceiling.
    #[error("record nesting exceeds the limit of {limit} levels")]
    DepthExceeded { limit: usize },

    /// A persist id has no entry in the persist directory.
    #[error("persist id {persist_id} is not in the persist directory")]
    UnresolvedPersistId { persist_id: u32 },

    /// An offset points outside the stream it indexes.
    #[error("offset {target:#X} lies outside the {len}-byte stream")]
    OffsetOutOfBounds { target: u64, len: usize },

    /// The user edit chain loops back onto an edit already visited.
    #[error("user edit chain revisits offset {target:#X}")]
    EditCycle { target: u32 },

    /// The user edit chain is longer than the configured maximum.
    #[error("user edit chain exceeds {limit} edits")]
    TooManyEdits { limit: usize },

    /// A required stream is absent from the compound file.
    #[error("stream {name:?} not found")]
    MissingStream { name: &'static str },

    /// The document is encrypted; its persist objects cannot be parsed.
    #[error("encrypted document")]
    Encrypted,
}
