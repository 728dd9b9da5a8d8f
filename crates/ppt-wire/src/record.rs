use crate::bits::BitFieldReader;
use crate::cursor::{Cursor, TextEncoding};
use crate::error::{Cause, Corrupted};
use crate::header::{HEADER_SIZE, HeaderSpec, Instances, RecordHeader};
use crate::validate;

/// Default ceiling on record nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Resource limits applied to a single decode.
///
/// The input is untrusted, and nesting depth is bounded only by what the
/// data declares, so recursion is capped and exceeding the cap fails fast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting level. The top-level record is level 0.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Nesting level of the record being decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Depth {
    level: usize,
    limit: usize,
}

impl Depth {
    #[must_use]
    pub fn root(limits: Limits) -> Self {
        Self {
            level: 0,
            limit: limits.max_depth,
        }
    }

    #[must_use]
    pub fn level(self) -> usize {
        self.level
    }

    /// One level deeper.
    ///
    /// # Errors
    ///
    /// Returns [`Cause::DepthExceeded`] past the configured limit.
    pub fn descend(self, offset: usize) -> Result<Self, Corrupted> {
        if self.level >= self.limit {
            return Err(Corrupted::new(
                offset,
                Cause::DepthExceeded { limit: self.limit },
            ));
        }
        Ok(Self {
            level: self.level + 1,
            limit: self.limit,
        })
    }
}

/// A catalog record: an atom or container with fixed header constants.
///
/// Implementors declare their header constants and decode their body from
/// a [`RecordReader`]. The header read, the header check, and the final
/// length check all happen in [`decode_record`], so a body decoder only
/// walks its fields and child slots in format order.
pub trait Record: Sized {
    const HEADER: HeaderSpec;

    /// Decode the body. The header has already been read and checked.
    ///
    /// # Errors
    ///
    /// Any [`Corrupted`] raised by a field, a child, or a validation.
    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted>;
}

/// A decoder selected at runtime from a peeked header.
pub type DecodeFn<T> = fn(&mut Cursor<'_>, Depth) -> Result<T, Corrupted>;

/// A polymorphic slot: several record shapes are legal and the peeked
/// header picks one.
///
/// ```text
///   peek header ──▶ decoder_for(&header) ──▶ Some(decode) ──▶ decode(cursor)
///                                        └─▶ None         ──▶ slot absent
/// ```
pub trait Variant: Sized {
    /// Name used in diagnostics when a mandatory slot doesn't match.
    const NAME: &'static str;

    fn decoder_for(header: &RecordHeader) -> Option<DecodeFn<Self>>;
}

/// Discriminator for a child slot: a record type and the instances the
/// slot takes.
///
/// Slots that share a record type are told apart by instance, for
/// example the begin and end condition runs of a time node, or the date,
/// header and footer strings of a headers/footers container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    record_type: Option<u16>,
    instance: Instances,
}

impl Match {
    /// Accept any header.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            record_type: None,
            instance: Instances::Any,
        }
    }

    /// Accept one record type with any instance.
    #[must_use]
    pub const fn record_type(record_type: u16) -> Self {
        Self {
            record_type: Some(record_type),
            instance: Instances::Any,
        }
    }

    /// Accept the record type and instances of a header spec.
    #[must_use]
    pub const fn spec(spec: &HeaderSpec) -> Self {
        Self {
            record_type: Some(spec.record_type),
            instance: spec.instance,
        }
    }

    #[must_use]
    pub const fn of<R: Record>() -> Self {
        Self::spec(&R::HEADER)
    }

    /// Narrow the slot to a single instance.
    #[must_use]
    pub const fn instance(mut self, instance: u16) -> Self {
        self.instance = Instances::Only(instance);
        self
    }

    #[must_use]
    pub const fn instances(mut self, instances: Instances) -> Self {
        self.instance = instances;
        self
    }

    #[must_use]
    pub fn accepts(&self, header: &RecordHeader) -> bool {
        self.record_type
            .is_none_or(|record_type| record_type == header.record_type)
            && self.instance.contains(header.instance)
    }
}

/// Decode one record of type `R` at the cursor.
///
/// ```text
///   offset ─▶ read header (8 bytes)
///             check against R::HEADER        ─▶ Corrupted on mismatch
///   start  ─▶ R::decode_body(...)            ─▶ fields and child slots
///   end    ─▶ position - start == recLen     ─▶ Corrupted otherwise
/// ```
///
/// # Errors
///
/// Any [`Corrupted`] from the header, the body, or the length check.
pub fn decode_record<R: Record>(cursor: &mut Cursor<'_>, depth: Depth) -> Result<R, Corrupted> {
    let offset = cursor.position();
    let header = RecordHeader::read(cursor)?;
    R::HEADER.check(&header, offset)?;
    let mut body = RecordReader::open(cursor, header, depth)?;
    let record = R::decode_body(&mut body)?;
    body.finish()?;
    Ok(record)
}

/// Decode a polymorphic record at the cursor.
///
/// # Errors
///
/// Returns [`Cause::UnexpectedRecord`] when no variant accepts the header,
/// plus anything the selected decoder raises.
pub fn decode_variant<V: Variant>(cursor: &mut Cursor<'_>, depth: Depth) -> Result<V, Corrupted> {
    let header = RecordHeader::peek(cursor)?;
    let decode = V::decoder_for(&header).ok_or_else(|| {
        cursor.corrupted(Cause::UnexpectedRecord {
            expected: V::NAME,
            record_type: header.record_type,
        })
    })?;
    decode(cursor, depth)
}

/// Decode one record of whatever type sits at the cursor.
///
/// The header is handed to `decode` unchecked; depth, child extents and
/// the final length check still apply. Generic walkers that don't know
/// the catalog go through here.
///
/// # Errors
///
/// Any [`Corrupted`] from the header read, `decode`, or the length check.
pub fn decode_any<T>(
    cursor: &mut Cursor<'_>,
    depth: Depth,
    decode: impl FnOnce(&mut RecordReader<'_, '_>) -> Result<T, Corrupted>,
) -> Result<T, Corrupted> {
    let header = RecordHeader::read(cursor)?;
    let mut body = RecordReader::open(cursor, header, depth)?;
    let value = decode(&mut body)?;
    body.finish()?;
    Ok(value)
}

/// Decode the top-level record of type `R` found at `offset` in `buf`.
///
/// # Errors
///
/// Returns [`Corrupted`] if `offset` is outside `buf` or the record
/// fails any check.
pub fn decode_at<R: Record>(buf: &[u8], offset: usize, limits: Limits) -> Result<R, Corrupted> {
    let mut cursor = Cursor::at(buf, offset)?;
    decode_record(&mut cursor, Depth::root(limits))
}

/// Decode the top-level polymorphic record found at `offset` in `buf`.
///
/// # Errors
///
/// As [`decode_at`] and [`decode_variant`].
pub fn decode_variant_at<V: Variant>(
    buf: &[u8],
    offset: usize,
    limits: Limits,
) -> Result<V, Corrupted> {
    let mut cursor = Cursor::at(buf, offset)?;
    decode_variant(&mut cursor, Depth::root(limits))
}

/// Ordered slot reader over one record body.
///
/// A container body is decoded slot by slot in catalog order. Each slot
/// kind maps to one method:
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────────────────────┐
/// │ Slot kind            │ Method                                       │
/// ├──────────────────────┼──────────────────────────────────────────────┤
/// │ mandatory            │ mandatory, mandatory_matching,               │
/// │                      │ mandatory_variant                            │
/// │ optional             │ optional, optional_matching, optional_variant│
/// │ homogeneous run      │ run, run_matching, run_variant               │
/// │ one-of group         │ exclusive (after the slots are decoded)      │
/// │ forward-compat skip  │ skip_unknown                                 │
/// └──────────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// Every optional slot and run goes through one lookahead step. Once the
/// position reaches the end of the body that step answers "absent"
/// without peeking, so every later optional slot is `None` and every
/// later run is empty. A mandatory slot after that point is `Corrupted`.
///
/// Atom bodies use the field readers instead (`read_u32`, `read_bits_u16`,
/// ...). All multi-byte fields in this format are little-endian.
pub struct RecordReader<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
    header: RecordHeader,
    start: usize,
    end: usize,
    depth: Depth,
}

impl<'c, 'a> RecordReader<'c, 'a> {
    fn open(
        cursor: &'c mut Cursor<'a>,
        header: RecordHeader,
        depth: Depth,
    ) -> Result<Self, Corrupted> {
        let start = cursor.position();
        let end = start.checked_add(header.length as usize).ok_or_else(|| {
            cursor.corrupted(Cause::OffsetOutOfBounds {
                target: start as u64 + u64::from(header.length),
                len: cursor.buffer().len(),
            })
        })?;
        Ok(Self {
            cursor,
            header,
            start,
            end,
            depth,
        })
    }

    fn finish(self) -> Result<(), Corrupted> {
        validate::body_length(&self.header, self.start, self.cursor.position())
    }

    #[must_use]
    pub fn header(&self) -> RecordHeader {
        self.header
    }

    /// Position right after this record's header.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// `start + recLen`.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Bytes left in this body.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.end.saturating_sub(self.cursor.position())
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor.position() >= self.end
    }

    #[must_use]
    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// Direct access to the underlying cursor.
    pub fn cursor(&mut self) -> &mut Cursor<'a> {
        &mut *self.cursor
    }

    /// Build a [`Corrupted`] error at the current position.
    #[must_use]
    pub fn corrupted(&self, cause: Cause) -> Corrupted {
        self.cursor.corrupted(cause)
    }

    /// Attach the current position to a field validation result.
    ///
    /// # Errors
    ///
    /// Returns the `Cause` of `result` wrapped as [`Corrupted`].
    pub fn check<T>(&self, result: Result<T, Cause>) -> Result<T, Corrupted> {
        result.map_err(|cause| self.corrupted(cause))
    }

    // ── Field readers ─────────────────────────────────────────────────────

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_u8(&mut self) -> Result<u8, Corrupted> {
        self.cursor.read_u8()
    }

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_u16(&mut self) -> Result<u16, Corrupted> {
        self.cursor.read_u16_le()
    }

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_i16(&mut self) -> Result<i16, Corrupted> {
        self.cursor.read_i16_le()
    }

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_u32(&mut self) -> Result<u32, Corrupted> {
        self.cursor.read_u32_le()
    }

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_i32(&mut self) -> Result<i32, Corrupted> {
        self.cursor.read_i32_le()
    }

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_u64(&mut self) -> Result<u64, Corrupted> {
        self.cursor.read_u64_le()
    }

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_f32(&mut self) -> Result<f32, Corrupted> {
        self.cursor.read_f32_le()
    }

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], Corrupted> {
        self.cursor.read_bytes(count)
    }

    /// Read everything between the position and the end of the body.
    ///
    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] if the declared body runs past the buffer.
    pub fn read_remaining(&mut self) -> Result<&'a [u8], Corrupted> {
        let count = self.remaining();
        self.cursor.read_bytes(count)
    }

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] or [`Cause::InvalidText`].
    pub fn read_string(
        &mut self,
        byte_count: usize,
        encoding: TextEncoding,
    ) -> Result<String, Corrupted> {
        self.cursor.read_fixed_string(byte_count, encoding)
    }

    /// Read a one-byte boolean that must be 0 or 1.
    ///
    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] or [`Cause::OutOfRange`].
    pub fn read_bool8(&mut self, field: &'static str) -> Result<bool, Corrupted> {
        let raw = self.cursor.read_u8()?;
        self.check(validate::bool8(field, raw))
    }

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_bits_u8(&mut self) -> Result<BitFieldReader, Corrupted> {
        self.cursor.read_bits_u8()
    }

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_bits_u16(&mut self) -> Result<BitFieldReader, Corrupted> {
        self.cursor.read_bits_u16()
    }

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_bits_u32(&mut self) -> Result<BitFieldReader, Corrupted> {
        self.cursor.read_bits_u32()
    }

    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn skip(&mut self, count: usize) -> Result<(), Corrupted> {
        self.cursor.skip(count)
    }

    // ── Child slots ───────────────────────────────────────────────────────

    /// `Ok(false)` once the body is exhausted.
    fn has_child(&self) -> Result<bool, Corrupted> {
        let position = self.cursor.position();
        if position >= self.end {
            return Ok(false);
        }
        let remaining = self.end - position;
        if remaining < HEADER_SIZE {
            return Err(self.corrupted(Cause::TruncatedChild { remaining }));
        }
        Ok(true)
    }

    /// The single lookahead step shared by every optional slot and run.
    fn next_header(&mut self) -> Result<Option<RecordHeader>, Corrupted> {
        if !self.has_child()? {
            return Ok(None);
        }
        RecordHeader::peek(&mut *self.cursor).map(Some)
    }

    fn check_child_extent(&self) -> Result<(), Corrupted> {
        let position = self.cursor.position();
        if position > self.end {
            return Err(self.corrupted(Cause::ChildOverrun {
                overrun: position - self.end,
            }));
        }
        Ok(())
    }

    fn child_with<T>(&mut self, decode: DecodeFn<T>) -> Result<T, Corrupted> {
        let depth = self.depth.descend(self.cursor.position())?;
        let value = decode(&mut *self.cursor, depth)?;
        self.check_child_extent()?;
        Ok(value)
    }

    fn child<R: Record>(&mut self) -> Result<R, Corrupted> {
        self.child_with(decode_record::<R>)
    }

    /// Decode a child that must be present.
    ///
    /// # Errors
    ///
    /// [`Cause::MissingRecord`] if the body is exhausted, plus anything
    /// the child raises (including a header mismatch when the next record
    /// is not an `R`).
    pub fn mandatory<R: Record>(&mut self) -> Result<R, Corrupted> {
        if !self.has_child()? {
            return Err(self.corrupted(Cause::MissingRecord {
                record: R::HEADER.name,
            }));
        }
        self.child()
    }

    /// Decode a child that must be present and match `slot`.
    ///
    /// # Errors
    ///
    /// [`Cause::MissingRecord`] if the body is exhausted,
    /// [`Cause::UnexpectedRecord`] if the next header doesn't match.
    pub fn mandatory_matching<R: Record>(&mut self, slot: Match) -> Result<R, Corrupted> {
        match self.next_header()? {
            Some(header) if slot.accepts(&header) => self.child(),
            Some(header) => Err(self.corrupted(Cause::UnexpectedRecord {
                expected: R::HEADER.name,
                record_type: header.record_type,
            })),
            None => Err(self.corrupted(Cause::MissingRecord {
                record: R::HEADER.name,
            })),
        }
    }

    /// Decode a mandatory polymorphic child.
    ///
    /// # Errors
    ///
    /// [`Cause::MissingRecord`] or [`Cause::UnexpectedRecord`], plus
    /// anything the selected decoder raises.
    pub fn mandatory_variant<V: Variant>(&mut self) -> Result<V, Corrupted> {
        match self.optional_variant()? {
            Some(value) => Ok(value),
            None => {
                let cause = match self.next_header()? {
                    Some(header) => Cause::UnexpectedRecord {
                        expected: V::NAME,
                        record_type: header.record_type,
                    },
                    None => Cause::MissingRecord { record: V::NAME },
                };
                Err(self.corrupted(cause))
            }
        }
    }

    /// Decode the next child if its header matches `R`'s type and
    /// instances; otherwise leave the slot absent without consuming bytes.
    ///
    /// # Errors
    ///
    /// Anything the child raises once selected.
    pub fn optional<R: Record>(&mut self) -> Result<Option<R>, Corrupted> {
        self.optional_matching(Match::of::<R>())
    }

    /// As [`optional`](Self::optional), with an explicit discriminator.
    ///
    /// # Errors
    ///
    /// Anything the child raises once selected.
    pub fn optional_matching<R: Record>(&mut self, slot: Match) -> Result<Option<R>, Corrupted> {
        match self.next_header()? {
            Some(header) if slot.accepts(&header) => self.child().map(Some),
            _ => Ok(None),
        }
    }

    /// Decode the next child if any variant of `V` accepts its header.
    ///
    /// # Errors
    ///
    /// Anything the selected decoder raises.
    pub fn optional_variant<V: Variant>(&mut self) -> Result<Option<V>, Corrupted> {
        let Some(header) = self.next_header()? else {
            return Ok(None);
        };
        match V::decoder_for(&header) {
            Some(decode) => self.child_with(decode).map(Some),
            None => Ok(None),
        }
    }

    /// Decode consecutive children of type `R` until the first mismatch
    /// or the end of the body.
    ///
    /// # Errors
    ///
    /// Anything a child raises.
    pub fn run<R: Record>(&mut self) -> Result<Vec<R>, Corrupted> {
        self.run_matching(Match::of::<R>())
    }

    /// As [`run`](Self::run), with an explicit discriminator. The run
    /// stops before the first header `slot` rejects, which stays the next
    /// thing the following slot sees.
    ///
    /// # Errors
    ///
    /// Anything a child raises.
    pub fn run_matching<R: Record>(&mut self, slot: Match) -> Result<Vec<R>, Corrupted> {
        let mut items = Vec::new();
        while let Some(item) = self.optional_matching(slot)? {
            items.push(item);
        }
        Ok(items)
    }

    /// Decode consecutive polymorphic children.
    ///
    /// # Errors
    ///
    /// Anything a child raises.
    pub fn run_variant<V: Variant>(&mut self) -> Result<Vec<V>, Corrupted> {
        let mut items = Vec::new();
        while let Some(item) = self.optional_variant()? {
            items.push(item);
        }
        Ok(items)
    }

    /// Consume and discard children that `recognized` rejects, stopping at
    /// the first recognized header or the end of the body.
    ///
    /// Returns the number of records skipped.
    ///
    /// # Errors
    ///
    /// [`Cause::UnexpectedEof`] or [`Cause::ChildOverrun`] when a skipped
    /// record's declared length doesn't fit.
    pub fn skip_unknown(
        &mut self,
        recognized: impl Fn(&RecordHeader) -> bool,
    ) -> Result<usize, Corrupted> {
        let mut skipped = 0;
        while let Some(header) = self.next_header()? {
            if recognized(&header) {
                break;
            }
            RecordHeader::read(&mut *self.cursor)?;
            self.cursor.skip(header.length as usize)?;
            self.check_child_extent()?;
            skipped += 1;
        }
        Ok(skipped)
    }

    /// Fail if more than one slot of a one-of group is present.
    ///
    /// # Errors
    ///
    /// [`Cause::MutuallyExclusive`].
    pub fn exclusive(&self, slots: &[(&'static str, bool)]) -> Result<(), Corrupted> {
        validate::exclusive(self.cursor.position(), slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{Body, atom, container};
    use crate::header::Length;

    const PARENT: u16 = 0x1000;
    const CHILD_A: u16 = 0x2000;
    const CHILD_B: u16 = 0x2001;

    #[derive(Debug, PartialEq)]
    struct Leaf(u32);

    impl Record for Leaf {
        const HEADER: HeaderSpec = HeaderSpec::atom("Leaf", CHILD_A, Length::Exact(4))
            .with_instances(Instances::Any);

        fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
            body.read_u32().map(Self)
        }
    }

    #[derive(Debug, PartialEq)]
    struct Other;

    impl Record for Other {
        const HEADER: HeaderSpec = HeaderSpec::atom("Other", CHILD_B, Length::Exact(0));

        fn decode_body(_body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
            Ok(Self)
        }
    }

    #[derive(Debug, PartialEq)]
    struct Parent {
        first: Option<Leaf>,
        rest: Vec<Leaf>,
        other: Option<Other>,
    }

    impl Record for Parent {
        const HEADER: HeaderSpec = HeaderSpec::container("Parent", PARENT);

        fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
            let first = body.optional_matching(Match::of::<Leaf>().instance(1))?;
            let rest = body.run_matching(Match::of::<Leaf>().instance(0))?;
            let other = body.optional()?;
            Ok(Self { first, rest, other })
        }
    }

    fn leaf(instance: u16, value: u32) -> Vec<u8> {
        atom(0, instance, CHILD_A, &Body::new().u32(value).build())
    }

    fn decode(buf: &[u8]) -> Result<Parent, Corrupted> {
        decode_at(buf, 0, Limits::default())
    }

    #[test]
    fn empty_container_leaves_every_slot_empty() {
        let buf = container(PARENT, 0, &[]);
        let mut cursor = Cursor::new(&buf);
        let parent: Parent = decode_record(&mut cursor, Depth::root(Limits::default())).unwrap();
        assert_eq!(
            parent,
            Parent {
                first: None,
                rest: vec![],
                other: None
            }
        );
        assert_eq!(cursor.peek_count(), 0);
    }

    #[test]
    fn instance_filters_slots() {
        let buf = container(PARENT, 0, &[leaf(1, 10), leaf(0, 20), leaf(0, 30)]);
        let parent = decode(&buf).unwrap();
        assert_eq!(parent.first, Some(Leaf(10)));
        assert_eq!(parent.rest, vec![Leaf(20), Leaf(30)]);
    }

    #[test]
    fn exhaustion_stops_lookahead() {
        // One child: the first slot consumes it, the run and the last
        // optional slot never peek.
        let buf = container(PARENT, 0, &[leaf(1, 10)]);
        let mut cursor = Cursor::new(&buf);
        let parent: Parent = decode_record(&mut cursor, Depth::root(Limits::default())).unwrap();
        assert_eq!(parent.first, Some(Leaf(10)));
        assert!(parent.rest.is_empty());
        assert!(parent.other.is_none());
        assert_eq!(cursor.peek_count(), 1);
    }

    #[test]
    fn unmatched_record_is_left_for_the_length_check() {
        // A record nobody claims leaves bytes unconsumed.
        let stray = atom(0, 0, 0x3000, &[]);
        let buf = container(PARENT, 0, &[stray]);
        let err = decode(&buf).unwrap_err();
        assert!(matches!(err.cause, Cause::LengthMismatch { declared: 8, consumed: 0 }));
    }

    #[test]
    fn trailing_bytes_too_short_for_a_header() {
        let mut buf = container(PARENT, 0, &[leaf(1, 1)]);
        // Grow the declared length by 3 and append 3 bytes.
        let length = u32::from_le_bytes(buf[4..8].try_into().unwrap()) + 3;
        buf[4..8].copy_from_slice(&length.to_le_bytes());
        buf.extend_from_slice(&[0, 0, 0]);
        let err = decode(&buf).unwrap_err();
        assert_eq!(err.cause, Cause::TruncatedChild { remaining: 3 });
    }

    #[test]
    fn child_overrunning_parent_is_corrupted() {
        // Parent declares 12 bytes, child declares 4 → 8 + 4 = 12 fits.
        // Shrink the parent to 10: the child ends 2 bytes past it.
        let mut buf = container(PARENT, 0, &[leaf(1, 1)]);
        buf[4..8].copy_from_slice(&10u32.to_le_bytes());
        let err = decode(&buf).unwrap_err();
        assert_eq!(err.cause, Cause::ChildOverrun { overrun: 2 });
    }

    #[test]
    fn depth_limit() {
        #[derive(Debug)]
        struct Nest(Option<Box<Nest>>);

        impl Record for Nest {
            const HEADER: HeaderSpec = HeaderSpec::container("Nest", PARENT);

            fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
                Ok(Self(body.optional::<Nest>()?.map(Box::new)))
            }
        }

        let mut buf = container(PARENT, 0, &[]);
        for _ in 0..4 {
            buf = container(PARENT, 0, &[buf]);
        }

        // Five levels: 0..=4.
        assert!(decode_at::<Nest>(&buf, 0, Limits { max_depth: 4 }).is_ok());
        let err = decode_at::<Nest>(&buf, 0, Limits { max_depth: 3 }).unwrap_err();
        assert_eq!(err.cause, Cause::DepthExceeded { limit: 3 });
    }

    #[test]
    fn skip_unknown_consumes_until_recognized() {
        struct Skipping {
            skipped: usize,
            leaf: Leaf,
        }

        impl Record for Skipping {
            const HEADER: HeaderSpec = HeaderSpec::container("Skipping", PARENT);

            fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
                let skipped = body.skip_unknown(|h| Match::of::<Leaf>().accepts(h))?;
                let leaf = body.mandatory()?;
                Ok(Self { skipped, leaf })
            }
        }

        let unknown = atom(0, 0, 0x7777, &[1, 2, 3]);
        let unknown_container = container(0x7778, 0, &[atom(0, 0, 0x7779, &[9])]);
        let buf = container(PARENT, 0, &[unknown, unknown_container, leaf(0, 5)]);
        let decoded = decode_at::<Skipping>(&buf, 0, Limits::default()).unwrap();
        assert_eq!(decoded.skipped, 2);
        assert_eq!(decoded.leaf, Leaf(5));
    }

    #[test]
    fn mandatory_on_exhausted_body() {
        #[derive(Debug)]
        struct Needs(#[allow(dead_code)] Leaf);

        impl Record for Needs {
            const HEADER: HeaderSpec = HeaderSpec::container("Needs", PARENT);

            fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
                body.mandatory().map(Self)
            }
        }

        let buf = container(PARENT, 0, &[]);
        let err = decode_at::<Needs>(&buf, 0, Limits::default()).unwrap_err();
        assert_eq!(err.cause, Cause::MissingRecord { record: "Leaf" });
    }

    #[test]
    fn variant_dispatch() {
        #[derive(Debug, PartialEq)]
        enum Either {
            Leaf(Leaf),
            Other(Other),
        }

        fn decode_leaf(cursor: &mut Cursor<'_>, depth: Depth) -> Result<Either, Corrupted> {
            decode_record(cursor, depth).map(Either::Leaf)
        }

        fn decode_other(cursor: &mut Cursor<'_>, depth: Depth) -> Result<Either, Corrupted> {
            decode_record(cursor, depth).map(Either::Other)
        }

        impl Variant for Either {
            const NAME: &'static str = "Either";

            fn decoder_for(header: &RecordHeader) -> Option<DecodeFn<Self>> {
                let decode: DecodeFn<Self> = match header.record_type {
                    CHILD_A => decode_leaf,
                    CHILD_B => decode_other,
                    _ => return None,
                };
                Some(decode)
            }
        }

        let buf = [leaf(0, 7), atom(0, 0, CHILD_B, &[])].concat();
        let mut cursor = Cursor::new(&buf);
        let depth = Depth::root(Limits::default());
        assert_eq!(
            decode_variant::<Either>(&mut cursor, depth).unwrap(),
            Either::Leaf(Leaf(7))
        );
        assert_eq!(
            decode_variant::<Either>(&mut cursor, depth).unwrap(),
            Either::Other(Other)
        );

        let unknown = atom(0, 0, 0x4444, &[]);
        let err = decode_variant_at::<Either>(&unknown, 0, Limits::default()).unwrap_err();
        assert_eq!(
            err.cause,
            Cause::UnexpectedRecord {
                expected: "Either",
                record_type: 0x4444
            }
        );
    }

    #[test]
    fn decode_any_skips_the_header_check_but_not_the_length() {
        let buf = container(0x7777, 5, &[leaf(0, 1)]);
        let mut cursor = Cursor::new(&buf);
        let (instance, children) = decode_any(
            &mut cursor,
            Depth::root(Limits::default()),
            |body| {
                let instance = body.header().instance;
                let children = body.run::<Leaf>()?;
                Ok((instance, children))
            },
        )
        .unwrap();
        assert_eq!(instance, 5);
        assert_eq!(children, vec![Leaf(1)]);

        let err = decode_any(
            &mut Cursor::new(&buf),
            Depth::root(Limits::default()),
            |_| Ok(()),
        )
        .unwrap_err();
        assert!(matches!(err.cause, Cause::LengthMismatch { consumed: 0, .. }));
    }
}
