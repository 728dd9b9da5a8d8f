use ppt_records::name_of;
use ppt_wire::{
    Cause, Corrupted, Cursor, DecodeFn, Depth, HEADER_SIZE, Limits, RecordHeader, Variant,
    decode_any, decode_variant, decode_variant_at,
};
use serde::Serialize;

/// A record of any type, with its children when it is a container.
///
/// Built without consulting the catalog: containers (`recVer == 0xF`)
/// are descended into, atoms are skipped over. The same length, extent
/// and depth checks as catalog decoding apply, so a tree only comes back
/// for structurally sound input.
///
/// ```text
///   DocumentContainer (0x03E8) @0x0000 len 0x01A0
///   ├── DocumentAtom (0x03E9) @0x0008 len 0x0028
///   ├── DocumentTextInfoContainer (0x03F2) @0x0038 len 0x00C4
///   │   └── ...
///   └── EndDocumentAtom (0x03EA) @0x0198 len 0
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordNode {
    /// Offset of the record header in the stream.
    pub offset: usize,
    /// Catalog name, `"Unknown"` for unlisted types.
    pub name: &'static str,
    pub record_type: u16,
    pub version: u8,
    pub instance: u16,
    pub length: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RecordNode>,
}

impl RecordNode {
    fn decode(cursor: &mut Cursor<'_>, depth: Depth) -> Result<Self, Corrupted> {
        let offset = cursor.position();
        decode_any(cursor, depth, |body| {
            let header = body.header();
            let children = if header.is_container() {
                body.run_variant::<RecordNode>()?
            } else {
                body.read_remaining()?;
                Vec::new()
            };
            Ok(Self {
                offset,
                name: name_of(header.record_type),
                record_type: header.record_type,
                version: header.version,
                instance: header.instance,
                length: header.length,
                children,
            })
        })
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        self.version == ppt_wire::CONTAINER_VERSION
    }

    /// This record plus all of its descendants.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RecordNode::count).sum::<usize>()
    }

    /// Levels below this record; 0 for an atom or an empty container.
    #[must_use]
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }
}

fn decode_node(cursor: &mut Cursor<'_>, depth: Depth) -> Result<RecordNode, Corrupted> {
    RecordNode::decode(cursor, depth)
}

impl Variant for RecordNode {
    const NAME: &'static str = "Record";

    fn decoder_for(_header: &RecordHeader) -> Option<DecodeFn<Self>> {
        Some(decode_node)
    }
}

/// Build the tree of the record at `offset`.
///
/// # Errors
///
/// Any [`Corrupted`] raised by a header read, a child extent, a body
/// length, or the depth limit.
pub fn walk_records(buf: &[u8], offset: usize, limits: Limits) -> Result<RecordNode, Corrupted> {
    decode_variant_at(buf, offset, limits)
}

/// Build the trees of every top-level record in `buf`, front to back.
///
/// # Errors
///
/// As [`walk_records`], plus [`Cause::TruncatedChild`] when the stream
/// ends with fewer than eight bytes after the last record.
pub fn walk_stream(buf: &[u8], limits: Limits) -> Result<Vec<RecordNode>, Corrupted> {
    let mut cursor = Cursor::new(buf);
    let mut records = Vec::new();
    while cursor.remaining() > 0 {
        let remaining = cursor.remaining();
        if remaining < HEADER_SIZE {
            return Err(cursor.corrupted(Cause::TruncatedChild { remaining }));
        }
        records.push(decode_variant(&mut cursor, Depth::root(limits))?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppt_records::record_type::code;
    use ppt_wire::fixture::{Body, atom, container};

    fn text_header() -> Vec<u8> {
        atom(0, 0, code::TEXT_HEADER_ATOM, &Body::new().u32(1).build())
    }

    #[test]
    fn containers_are_descended_into() {
        let buf = container(
            code::SLIDE_LIST_WITH_TEXT,
            0,
            &[
                atom(0, 0, code::SLIDE_PERSIST_ATOM, &[0; 0x14]),
                text_header(),
                container(0x7777, 2, &[]),
            ],
        );
        let tree = walk_records(&buf, 0, Limits::default()).unwrap();
        assert_eq!(tree.name, "SlideListWithText");
        assert!(tree.is_container());
        assert_eq!(tree.children.len(), 3);
        assert_eq!(tree.children[1].name, "TextHeaderAtom");
        assert_eq!(tree.children[1].offset, 8 + 8 + 0x14);
        assert_eq!(tree.children[2].name, "Unknown");
        assert_eq!(tree.children[2].instance, 2);
        assert_eq!(tree.count(), 4);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn atom_body_is_not_interpreted() {
        // A body that would not decode as a TextHeaderAtom is still walked.
        let buf = atom(0, 0, code::TEXT_HEADER_ATOM, &[0xFF; 3]);
        let tree = walk_records(&buf, 0, Limits::default()).unwrap();
        assert_eq!(tree.length, 3);
        assert!(tree.children.is_empty());
    }

    #[test]
    fn truncated_atom_body() {
        let mut buf = atom(0, 0, code::TEXT_HEADER_ATOM, &[0; 4]);
        buf.truncate(10);
        let err = walk_records(&buf, 0, Limits::default()).unwrap_err();
        assert!(matches!(err.cause, Cause::UnexpectedEof { .. }));
    }

    #[test]
    fn depth_limit_applies() {
        let mut buf = atom(0, 0, 0x1111, &[]);
        for _ in 0..4 {
            buf = container(0x2222, 0, &[buf]);
        }
        assert!(walk_records(&buf, 0, Limits { max_depth: 4 }).is_ok());
        let err = walk_records(&buf, 0, Limits { max_depth: 3 }).unwrap_err();
        assert_eq!(err.cause, Cause::DepthExceeded { limit: 3 });
    }

    #[test]
    fn stream_with_trailing_garbage() {
        let mut buf = [text_header(), text_header()].concat();
        assert_eq!(walk_stream(&buf, Limits::default()).unwrap().len(), 2);

        buf.extend_from_slice(&[0; 3]);
        let err = walk_stream(&buf, Limits::default()).unwrap_err();
        assert_eq!(err.cause, Cause::TruncatedChild { remaining: 3 });
        assert_eq!(err.offset, 24);
    }

    #[test]
    fn serializes_without_empty_children() {
        let tree = walk_records(&text_header(), 0, Limits::default()).unwrap();
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["name"], "TextHeaderAtom");
        assert_eq!(json["record_type"], 0x0F9F);
        assert!(json.get("children").is_none());
    }
}
