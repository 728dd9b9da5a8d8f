#![no_main]

use libfuzzer_sys::fuzz_target;
use ppt_wire::{Cursor, HeaderSpec, Length, RecordHeader};

// Fuzz target: RecordHeader::read and HeaderSpec::check with arbitrary bytes.
//
// Catches bugs in:
// - ver/instance unpacking
// - Truncated header handling
// - Peek leaving the cursor where it was
fuzz_target!(|data: &[u8]| {
    const SPEC: HeaderSpec = HeaderSpec::atom("TextHeaderAtom", 0x0F9F, Length::Exact(4));

    let mut cursor = Cursor::new(data);
    let peeked = RecordHeader::peek(&mut cursor);
    assert_eq!(cursor.position(), 0);
    if let Ok(header) = RecordHeader::read(&mut cursor) {
        assert_eq!(peeked, Ok(header));
        assert!(header.version <= 0xF);
        assert!(header.instance <= 0xFFF);
        let _ = SPEC.check(&header, 0);
    }
});
