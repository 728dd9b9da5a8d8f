#![no_main]

use libfuzzer_sys::fuzz_target;
use ppt_wire::Limits;

// Fuzz target: catalog-free record walking.
//
// Catches bugs in:
// - Child extent checks against the parent length
// - Trailing bytes too short for a header
// - Depth limiting on deeply nested containers
fuzz_target!(|data: &[u8]| {
    if let Ok(records) = ppt_decoder::walk_stream(data, Limits::default()) {
        for record in &records {
            assert!(record.offset < data.len());
            assert!(record.height() <= Limits::default().max_depth);
        }
    }
});
