#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ppt_decoder::{MemoryStreams, PresentationDecoder};

#[derive(Arbitrary, Debug)]
struct Input {
    current_user: Vec<u8>,
    document: Vec<u8>,
}

// Fuzz target: full presentation decoding from two arbitrary streams.
//
// Catches bugs in:
// - Edit chain cycles and offsets outside the stream
// - Persist id resolution
// - Master dispatch and slide/notes list decoding
fuzz_target!(|input: Input| {
    let streams = MemoryStreams::presentation(input.current_user, input.document);
    let _ = PresentationDecoder::decode(&streams);
});
