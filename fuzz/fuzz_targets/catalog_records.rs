#![no_main]

use libfuzzer_sys::fuzz_target;
use ppt_records::{
    CurrentUserAtom, DocumentContainer, NotesContainer, PersistDirectoryAtom, SlideContainer,
    UserEditAtom,
};
use ppt_wire::{Limits, decode_at};

// Fuzz target: typed decoding of the top-level catalog records.
//
// Catches bugs in:
// - Slot lookahead and exhaustion
// - One-of groups and instance-discriminated slots
// - Field range and enum checks
// - Persist directory entry counts
fuzz_target!(|data: &[u8]| {
    let limits = Limits::default();
    let _ = decode_at::<DocumentContainer>(data, 0, limits);
    let _ = decode_at::<SlideContainer>(data, 0, limits);
    let _ = decode_at::<NotesContainer>(data, 0, limits);
    let _ = decode_at::<CurrentUserAtom>(data, 0, limits);
    let _ = decode_at::<UserEditAtom>(data, 0, limits);
    let _ = decode_at::<PersistDirectoryAtom>(data, 0, limits);
});
