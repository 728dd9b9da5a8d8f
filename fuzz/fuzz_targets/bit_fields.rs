#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ppt_wire::BitFieldReader;

#[derive(Arbitrary, Debug)]
struct Input {
    word: u32,
    widths: Vec<u8>,
}

// Fuzz target: BitFieldReader splits of a 32-bit word.
//
// Every split that stays within the word must consume exactly 32 bits
// and reassemble to the original value.
fuzz_target!(|input: Input| {
    let mut bits = BitFieldReader::from_u32(input.word);
    let mut rebuilt = 0u64;
    let mut shift = 0u32;
    for width in input.widths {
        let width = u32::from(width % 32) + 1;
        if width > bits.remaining_width() {
            break;
        }
        rebuilt |= u64::from(bits.read_bits(width)) << shift;
        shift += width;
    }
    let left = bits.remaining_width();
    let rest = bits.read_remaining_bits();
    if left > 0 {
        rebuilt |= u64::from(rest) << shift;
    }
    assert_eq!(shift + left, 32);
    assert_eq!(rebuilt, u64::from(input.word));
});
