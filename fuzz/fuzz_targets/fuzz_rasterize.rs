#![no_main]
//! Rasterize whatever outlines a hostile font yields; writes must stay
//! in bounds and the sweep must terminate.

use libfuzzer_sys::fuzz_target;
use sverta::raw::FontRef;

fuzz_target!(|data: &[u8]| {
    let Ok(font) = FontRef::new(data) else {
        return;
    };
    for codepoint in [0x41u32, 0x62, 0x4E00] {
        // small heights keep the fuzzer fast while still sweeping
        for height in [1u32, 7, 23] {
            let mask = sverta::rasterize_glyph(&font, codepoint, height);
            assert_eq!(mask.data.len(), mask.width * mask.height);
        }
    }
});
