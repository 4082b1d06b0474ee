#![no_main]
//! Throw arbitrary bytes at the loader; it must error, never fault.

use libfuzzer_sys::fuzz_target;
use read_ttf::FontRef;

fuzz_target!(|data: &[u8]| {
    let Ok(font) = FontRef::new(data) else {
        return;
    };
    // a font that loads must answer every query safely
    let _ = font.units_per_em();
    let _ = font.bounds();
    let _ = font.name().english_name(1);
    for codepoint in [0u32, 0x20, 0x41, 0x416, 0x10001, 0x10FFFF] {
        let _ = font.char_index(codepoint);
        let _ = font.outline_for(codepoint);
    }
    for gid in 0..font.num_glyphs().min(16) {
        let _ = font.outline(read_ttf::GlyphId::new(gid));
        let _ = font.advance_width(read_ttf::GlyphId::new(gid));
    }
});
