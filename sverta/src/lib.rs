//! Turning TrueType glyph outlines into grayscale alpha masks.
//!
//! This crate sits above the [`read-ttf`] parser: it consumes the outlines
//! that crate decodes and produces packed 8-bit coverage surfaces through
//! an analytic scanline rasterizer (adaptive Bézier flattening, an active
//! edge sweep, and exact signed trapezoid coverage per pixel).
//!
//! The rasterizer is stateless and purely synchronous: every call works in
//! its own transient buffers, so callers may rasterize from multiple
//! threads without coordination.
//!
//! # Example
//!
//! ```no_run
//! # let font_bytes: Vec<u8> = Vec::new();
//! use sverta::raw::FontRef;
//! let font = FontRef::new(&font_bytes).expect("failed to read font data");
//! let mask = sverta::rasterize_glyph(&font, 'g', 64);
//! std::fs::write("g.pgm", mask.to_pgm()).unwrap();
//! ```
//!
//! [`read-ttf`]: read_ttf

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod flatten;
mod raster;
mod surface;

pub use raster::rasterize;
pub use surface::GraySurface;

/// Public re-export of the parser crate.
pub extern crate read_ttf as raw;

use read_ttf::FontRef;

/// Rasterizes the glyph for a codepoint at the given pixel height.
///
/// The scale factor is `height_px / (ascent - descent)`, so a line of text
/// set at `height_px` fits the font's full vertical extent. Unmapped
/// codepoints render the missing glyph; fonts with degenerate vertical
/// metrics produce an empty surface.
pub fn rasterize_glyph(font: &FontRef, codepoint: impl Into<u32>, height_px: u32) -> GraySurface {
    let span = font.ascent() as f32 - font.descent() as f32;
    if span <= 0.0 {
        return GraySurface::blank(0, 0);
    }
    let scale = height_px as f32 / span;
    rasterize(&font.outline_for(codepoint), scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterize_glyph_end_to_end() {
        let bytes = ttf_test_data::sample_ttf();
        let font = FontRef::new(&bytes).unwrap();
        // ascent - descent = 1000, so 50px gives scale 0.05 and the
        // triangle's 1001-unit box becomes ceil(50.05) pixels
        let surface = rasterize_glyph(&font, 'A', 50);
        assert_eq!(surface.width, 51);
        assert_eq!(surface.height, 51);
        assert!(surface.data.iter().any(|&pixel| pixel == 0));
    }

    #[test]
    fn empty_glyph_rasterizes_blank() {
        let bytes = ttf_test_data::sample_ttf();
        let font = FontRef::new(&bytes).unwrap();
        // 'D' is the glyph with coinciding loca entries
        let surface = rasterize_glyph(&font, 'D', 64);
        assert!(surface.data.iter().all(|&pixel| pixel == 255));
    }

    #[test]
    fn surfaces_grow_with_pixel_height() {
        let bytes = ttf_test_data::sample_ttf();
        let font = FontRef::new(&bytes).unwrap();
        let mut last = (0, 0);
        for height in [8u32, 16, 32, 64, 128] {
            let surface = rasterize_glyph(&font, 'B', height);
            assert!(surface.width >= last.0 && surface.height >= last.1);
            last = (surface.width, surface.height);
        }
    }
}
