//! Synthesized test data shared between the workspace test suites.
//!
//! Real font binaries are deliberately absent: every font used in tests is
//! assembled field by field with [`bebuffer::BeBuffer`], so a failing test
//! can point at the exact byte that matters.

pub mod bebuffer;
pub mod cmap;
pub mod font;
pub mod glyf;

pub use font::{
    bad_head_version_ttf, build_sfnt, cmap12_ttf, cmap6_ttf, otto_ttf, sample_ttf,
    sample_ttf_without, TestFont,
};
