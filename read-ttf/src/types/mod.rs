//! Scalar and geometry types shared across the crate.

mod bbox;
mod glyph_id;
mod point;
mod scalar;
mod tag;

pub use bbox::BoundingBox;
pub use glyph_id::GlyphId;
pub use point::Point;
pub use scalar::Scalar;
pub use tag::Tag;
