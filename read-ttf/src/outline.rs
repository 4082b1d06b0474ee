//! Decoded glyph outlines.

use crate::types::{BoundingBox, Point};

/// One piece of a glyph contour, in font units.
///
/// TrueType outlines are built from quadratic Béziers and straight lines
/// only; the set is closed, so this is a plain sum type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutlineSegment {
    /// A quadratic Bézier curve.
    Quad {
        start: Point<i16>,
        control: Point<i16>,
        end: Point<i16>,
    },
    /// A straight line segment.
    Line { start: Point<i16>, end: Point<i16> },
}

impl OutlineSegment {
    /// The point where this segment begins.
    pub fn start(&self) -> Point<i16> {
        match self {
            Self::Quad { start, .. } | Self::Line { start, .. } => *start,
        }
    }

    /// The point where this segment ends.
    pub fn end(&self) -> Point<i16> {
        match self {
            Self::Quad { end, .. } | Self::Line { end, .. } => *end,
        }
    }
}

/// A decoded glyph outline: contour segments plus the glyph header's
/// bounding box.
///
/// Contours are concatenated; no explicit delimiter is stored because each
/// contour's segments form a closed loop by construction, the last segment
/// ending where the first began.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphOutline {
    pub segments: Vec<OutlineSegment>,
    pub bounds: BoundingBox<i16>,
}

impl GlyphOutline {
    /// An outline with no segments and a degenerate bounding box, used for
    /// empty glyphs (such as space) and for glyph flavors we do not decode.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Renders the outline as SVG path data, one `M` per segment.
    ///
    /// Debug aid: paste into a `<path d="...">` to eyeball an outline.
    pub fn svg_path_data(&self) -> String {
        use std::fmt::Write as _;
        let mut path = String::new();
        for segment in &self.segments {
            if !path.is_empty() {
                path.push(' ');
            }
            match segment {
                OutlineSegment::Quad {
                    start,
                    control,
                    end,
                } => {
                    let _ = write!(
                        path,
                        "M {} {} Q {} {} {} {}",
                        start.x, start.y, control.x, control.y, end.x, end.y
                    );
                }
                OutlineSegment::Line { start, end } => {
                    let _ = write!(path, "M {} {} L {} {}", start.x, start.y, end.x, end.y);
                }
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_path_data() {
        let outline = GlyphOutline {
            segments: vec![
                OutlineSegment::Line {
                    start: Point::new(0, 0),
                    end: Point::new(10, 0),
                },
                OutlineSegment::Quad {
                    start: Point::new(10, 0),
                    control: Point::new(10, 10),
                    end: Point::new(0, 0),
                },
            ],
            bounds: BoundingBox::new(0, 0, 10, 10),
        };
        assert_eq!(
            outline.svg_path_data(),
            "M 0 0 L 10 0 M 10 0 Q 10 10 0 0"
        );
    }

    #[test]
    fn empty_outline() {
        assert!(GlyphOutline::empty().is_empty());
        assert_eq!(GlyphOutline::empty().svg_path_data(), "");
    }
}
