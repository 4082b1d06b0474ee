//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

use std::ops::Range;

use crate::font_data::FontData;
use crate::outline::{GlyphOutline, OutlineSegment};
use crate::read::ReadError;
use crate::types::{BoundingBox, Point, Tag};

/// 'glyf'
pub const TAG: Tag = Tag::new(b"glyf");

/// Flags describing how one point of a simple glyph is encoded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleGlyphFlags(u8);

impl SimpleGlyphFlags {
    pub const ON_CURVE_POINT: Self = Self(0x01);
    pub const X_SHORT_VECTOR: Self = Self(0x02);
    pub const Y_SHORT_VECTOR: Self = Self(0x04);
    pub const REPEAT_FLAG: Self = Self(0x08);
    /// For a short x: the delta is positive. For a full x: the coordinate
    /// repeats the previous one and no bytes are consumed.
    pub const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR: Self = Self(0x10);
    /// As above, applied to y.
    pub const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR: Self = Self(0x20);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_on_curve(self) -> bool {
        self.contains(Self::ON_CURVE_POINT)
    }
}

impl crate::types::Scalar for SimpleGlyphFlags {
    type Raw = [u8; 1];

    fn to_raw(self) -> Self::Raw {
        [self.0]
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Self(raw[0])
    }
}

/// The glyph outline table.
///
/// Individual glyph records are located by byte ranges resolved through
/// `loca`; the table itself has no internal structure to validate up front.
#[derive(Clone)]
pub struct Glyf<'a> {
    data: FontData<'a>,
}

impl<'a> Glyf<'a> {
    pub fn new(data: FontData<'a>) -> Self {
        Glyf { data }
    }

    /// Decodes the glyph record in the given byte range into an outline.
    pub fn outline(&self, range: Range<usize>) -> Result<GlyphOutline, ReadError> {
        let data = self.data.slice(range).ok_or(ReadError::OutOfBounds)?;
        read_glyph(data)
    }
}

fn read_glyph(data: FontData) -> Result<GlyphOutline, ReadError> {
    let mut cursor = data.cursor();
    let number_of_contours: i16 = cursor.read()?;
    let x_min: i16 = cursor.read()?;
    let y_min: i16 = cursor.read()?;
    let x_max: i16 = cursor.read()?;
    let y_max: i16 = cursor.read()?;
    let bounds = BoundingBox::new(x_min, y_min, x_max, y_max);
    if number_of_contours < 0 {
        // compound glyph: component resolution is out of scope, so the
        // outline stays empty but the header box is preserved
        return Ok(GlyphOutline {
            segments: Vec::new(),
            bounds,
        });
    }

    let n_contours = number_of_contours as usize;
    let mut end_pts = Vec::with_capacity(n_contours);
    for _ in 0..n_contours {
        end_pts.push(cursor.read::<u16>()?);
    }
    let n_points = end_pts.last().map(|last| *last as usize + 1).unwrap_or(0);
    let instruction_len: u16 = cursor.read()?;
    cursor.advance_by(instruction_len as usize);

    // flags, run length encoded
    let mut flags = Vec::with_capacity(n_points);
    while flags.len() < n_points {
        let flag: SimpleGlyphFlags = cursor.read()?;
        flags.push(flag);
        if flag.contains(SimpleGlyphFlags::REPEAT_FLAG) {
            let count = (cursor.read::<u8>()? as usize).min(n_points - flags.len());
            for _ in 0..count {
                flags.push(flag);
            }
        }
    }

    // x coordinates then y coordinates, each a stream of cumulative deltas
    let mut points = vec![Point::<i16>::default(); n_points];
    let mut x = 0i16;
    for (flag, point) in flags.iter().zip(points.iter_mut()) {
        let delta = if flag.contains(SimpleGlyphFlags::X_SHORT_VECTOR) {
            let value = cursor.read::<u8>()? as i16;
            if flag.contains(SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR) {
                value
            } else {
                -value
            }
        } else if flag.contains(SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR) {
            0
        } else {
            cursor.read::<i16>()?
        };
        x = x.wrapping_add(delta);
        point.x = x;
    }
    let mut y = 0i16;
    for (flag, point) in flags.iter().zip(points.iter_mut()) {
        let delta = if flag.contains(SimpleGlyphFlags::Y_SHORT_VECTOR) {
            let value = cursor.read::<u8>()? as i16;
            if flag.contains(SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR) {
                value
            } else {
                -value
            }
        } else if flag.contains(SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR) {
            0
        } else {
            cursor.read::<i16>()?
        };
        y = y.wrapping_add(delta);
        point.y = y;
    }

    let mut segments = Vec::new();
    let mut start = 0usize;
    for end in end_pts {
        let end = end as usize;
        if end < start || end >= n_points {
            // contour end points must be ascending; bail out of the rest
            break;
        }
        contour_to_segments(&points[start..=end], &flags[start..=end], &mut segments);
        start = end + 1;
    }
    Ok(GlyphOutline { segments, bounds })
}

/// Emits the segments of one closed contour.
///
/// On-curve points are anchors; off-curve points are quadratic controls,
/// and two consecutive controls imply an on-curve anchor at their midpoint.
/// The walk starts from a real anchor (synthesizing one between the last
/// and first points when the contour opens off-curve) and always closes
/// back to it, so the emitted segments form a loop by construction.
fn contour_to_segments(
    points: &[Point<i16>],
    flags: &[SimpleGlyphFlags],
    segments: &mut Vec<OutlineSegment>,
) {
    let n = points.len();
    if n == 0 {
        return;
    }
    let (anchor, walk) = if flags[0].is_on_curve() {
        (points[0], 1..n)
    } else if flags[n - 1].is_on_curve() {
        (points[n - 1], 0..n - 1)
    } else {
        (points[n - 1].midpoint(points[0]), 0..n)
    };

    let mut prev = anchor;
    let mut pending: Option<Point<i16>> = None;
    for i in walk {
        let point = points[i];
        if flags[i].is_on_curve() {
            match pending.take() {
                Some(control) => segments.push(OutlineSegment::Quad {
                    start: prev,
                    control,
                    end: point,
                }),
                None => segments.push(OutlineSegment::Line {
                    start: prev,
                    end: point,
                }),
            }
            prev = point;
        } else if let Some(control) = pending.replace(point) {
            let mid = control.midpoint(point);
            segments.push(OutlineSegment::Quad {
                start: prev,
                control,
                end: mid,
            });
            prev = mid;
        }
    }
    match pending {
        Some(control) => segments.push(OutlineSegment::Quad {
            start: prev,
            control,
            end: anchor,
        }),
        None if prev != anchor => segments.push(OutlineSegment::Line {
            start: prev,
            end: anchor,
        }),
        None => {}
    }
}
