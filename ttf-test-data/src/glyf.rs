//! simple glyph records

use crate::bebuffer::BeBuffer;

/// Encodes a simple glyph from `(x, y, on_curve)` vertices, one slice per
/// contour.
///
/// Flags are written one per point and coordinates as full 16-bit deltas;
/// the repeat and short-vector encodings are exercised by hand-built
/// records in the parser's own tests.
pub fn simple_glyph(bounds: (i16, i16, i16, i16), contours: &[&[(i16, i16, bool)]]) -> BeBuffer {
    let (x_min, y_min, x_max, y_max) = bounds;
    let mut buf = BeBuffer::new()
        .push(contours.len() as i16)
        .push(x_min)
        .push(y_min)
        .push(x_max)
        .push(y_max);
    let mut total = 0usize;
    for contour in contours {
        total += contour.len();
        buf = buf.push(total as u16 - 1);
    }
    buf = buf.push(0u16); // instructionLength
    for contour in contours {
        for (_, _, on_curve) in *contour {
            buf = buf.push(if *on_curve { 1u8 } else { 0u8 });
        }
    }
    let mut prev = 0i16;
    for contour in contours {
        for (x, _, _) in *contour {
            buf = buf.push(x.wrapping_sub(prev));
            prev = *x;
        }
    }
    let mut prev = 0i16;
    for contour in contours {
        for (_, y, _) in *contour {
            buf = buf.push(y.wrapping_sub(prev));
            prev = *y;
        }
    }
    buf
}
