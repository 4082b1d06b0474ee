//! Adaptive flattening of quadratic Béziers.

use read_ttf::Point;

/// Curve frames the subdivision stack can hold: 16 frames of three points
/// each, enough for 15 levels of subdivision. The stack lives on the call
/// frame; flattening never allocates.
const STACK_CURVES: usize = 16;

/// Flattens one quadratic into line segments fed to `emit`.
///
/// A curve whose control polygon is no longer than `tolerance` is emitted
/// as the two legs of its control polygon; longer curves are split at the
/// midpoint and both halves pushed. The length test compares squared
/// lengths, trading exactness for skipping the square root, which is fine
/// at the tolerances glyph rendering uses. When the stack is full the
/// curve is emitted at its current depth rather than subdivided further.
pub(crate) fn flatten_quad(
    p0: Point<f32>,
    p1: Point<f32>,
    p2: Point<f32>,
    tolerance: f32,
    mut emit: impl FnMut(Point<f32>, Point<f32>),
) {
    let tolerance_sq = tolerance * tolerance;
    let mut stack = [[Point::new(0.0, 0.0); 3]; STACK_CURVES];
    stack[0] = [p0, p1, p2];
    let mut depth = 1usize;
    while depth > 0 {
        depth -= 1;
        let [p0, p1, p2] = stack[depth];
        let length_sq = dist_sq(p0, p1) + dist_sq(p1, p2);
        if length_sq > tolerance_sq && depth + 2 <= STACK_CURVES {
            let m01 = midpoint(p0, p1);
            let m12 = midpoint(p1, p2);
            let m = midpoint(m01, m12);
            // right half first so the left half pops next
            stack[depth] = [m, m12, p2];
            stack[depth + 1] = [p0, m01, m];
            depth += 2;
        } else {
            emit(p0, p1);
            emit(p1, p2);
        }
    }
}

fn midpoint(a: Point<f32>, b: Point<f32>) -> Point<f32> {
    Point::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

fn dist_sq(a: Point<f32>, b: Point<f32>) -> f32 {
    let d = b - a;
    d.x * d.x + d.y * d.y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(p0: Point<f32>, p1: Point<f32>, p2: Point<f32>, tolerance: f32) -> Vec<(Point<f32>, Point<f32>)> {
        let mut lines = Vec::new();
        flatten_quad(p0, p1, p2, tolerance, |a, b| lines.push((a, b)));
        lines
    }

    #[test]
    fn tiny_curve_is_two_legs() {
        let lines = collect(
            Point::new(0.0, 0.0),
            Point::new(0.2, 0.3),
            Point::new(0.4, 0.0),
            1.0,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, Point::new(0.0, 0.0));
        assert_eq!(lines[1].1, Point::new(0.4, 0.0));
    }

    #[test]
    fn large_curve_subdivides() {
        let lines = collect(
            Point::new(0.0, 0.0),
            Point::new(50.0, 100.0),
            Point::new(100.0, 0.0),
            1.0,
        );
        assert!(lines.len() > 8, "expected real subdivision, got {}", lines.len());
    }

    #[test]
    fn output_is_a_connected_chain() {
        let lines = collect(
            Point::new(0.0, 0.0),
            Point::new(80.0, 160.0),
            Point::new(160.0, 0.0),
            1.0,
        );
        assert_eq!(lines.first().unwrap().0, Point::new(0.0, 0.0));
        assert_eq!(lines.last().unwrap().1, Point::new(160.0, 0.0));
        for pair in lines.windows(2) {
            assert_eq!(pair[0].1, pair[1].0, "chain must be continuous");
        }
    }

    #[test]
    fn degenerate_stack_saturates() {
        // a wildly long curve cannot subdivide past the fixed stack; it
        // must still terminate and emit a finite chain
        let lines = collect(
            Point::new(0.0, 0.0),
            Point::new(1.0e7, 2.0e7),
            Point::new(2.0e7, 0.0),
            1.0e-6,
        );
        assert!(!lines.is_empty());
        assert_eq!(lines.first().unwrap().0, Point::new(0.0, 0.0));
        assert_eq!(lines.last().unwrap().1, Point::new(2.0e7, 0.0));
    }
}
