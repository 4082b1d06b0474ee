//! The analytic scanline rasterizer.
//!
//! Outline segments are flattened to edges, transformed into surface space
//! (y flipped, origin top left), sorted by their uppermost point, and swept
//! one scanline strip at a time. Each active edge deposits exact signed
//! trapezoid areas into a per-column accumulator; a running prefix sum
//! turns those deposits into coverage, which is written out inverted so
//! ink is dark.
//!
//! Rasterization has no failure modes: a malformed outline degrades
//! visually, but every write lands inside the surface.

use read_ttf::{GlyphOutline, OutlineSegment, Point};

use crate::flatten::flatten_quad;
use crate::surface::GraySurface;

/// Edges with less vertical extent than this are horizontal and carry no
/// coverage.
const HORIZONTAL_EPSILON: f32 = 1.0 / 8192.0;

/// Flattening tolerance in surface pixels.
const FLATNESS: f32 = 1.0;

/// Upper bound on surface width and height, in pixels. A hostile bounding
/// box cannot demand more memory than this on either axis.
const MAX_SURFACE_EXTENT: usize = 8192;

struct Edge {
    upper: Point<f32>,
    lower: Point<f32>,
    /// +1 when the original segment ran downward in surface space, -1 when
    /// upward.
    sign: f32,
}

struct ActiveEdge {
    /// x where the edge crosses the top of the current strip.
    x: f32,
    dxdy: f32,
    upper_y: f32,
    lower_y: f32,
    sign: f32,
}

/// Rasterizes an outline at the given scale into a grayscale alpha mask.
///
/// Surface dimensions derive from the outline's bounding box:
/// `ceil((max - min + 1) * scale)` on each axis. An outline with no
/// segments produces a fully background surface of those dimensions.
pub fn rasterize(outline: &GlyphOutline, scale: f32) -> GraySurface {
    if !scale.is_finite() || scale <= 0.0 {
        return GraySurface::blank(0, 0);
    }
    let bounds = outline.bounds;
    let extent = |min: i16, max: i16| -> usize {
        let span = (max as i32 - min as i32 + 1).max(0);
        ((span as f32 * scale).ceil().max(0.0) as usize).min(MAX_SURFACE_EXTENT)
    };
    let width = extent(bounds.x_min, bounds.x_max);
    let height = extent(bounds.y_min, bounds.y_max);
    let mut surface = GraySurface::blank(width, height);
    if width == 0 || height == 0 || outline.segments.is_empty() {
        return surface;
    }

    // translate so (x_min, y_min) lands at the origin, scale, and flip
    // vertically: larger font y means smaller surface y
    let transform = |p: Point<i16>| {
        Point::new(
            (p.x as i32 - bounds.x_min as i32) as f32 * scale,
            (bounds.y_max as i32 - p.y as i32) as f32 * scale,
        )
    };

    let mut edges = Vec::new();
    for segment in &outline.segments {
        match segment {
            OutlineSegment::Line { start, end } => {
                push_edge(&mut edges, transform(*start), transform(*end));
            }
            OutlineSegment::Quad {
                start,
                control,
                end,
            } => {
                flatten_quad(
                    transform(*start),
                    transform(*control),
                    transform(*end),
                    FLATNESS,
                    |p0, p1| push_edge(&mut edges, p0, p1),
                );
            }
        }
    }
    edges.sort_unstable_by(|a, b| a.upper.y.total_cmp(&b.upper.y));

    let mut active: Vec<ActiveEdge> = Vec::new();
    let mut next_edge = 0usize;
    // per column: (signed partial coverage, signed full-height prefix);
    // one extra cell catches deposits just past the right edge
    let mut accumulator = vec![(0.0f32, 0.0f32); width + 1];

    for row in 0..height {
        let top = row as f32;
        let bottom = top + 1.0;

        active.retain(|edge| edge.lower_y > top);
        while next_edge < edges.len() && edges[next_edge].upper.y < bottom {
            let edge = &edges[next_edge];
            next_edge += 1;
            let dy = edge.lower.y - edge.upper.y;
            if dy <= HORIZONTAL_EPSILON {
                continue;
            }
            let dxdy = (edge.lower.x - edge.upper.x) / dy;
            active.push(ActiveEdge {
                x: edge.upper.x + dxdy * (top - edge.upper.y),
                dxdy,
                upper_y: edge.upper.y,
                lower_y: edge.lower.y,
                sign: edge.sign,
            });
        }

        for edge in &active {
            accumulate(&mut accumulator, edge, top, bottom, width);
        }

        let pixels = surface.row_mut(row);
        let mut cover = 0.0f32;
        for (pixel, (partial, prefix)) in pixels.iter_mut().zip(&accumulator) {
            cover += prefix;
            let value = ((cover + partial) * 255.0).clamp(0.0, 255.0);
            *pixel = 255 - value as u8;
        }

        for cell in accumulator.iter_mut() {
            *cell = (0.0, 0.0);
        }
        for edge in active.iter_mut() {
            edge.x += edge.dxdy;
        }
    }
    surface
}

fn push_edge(edges: &mut Vec<Edge>, p0: Point<f32>, p1: Point<f32>) {
    let dy = p1.y - p0.y;
    if dy.abs() <= HORIZONTAL_EPSILON {
        return;
    }
    if dy > 0.0 {
        edges.push(Edge {
            upper: p0,
            lower: p1,
            sign: 1.0,
        });
    } else {
        edges.push(Edge {
            upper: p1,
            lower: p0,
            sign: -1.0,
        });
    }
}

/// Deposits one edge's coverage within the strip `[top, bottom)`.
///
/// The edge is clipped to the strip, its endpoints ordered left to right
/// (trapezoid area is symmetric under that swap), and the covered area to
/// its right decomposed per column: a single trapezoid when the edge stays
/// in one column, otherwise a leading triangle, one trapezoid per interior
/// column, and a final trapezoid-plus-rectangle. Columns right of the span
/// receive the full clipped height through the prefix cell.
fn accumulate(
    accumulator: &mut [(f32, f32)],
    edge: &ActiveEdge,
    top: f32,
    bottom: f32,
    width: usize,
) {
    let y0 = edge.upper_y.max(top);
    let y1 = edge.lower_y.min(bottom);
    let h = y1 - y0;
    if h <= 0.0 {
        return;
    }
    let mut x0 = edge.x + edge.dxdy * (y0 - top);
    let mut x1 = edge.x + edge.dxdy * (y1 - top);
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
    }
    let limit = width as f32;
    let x0 = x0.clamp(0.0, limit);
    let x1 = x1.clamp(0.0, limit);
    let sign = edge.sign;

    let start_px = x0.floor() as usize;
    let end_px = (x1.ceil() as usize).min(width);
    if start_px >= width {
        return;
    }
    if end_px <= start_px + 1 {
        // the edge stays in one column: a trapezoid against the column's
        // right boundary, shadowing everything further right by h
        let right = (start_px + 1) as f32;
        let area = 0.5 * h * ((right - x0) + (right - x1));
        accumulator[start_px].0 += sign * area;
        accumulator[start_px + 1].1 += sign * h;
    } else {
        let dydx = h / (x1 - x0);
        let first_right = (start_px + 1) as f32;
        // height consumed crossing the remainder of the first column
        let mut h_run = (first_right - x0) * dydx;
        accumulator[start_px].0 += sign * 0.5 * (first_right - x0) * h_run;
        for column in start_px + 1..end_px - 1 {
            accumulator[column].0 += sign * (h_run + 0.5 * dydx);
            h_run += dydx;
        }
        let w_last = end_px as f32 - x1;
        accumulator[end_px - 1].0 += sign * (h_run + 0.5 * (h - h_run) * (1.0 + w_last));
        accumulator[end_px].1 += sign * h;
    }
}
