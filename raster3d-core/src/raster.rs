/// Scanline triangle filling with a per-pass depth test
use nalgebra::Point3;

use crate::buffer::{ColorBuffer, DepthBuffer};
use crate::diagnostics::{FrameTrace, ScanlineTrace, TriangleTrace};
use crate::geometry::Triangle;
use crate::math::remap;
use crate::projection::ProjectedTriangle;

/// Counters for one rasterization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub triangles: usize,
    pub scanlines: usize,
    pub pixels: usize,
}

/// Fill every projected triangle into `color`, in order.
///
/// A pixel takes a triangle's color when the triangle's depth there is
/// less than or equal to the closest depth seen so far, so on exact ties
/// the later triangle wins.
pub fn rasterize(
    triangles: &[ProjectedTriangle],
    color: &mut ColorBuffer,
    depth: &mut DepthBuffer,
    mut trace: Option<&mut FrameTrace>,
) -> RasterStats {
    debug_assert_eq!(color.pixels().len(), depth.len());
    let mut stats = RasterStats::default();

    for projected in triangles {
        let screen = &projected.screen;
        let (top_line, bottom_line) = line_bounds(screen);

        let mut spans = trace.as_ref().map(|_| Vec::new());
        let (scanlines, pixels) =
            fill_triangle(screen, top_line, bottom_line, color, depth, spans.as_mut());
        stats.triangles += 1;
        stats.scanlines += scanlines;
        stats.pixels += pixels;

        if let (Some(trace), Some(spans)) = (trace.as_deref_mut(), spans) {
            trace.triangles.push(TriangleTrace {
                vertices: screen.vertices(),
                top_line,
                bottom_line,
                scanlines: spans,
            });
        }
    }

    stats
}

/// First and one-past-last pixel rows, truncated toward zero
fn line_bounds(screen: &Triangle) -> (i64, i64) {
    let ys = screen.vertices().map(|v| v.y);
    let top = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let bottom = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (top as i64, bottom as i64)
}

/// Whether an edge covers `line`, comparing against truncated endpoint rows
fn spans_line(line: i64, p: &Point3<f64>, q: &Point3<f64>) -> bool {
    let (p, q) = (p.y as i64, q.y as i64);
    let (lo, hi) = if p > q { (q, p) } else { (p, q) };
    (lo..=hi).contains(&line)
}

/// X (truncated) and depth where the edge `p-q` meets `line`
fn intersect(line: i64, p: &Point3<f64>, q: &Point3<f64>) -> (i64, f64) {
    let y = line as f64;
    let x = remap(y, p.y, q.y, p.x, q.x) as i64;
    let z = remap(y, p.y, q.y, p.z, q.z);
    (x, z)
}

fn fill_triangle(
    screen: &Triangle,
    top_line: i64,
    bottom_line: i64,
    color: &mut ColorBuffer,
    depth: &mut DepthBuffer,
    mut spans: Option<&mut Vec<ScanlineTrace>>,
) -> (usize, usize) {
    let width = i64::from(color.width());
    let height = i64::from(color.height());
    let edges = [
        (&screen.a, &screen.b),
        (&screen.b, &screen.c),
        (&screen.c, &screen.a),
    ];
    let (mut scanlines, mut pixels) = (0, 0);

    for line in top_line.max(0)..bottom_line.min(height) {
        let mut crossing = edges.iter().filter(|(p, q)| spans_line(line, p, q));
        let (Some(&(a1, a2)), Some(&(b1, b2))) = (crossing.next(), crossing.next()) else {
            continue;
        };

        let (mut left_x, mut left_z) = intersect(line, a1, a2);
        let (mut right_x, mut right_z) = intersect(line, b1, b2);
        if left_x > right_x {
            std::mem::swap(&mut left_x, &mut right_x);
            std::mem::swap(&mut left_z, &mut right_z);
        }

        let step = if right_x != left_x {
            (right_z - left_z) / (right_x as f64 - left_x as f64)
        } else {
            0.0
        };

        if let Some(spans) = spans.as_deref_mut() {
            spans.push(ScanlineTrace {
                line,
                left_x,
                right_x,
                left_z,
                right_z,
                step,
            });
        }
        scanlines += 1;

        let start = left_x.max(0);
        let end = right_x.min(width);
        if start >= end {
            continue;
        }

        let mut z = left_z + (start as f64 - left_x as f64) * step;
        for x in start..end {
            let index = color.index(x as u32, line as u32);
            if depth.test_and_set(index, z) {
                color.pixels_mut()[index] = screen.color;
                pixels += 1;
            }
            z += step;
        }
    }

    (scanlines, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projected(a: [f64; 3], b: [f64; 3], c: [f64; 3], color: u32) -> ProjectedTriangle {
        let screen = Triangle::new(a.into(), b.into(), c.into(), color);
        ProjectedTriangle {
            screen,
            camera: screen,
        }
    }

    fn run(triangles: &[ProjectedTriangle], width: u32, height: u32) -> (ColorBuffer, RasterStats) {
        let mut color = ColorBuffer::new(width, height, 0);
        let mut depth = DepthBuffer::new(color.pixels().len());
        let stats = rasterize(triangles, &mut color, &mut depth, None);
        (color, stats)
    }

    #[test]
    fn test_line_bounds_truncate() {
        let tri = Triangle::new(
            Point3::new(0.0, 2.7, 1.0),
            Point3::new(0.0, -1.5, 1.0),
            Point3::new(0.0, 9.9, 1.0),
            0,
        );
        assert_eq!(line_bounds(&tri), (-1, 9));
    }

    #[test]
    fn test_right_triangle_coverage() {
        // Legs along x = 0 and y = 0, hypotenuse x + y = 8.
        let tri = projected([0.0, 0.0, 1.0], [8.0, 0.0, 1.0], [0.0, 8.0, 1.0], 0xFFFFFFFF);
        let (color, stats) = run(&[tri], 10, 10);

        assert_eq!(stats.triangles, 1);
        for y in 0..10 {
            for x in 0..10 {
                let inside = y < 8 && x < 8 - y;
                let expected = if inside { 0xFFFFFFFF } else { 0 };
                assert_eq!(color.get(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
        assert_eq!(stats.pixels, (1..=8).sum::<usize>());
    }

    #[test]
    fn test_offscreen_rows_and_columns_are_skipped() {
        let tri = projected([-20.0, -20.0, 1.0], [40.0, -20.0, 1.0], [-20.0, 40.0, 1.0], 0xFF0000FF);
        let (color, stats) = run(&[tri], 4, 4);

        assert_eq!(stats.pixels, 16);
        assert!(color.pixels().iter().all(|&p| p == 0xFF0000FF));
    }

    #[test]
    fn test_closer_triangle_wins_in_either_order() {
        let far = projected([0.0, 0.0, 5.0], [10.0, 0.0, 5.0], [0.0, 10.0, 5.0], 0xFFFF0000);
        let near = projected([0.0, 0.0, 2.0], [10.0, 0.0, 2.0], [0.0, 10.0, 2.0], 0xFF00FF00);

        let (color, _) = run(&[far, near], 10, 10);
        assert_eq!(color.get(1, 1), Some(0xFF00FF00));

        let (color, _) = run(&[near, far], 10, 10);
        assert_eq!(color.get(1, 1), Some(0xFF00FF00));
    }

    #[test]
    fn test_equal_depth_later_triangle_wins() {
        let first = projected([0.0, 0.0, 3.0], [10.0, 0.0, 3.0], [0.0, 10.0, 3.0], 0xFFFF0000);
        let second = projected([0.0, 0.0, 3.0], [10.0, 0.0, 3.0], [0.0, 10.0, 3.0], 0xFF0000FF);

        let (color, _) = run(&[first, second], 10, 10);
        assert_eq!(color.get(2, 2), Some(0xFF0000FF));
    }

    #[test]
    fn test_depth_interpolates_across_span() {
        // Depth grows left to right; a flat triangle at z = 5 sits between.
        let slope = projected([0.0, 0.0, 1.0], [10.0, 0.0, 9.0], [0.0, 10.0, 1.0], 0xFFFF0000);
        let flat = projected([0.0, 0.0, 5.0], [10.0, 0.0, 5.0], [0.0, 10.0, 5.0], 0xFF00FF00);

        let (color, _) = run(&[slope, flat], 10, 10);
        assert_eq!(color.get(1, 0), Some(0xFFFF0000));
        assert_eq!(color.get(8, 0), Some(0xFF00FF00));
    }

    #[test]
    fn test_left_clipped_span_keeps_depth_slope() {
        // Row 0 runs from x = -10 (z = 0) to x = 10 (z = 20), one unit per pixel,
        // so pixel x sits at depth x + 10 whether or not the span is clipped.
        let slope = projected([-10.0, 0.0, 0.0], [10.0, 0.0, 20.0], [-10.0, 10.0, 0.0], 0xFFFF0000);
        // Flat at z = 12: ties the slope at x = 2, in front of it after.
        let flat = projected([0.0, 0.0, 12.0], [10.0, 0.0, 12.0], [0.0, 10.0, 12.0], 0xFF00FF00);

        let (color, _) = run(&[slope, flat], 10, 10);
        assert_eq!(color.get(0, 0), Some(0xFFFF0000));
        assert_eq!(color.get(1, 0), Some(0xFFFF0000));
        // Depth 12 on both: the later triangle wins the tie.
        assert_eq!(color.get(2, 0), Some(0xFF00FF00));
        assert_eq!(color.get(3, 0), Some(0xFF00FF00));
    }

    #[test]
    fn test_trace_records_spans() {
        let tri = projected([0.0, 0.0, 1.0], [8.0, 0.0, 1.0], [0.0, 8.0, 1.0], 0xFFFFFFFF);
        let mut color = ColorBuffer::new(10, 10, 0);
        let mut depth = DepthBuffer::new(100);
        let mut trace = FrameTrace::new();

        let stats = rasterize(&[tri], &mut color, &mut depth, Some(&mut trace));

        let recorded = trace.last_triangle().unwrap();
        assert_eq!(recorded.top_line, 0);
        assert_eq!(recorded.bottom_line, 8);
        assert_eq!(recorded.scanlines.len(), stats.scanlines);
        assert_eq!(recorded.scanlines[0].left_x, 0);
        assert_eq!(recorded.scanlines[0].right_x, 8);
    }
}
