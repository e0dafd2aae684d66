/// Per-frame record of what the rasterizer computed, for debug overlays
use std::fmt;

use nalgebra::Point3;

/// One scanline span of a triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanlineTrace {
    pub line: i64,
    pub left_x: i64,
    pub right_x: i64,
    pub left_z: f64,
    pub right_z: f64,
    pub step: f64,
}

/// One rasterized triangle and its spans
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleTrace {
    /// Screen x/y with camera depth
    pub vertices: [Point3<f64>; 3],
    pub top_line: i64,
    pub bottom_line: i64,
    pub scanlines: Vec<ScanlineTrace>,
}

/// Filled in by [`RasterLayer::render_traced`](crate::RasterLayer::render_traced)
#[derive(Debug, Clone, Default)]
pub struct FrameTrace {
    pub triangles: Vec<TriangleTrace>,
}

impl FrameTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.triangles.clear();
    }

    pub fn last_triangle(&self) -> Option<&TriangleTrace> {
        self.triangles.last()
    }

    pub fn scanline_count(&self) -> usize {
        self.triangles.iter().map(|t| t.scanlines.len()).sum()
    }
}

impl fmt::Display for TriangleTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, v) in ["A", "B", "C"].iter().zip(&self.vertices) {
            writeln!(f, "{name}  x:{:.3} y:{:.3} z:{:.3}", v.x, v.y, v.z)?;
        }
        writeln!(f, "top_line: {} bottom_line: {}", self.top_line, self.bottom_line)?;
        if let Some(last) = self.scanlines.last() {
            write!(f, "{last}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ScanlineTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "line {}: x {}..{} z {:.4}..{:.4} step {:.6}",
            self.line, self.left_x, self.right_x, self.left_z, self.right_z, self.step
        )
    }
}

impl fmt::Display for FrameTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} triangles, {} scanlines",
            self.triangles.len(),
            self.scanline_count()
        )?;
        match self.last_triangle() {
            Some(triangle) => write!(f, "{triangle}"),
            None => Ok(()),
        }
    }
}
