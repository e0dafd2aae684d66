/// The render target: scene description plus the owned color buffer
use std::time::Instant;

use crate::buffer::{ColorBuffer, DepthBuffer};
use crate::diagnostics::FrameTrace;
use crate::geometry::Mesh;
use crate::projection::{project, Projection};
use crate::raster::{rasterize, RasterStats};
use crate::transform::{to_camera_space, Camera};

/// Opaque black
pub const DEFAULT_CLEAR_COLOR: u32 = 0xFF00_0000;

/// A fixed-size raster with its camera and meshes.
///
/// Callers update `camera` and `meshes` between frames, then call
/// [`clear`](Self::clear) and [`render`](Self::render). Rendering never
/// clears on its own.
#[derive(Debug)]
pub struct RasterLayer {
    pub camera: Camera,
    pub meshes: Vec<Mesh>,
    projection: Projection,
    color: ColorBuffer,
}

impl RasterLayer {
    pub fn new(width: u32, height: u32, fov: f64, far_clipping: f64, near_clipping: f64) -> Self {
        Self::with_projection(width, height, Projection::new(fov, near_clipping, far_clipping))
    }

    pub fn with_projection(width: u32, height: u32, projection: Projection) -> Self {
        debug_assert!(width > 0 && height > 0, "raster must not be empty");
        debug_assert!(projection.near_clipping > 0.0, "near clipping must be positive");
        Self {
            camera: Camera::default(),
            meshes: Vec::new(),
            projection,
            color: ColorBuffer::new(width, height, DEFAULT_CLEAR_COLOR),
        }
    }

    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Row-major ARGB8888 pixels, `width * height` entries
    pub fn pixels(&self) -> &[u32] {
        self.color.pixels()
    }

    pub fn color_buffer(&self) -> &ColorBuffer {
        &self.color
    }

    /// Fill every pixel with `color`. Returns elapsed seconds.
    pub fn clear(&mut self, color: u32) -> f64 {
        let start = Instant::now();
        self.color.fill(color);
        start.elapsed().as_secs_f64()
    }

    /// Draw all meshes over the current buffer contents. Returns elapsed seconds.
    pub fn render(&mut self) -> f64 {
        let start = Instant::now();
        self.render_pass(None);
        start.elapsed().as_secs_f64()
    }

    /// Like [`render`](Self::render), also recording every triangle and
    /// span into `trace`, which is cleared first.
    pub fn render_traced(&mut self, trace: &mut FrameTrace) -> f64 {
        let start = Instant::now();
        trace.clear();
        self.render_pass(Some(trace));
        start.elapsed().as_secs_f64()
    }

    fn render_pass(&mut self, trace: Option<&mut FrameTrace>) -> RasterStats {
        let camera_space = to_camera_space(&self.meshes, &self.camera);
        let projected = project(&camera_space, &self.projection, self.width(), self.height());

        let mut depth = DepthBuffer::new(self.color.pixels().len());
        let stats = rasterize(&projected, &mut self.color, &mut depth, trace);

        log::debug!(
            "frame: {} triangles in view of {}, {} scanlines, {} pixels written",
            stats.triangles,
            camera_space.len(),
            stats.scanlines,
            stats.pixels
        );
        stats
    }
}
