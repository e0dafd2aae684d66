/// Perspective projection and whole-triangle culling
use nalgebra::Point3;

use crate::geometry::Triangle;
use crate::math::to_fov;

/// Camera-space depths closer to zero than this are pushed out to it
pub const MIN_DEPTH: f64 = 0.001;

/// Field of view and clipping distances for a raster layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Field of view in degrees
    pub fov: f64,
    pub near_clipping: f64,
    pub far_clipping: f64,
}

impl Projection {
    pub fn new(fov: f64, near_clipping: f64, far_clipping: f64) -> Self {
        Self {
            fov,
            near_clipping,
            far_clipping,
        }
    }

    /// Pixels per unit of `x / z` for a raster of the given size
    pub fn scale(&self, width: u32, height: u32) -> f64 {
        to_fov(self.fov) * f64::from(width.max(height))
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(90.0, 0.1, 500.0)
    }
}

/// A triangle that survived culling.
///
/// `screen` holds pixel `x`/`y` with the camera-space `z` kept as depth;
/// `camera` is the same triangle before the perspective divide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedTriangle {
    pub screen: Triangle,
    pub camera: Triangle,
}

/// Why a triangle was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cull {
    Depth,
    Viewport,
}

/// Project camera-space triangles onto a `width` x `height` raster.
///
/// Triangles are only rejected whole: a triangle with some vertices
/// behind the near plane passes through unclipped.
pub fn project(
    triangles: &[Triangle],
    projection: &Projection,
    width: u32,
    height: u32,
) -> Vec<ProjectedTriangle> {
    let scale = projection.scale(width, height);
    let mut out = Vec::with_capacity(triangles.len());
    let mut culled = 0usize;

    for triangle in triangles {
        match project_triangle(triangle, projection, scale, width, height) {
            Ok(projected) => out.push(projected),
            Err(_) => culled += 1,
        }
    }

    log::trace!("projected {} triangles, culled {}", out.len(), culled);
    out
}

/// Project one triangle with a precomputed [`Projection::scale`]
pub fn project_triangle(
    triangle: &Triangle,
    projection: &Projection,
    scale: f64,
    width: u32,
    height: u32,
) -> Result<ProjectedTriangle, Cull> {
    let zs = triangle.vertices().map(|v| v.z);
    if zs.iter().all(|&z| z <= projection.near_clipping)
        || zs.iter().all(|&z| z >= projection.far_clipping)
    {
        return Err(Cull::Depth);
    }

    let camera = triangle.map_vertices(|mut v| {
        if v.z > -MIN_DEPTH && v.z < MIN_DEPTH {
            v.z = MIN_DEPTH;
        }
        v
    });

    // Integer halves, as the viewport center is a pixel index
    let center_x = f64::from(width / 2);
    let center_y = f64::from(height / 2);
    let screen = camera.map_vertices(|v| {
        Point3::new(
            (v.x / v.z) * scale + center_x,
            -(v.y / v.z) * scale + center_y,
            v.z,
        )
    });

    let (w, h) = (f64::from(width), f64::from(height));
    let vertices = screen.vertices();
    if vertices.iter().all(|v| v.x < 0.0)
        || vertices.iter().all(|v| v.x >= w)
        || vertices.iter().all(|v| v.y < 0.0)
        || vertices.iter().all(|v| v.y >= h)
    {
        return Err(Cull::Viewport);
    }

    Ok(ProjectedTriangle { screen, camera })
}
