/// Geometry primitives for 3D rendering
use nalgebra::Point3;

use crate::transform::Rotation;

/// A flat-shaded triangle with a packed ARGB color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point3<f64>,
    pub b: Point3<f64>,
    pub c: Point3<f64>,
    pub color: u32,
}

impl Triangle {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>, color: u32) -> Self {
        Self { a, b, c, color }
    }

    pub fn vertices(&self) -> [Point3<f64>; 3] {
        [self.a, self.b, self.c]
    }

    /// Apply `f` to each vertex, keeping the color
    pub fn map_vertices(&self, mut f: impl FnMut(Point3<f64>) -> Point3<f64>) -> Self {
        Self {
            a: f(self.a),
            b: f(self.b),
            c: f(self.c),
            color: self.color,
        }
    }
}

/// Triangles sharing one position and rotation offset
#[derive(Debug, Clone)]
pub struct Mesh {
    pub position: Point3<f64>,
    pub rotation: Rotation,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            position: Point3::origin(),
            rotation: Rotation::zero(),
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            ..Self::new()
        }
    }

    pub fn at(mut self, position: Point3<f64>) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Create a cube centered on the mesh origin, one color per face
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let p = Point3::new;
        let mut mesh = Self::with_capacity(12);
        let mut quad = |a, b, c, d, color| {
            mesh.add_triangle(Triangle::new(a, b, c, color));
            mesh.add_triangle(Triangle::new(a, c, d, color));
        };

        // Front
        quad(p(-h, -h, h), p(h, -h, h), p(h, h, h), p(-h, h, h), 0xFFE0_4040);
        // Back
        quad(p(-h, -h, -h), p(-h, h, -h), p(h, h, -h), p(h, -h, -h), 0xFF40_E040);
        // Top
        quad(p(-h, h, -h), p(-h, h, h), p(h, h, h), p(h, h, -h), 0xFF40_40E0);
        // Bottom
        quad(p(-h, -h, -h), p(h, -h, -h), p(h, -h, h), p(-h, -h, h), 0xFFE0_E040);
        // Right
        quad(p(h, -h, -h), p(h, h, -h), p(h, h, h), p(h, -h, h), 0xFFE0_40E0);
        // Left
        quad(p(-h, -h, -h), p(-h, -h, h), p(-h, h, h), p(-h, h, -h), 0xFF40_E0E0);

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
