/// Object and camera rotations, and the mesh-to-camera-space stage
use nalgebra::Point3;

use crate::geometry::{Mesh, Triangle};

/// Rotation around three axes, in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    /// Rotation in the X-Z plane
    pub yaw: f64,
    /// Rotation in the Y-Z plane
    pub pitch: f64,
    /// Rotation in the X-Y plane
    pub roll: f64,
}

impl Rotation {
    pub fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, d_yaw: f64, d_pitch: f64, d_roll: f64) {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
        self.roll += d_roll;
    }

    pub fn negated(&self) -> Self {
        Self::new(-self.yaw, -self.pitch, -self.roll)
    }

    /// Precompute the sines and cosines used by [`rotate_3d`]
    pub fn trig(&self) -> RotationTrig {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        let (sin_roll, cos_roll) = self.roll.to_radians().sin_cos();
        RotationTrig {
            sin_yaw,
            cos_yaw,
            sin_pitch,
            cos_pitch,
            sin_roll,
            cos_roll,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTrig {
    pub sin_yaw: f64,
    pub cos_yaw: f64,
    pub sin_pitch: f64,
    pub cos_pitch: f64,
    pub sin_roll: f64,
    pub cos_roll: f64,
}

impl RotationTrig {
    pub const IDENTITY: Self = Self {
        sin_yaw: 0.0,
        cos_yaw: 1.0,
        sin_pitch: 0.0,
        cos_pitch: 1.0,
        sin_roll: 0.0,
        cos_roll: 1.0,
    };
}

/// Rotate a point around the origin.
///
/// Yaw, pitch and roll are applied in that order and each step consumes
/// the previous one's output: pitch mixes the pre-yaw `y` with the yawed
/// `z`, and roll is a plain 2D rotation of the resulting `x`/`y`.
pub fn rotate_3d(point: Point3<f64>, r: &RotationTrig) -> Point3<f64> {
    let (x, y, z) = (point.x, point.y, point.z);

    let yawed_x = x * r.cos_yaw + z * r.sin_yaw;
    let yawed_z = z * r.cos_yaw - x * r.sin_yaw;

    let pitched_y = y * r.cos_pitch + yawed_z * r.sin_pitch;
    let pitched_z = yawed_z * r.cos_pitch - y * r.sin_pitch;

    let rolled_x = yawed_x * r.cos_roll + pitched_y * r.sin_roll;
    let rolled_y = yawed_x * -r.sin_roll + pitched_y * r.cos_roll;

    Point3::new(rolled_x, rolled_y, pitched_z)
}

/// Viewpoint the scene is rendered from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f64>,
    pub rotation: Rotation,
}

impl Camera {
    pub fn new(position: Point3<f64>, rotation: Rotation) -> Self {
        Self { position, rotation }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::origin(), Rotation::zero())
    }
}

/// Move every mesh triangle into camera space.
///
/// Each vertex is rotated by its mesh's rotation, offset by the mesh
/// position relative to the camera, then rotated by the inverse camera
/// rotation. No triangle is dropped here.
pub fn to_camera_space(meshes: &[Mesh], camera: &Camera) -> Vec<Triangle> {
    let camera_trig = camera.rotation.negated().trig();
    let count = meshes.iter().map(|mesh| mesh.triangles.len()).sum();
    let mut out = Vec::with_capacity(count);

    for mesh in meshes {
        let offset = mesh.position - camera.position;
        let mesh_trig = mesh.rotation.trig();

        out.extend(mesh.triangles.iter().map(|triangle| {
            triangle.map_vertices(|vertex| {
                let placed = rotate_3d(vertex, &mesh_trig) + offset;
                rotate_3d(placed, &camera_trig)
            })
        }));
    }

    out
}
