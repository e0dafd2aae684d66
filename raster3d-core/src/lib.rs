/// raster3d core - software triangle rasterizer
///
/// Meshes are moved into camera space, perspective projected with
/// whole-triangle culling, and filled one scanline at a time into an
/// owned ARGB color buffer using a per-frame depth buffer.

pub mod buffer;
pub mod diagnostics;
pub mod geometry;
pub mod layer;
pub mod math;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod transform;

// Re-export commonly used types
pub use buffer::{ColorBuffer, DepthBuffer};
pub use diagnostics::FrameTrace;
pub use geometry::{Mesh, Triangle};
pub use layer::RasterLayer;
pub use obj::{load_obj, parse_obj, LoadError};
pub use projection::Projection;
pub use transform::{Camera, Rotation};
