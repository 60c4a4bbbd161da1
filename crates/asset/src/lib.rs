//! Procedural geometry and asset output.
//! Textured UV-sphere tessellation, mesh buffers, OBJ/MTL export and preview textures.

pub mod describe;
pub mod mesh;
pub mod obj;
pub mod sphere;
pub mod texture;

pub use mesh::{Mesh, MeshVertex, Points, Precision, index_bytes, vertex_bytes};
pub use sphere::{SphereSpec, generate};
