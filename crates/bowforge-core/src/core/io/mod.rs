//! Provides input/output for triangulated mesh files.
//!
//! Front ends use this layer to turn a file on disk into the two
//! [`MeshComponent`](crate::core::models::mesh::MeshComponent)s a design session
//! consumes, and to export the deformed result. The session itself never calls
//! into this module.

pub mod components;
pub mod mesh;
pub mod stl;
pub mod traits;

pub use components::split_components;
pub use mesh::IndexedMesh;
pub use stl::{StlError, StlFile};
pub use traits::MeshFile;
