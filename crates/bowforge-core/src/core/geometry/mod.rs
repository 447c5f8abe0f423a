//! Reset-then-deform vertex transforms.
//!
//! Every deformation starts from the pristine [`MeshSnapshot`](crate::core::models::mesh::MeshSnapshot)
//! captured when a session is created, so repeated applications never accumulate.

pub mod deform;

pub use deform::deform;
