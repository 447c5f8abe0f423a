use crate::core::models::mesh::MeshComponent;
use nalgebra::Point3;

/// A flat vertex/face soup as read from or written to disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenates components into one mesh, offsetting face indices.
    pub fn from_components(components: &[MeshComponent]) -> Self {
        let mut mesh = Self::new();
        for component in components {
            let offset = mesh.vertices.len() as u32;
            mesh.vertices.extend_from_slice(component.vertices());
            mesh.faces.extend(
                component
                    .faces()
                    .iter()
                    .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
            );
        }
        mesh
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
