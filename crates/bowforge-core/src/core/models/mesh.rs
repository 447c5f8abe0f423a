use nalgebra::Point3;
use thiserror::Error;

pub const BOW_BODY_INDEX: usize = 0;
pub const ARROW_INDEX: usize = 1;
pub const EXPECTED_COMPONENT_COUNT: usize = 2;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MeshError {
    #[error("Expected exactly {expected} mesh components (bow body, arrow), found {found}")]
    InvalidComponentCount { expected: usize, found: usize },
    #[error(
        "Face {face} of component '{component}' references vertex {vertex}, but only {vertex_count} vertices exist"
    )]
    FaceIndexOutOfRange {
        component: String,
        face: usize,
        vertex: u32,
        vertex_count: usize,
    },
}

/// One disconnected part of the input model.
///
/// Vertex positions are mutable; the face buffer is fixed at construction so the
/// topology can never drift from the vertex order it indexes.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub name: String,
    vertices: Vec<Point3<f64>>,
    faces: Vec<[u32; 3]>,
}

impl MeshComponent {
    pub fn new(name: &str, vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self {
            name: name.to_string(),
            vertices,
            faces,
        }
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut [Point3<f64>] {
        &mut self.vertices
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Minimum and maximum x coordinate, or `None` for an empty component.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        x_extent(&self.vertices)
    }

    fn validate_faces(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&v| v as usize >= vertex_count) {
                return Err(MeshError::FaceIndexOutOfRange {
                    component: self.name.clone(),
                    face: face_idx,
                    vertex: bad,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

pub(crate) fn x_extent(vertices: &[Point3<f64>]) -> Option<(f64, f64)> {
    vertices.iter().fold(None, |acc, v| match acc {
        None => Some((v.x, v.x)),
        Some((lo, hi)) => Some((lo.min(v.x), hi.max(v.x))),
    })
}

/// The validated two-part model: component 0 is the bow body, component 1 the arrow.
#[derive(Debug, Clone, PartialEq)]
pub struct BowArrowMesh {
    components: Vec<MeshComponent>,
}

impl BowArrowMesh {
    pub fn from_components(components: Vec<MeshComponent>) -> Result<Self, MeshError> {
        if components.len() != EXPECTED_COMPONENT_COUNT {
            return Err(MeshError::InvalidComponentCount {
                expected: EXPECTED_COMPONENT_COUNT,
                found: components.len(),
            });
        }
        for component in &components {
            component.validate_faces()?;
        }
        Ok(Self { components })
    }

    pub fn bow_body(&self) -> &MeshComponent {
        &self.components[BOW_BODY_INDEX]
    }

    pub fn arrow(&self) -> &MeshComponent {
        &self.components[ARROW_INDEX]
    }

    pub fn components(&self) -> &[MeshComponent] {
        &self.components
    }

    pub(crate) fn components_mut(&mut self) -> &mut [MeshComponent] {
        &mut self.components
    }

    pub fn into_components(self) -> Vec<MeshComponent> {
        self.components
    }

    /// Captures the current vertex buffers as an immutable baseline.
    pub fn snapshot(&self) -> MeshSnapshot {
        MeshSnapshot {
            vertices: self
                .components
                .iter()
                .map(|c| c.vertices.clone())
                .collect(),
        }
    }

    /// Overwrites every vertex buffer. Buffer lengths must match the components.
    pub(crate) fn write_vertices(&mut self, buffers: Vec<Vec<Point3<f64>>>) {
        for (component, buffer) in self.components.iter_mut().zip(buffers) {
            debug_assert_eq!(component.vertices.len(), buffer.len());
            component.vertices = buffer;
        }
    }
}

/// Read-only copy of the pristine, undeformed vertex buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSnapshot {
    vertices: Vec<Vec<Point3<f64>>>,
}

impl MeshSnapshot {
    pub fn bow_body(&self) -> &[Point3<f64>] {
        &self.vertices[BOW_BODY_INDEX]
    }

    pub fn arrow(&self) -> &[Point3<f64>] {
        &self.vertices[ARROW_INDEX]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(name: &str, x_offset: f64) -> MeshComponent {
        MeshComponent::new(
            name,
            vec![
                Point3::new(x_offset, 0.0, 0.0),
                Point3::new(x_offset + 1.0, 0.0, 0.0),
                Point3::new(x_offset + 0.5, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn from_components_accepts_exactly_two() {
        let mesh =
            BowArrowMesh::from_components(vec![triangle("bow", 0.0), triangle("arrow", 5.0)])
                .unwrap();
        assert_eq!(mesh.bow_body().name, "bow");
        assert_eq!(mesh.arrow().name, "arrow");
    }

    #[test]
    fn from_components_rejects_wrong_counts() {
        let one = BowArrowMesh::from_components(vec![triangle("bow", 0.0)]);
        assert_eq!(
            one,
            Err(MeshError::InvalidComponentCount {
                expected: 2,
                found: 1
            })
        );

        let three = BowArrowMesh::from_components(vec![
            triangle("a", 0.0),
            triangle("b", 2.0),
            triangle("c", 4.0),
        ]);
        assert!(matches!(
            three,
            Err(MeshError::InvalidComponentCount { found: 3, .. })
        ));
    }

    #[test]
    fn from_components_rejects_dangling_face_indices() {
        let broken = MeshComponent::new("bow", vec![Point3::origin()], vec![[0, 1, 2]]);
        let result = BowArrowMesh::from_components(vec![broken, triangle("arrow", 0.0)]);
        assert!(matches!(
            result,
            Err(MeshError::FaceIndexOutOfRange { vertex: 1, .. })
        ));
    }

    #[test]
    fn x_extent_spans_all_vertices() {
        assert_eq!(triangle("t", 2.0).x_extent(), Some((2.0, 3.0)));
        assert_eq!(MeshComponent::new("e", vec![], vec![]).x_extent(), None);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_writes() {
        let mut mesh =
            BowArrowMesh::from_components(vec![triangle("bow", 0.0), triangle("arrow", 5.0)])
                .unwrap();
        let snapshot = mesh.snapshot();
        mesh.components_mut()[0].vertices_mut()[0].x = 42.0;
        assert_eq!(snapshot.bow_body()[0].x, 0.0);
    }
}
