use super::mesh::IndexedMesh;
use crate::core::models::mesh::MeshComponent;
use std::collections::HashMap;
use tracing::debug;

/// Name given to the component at `index` in file order.
pub fn component_name(index: usize) -> String {
    match index {
        0 => "bow-body".to_string(),
        1 => "arrow".to_string(),
        n => format!("component-{n}"),
    }
}

/// Splits a welded mesh into its connected parts.
///
/// Two faces belong to the same part when they share a vertex. Parts are ordered
/// by their lowest face index, and each part's vertices are renumbered in order of
/// first use. Vertices no face references are dropped. Out-of-range face indices
/// are skipped.
pub fn split_components(mesh: &IndexedMesh) -> Vec<MeshComponent> {
    let vertex_count = mesh.vertices.len();
    let faces: Vec<[u32; 3]> = mesh
        .faces
        .iter()
        .copied()
        .filter(|f| f.iter().all(|&v| (v as usize) < vertex_count))
        .collect();

    let mut faces_of_vertex: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
    for (face_idx, face) in faces.iter().enumerate() {
        for &v in face {
            faces_of_vertex[v as usize].push(face_idx);
        }
    }

    let mut visited = vec![false; faces.len()];
    let mut components = Vec::new();

    for start in 0..faces.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut stack = vec![start];
        let mut member_faces = Vec::new();

        while let Some(face_idx) = stack.pop() {
            member_faces.push(face_idx);
            for &v in &faces[face_idx] {
                for &neighbor in &faces_of_vertex[v as usize] {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        stack.push(neighbor);
                    }
                }
            }
        }
        member_faces.sort_unstable();

        let name = component_name(components.len());
        components.push(extract(mesh, &faces, &member_faces, &name));
    }

    debug!(
        components = components.len(),
        faces = faces.len(),
        "Split mesh into connected components."
    );
    components
}

fn extract(
    mesh: &IndexedMesh,
    faces: &[[u32; 3]],
    member_faces: &[usize],
    name: &str,
) -> MeshComponent {
    let mut remap: HashMap<u32, u32> = HashMap::new();
    let mut vertices = Vec::new();
    let local_faces = member_faces
        .iter()
        .map(|&face_idx| {
            faces[face_idx].map(|v| {
                *remap.entry(v).or_insert_with(|| {
                    vertices.push(mesh.vertices[v as usize]);
                    (vertices.len() - 1) as u32
                })
            })
        })
        .collect();
    MeshComponent::new(name, vertices, local_faces)
}
