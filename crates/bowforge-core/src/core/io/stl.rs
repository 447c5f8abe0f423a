use super::mesh::IndexedMesh;
use super::traits::MeshFile;
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;
use std::io::{self, BufRead, Read, Write};
use thiserror::Error;

/// Binary header size in bytes.
const HEADER_SIZE: usize = 80;
/// One binary triangle: normal, three vertices, attribute count.
const TRIANGLE_SIZE: usize = 50;
const EXPORT_HEADER: &[u8] = b"Binary STL exported by BowForge";

#[derive(Debug, Error)]
pub enum StlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: StlParseErrorKind },
    #[error("Binary STL declares {declared} triangles but holds data for {available}")]
    Truncated { declared: u32, available: usize },
    #[error("File is too small to be an STL ({0} bytes)")]
    TooSmall(usize),
    #[error("Face references missing vertex {0}")]
    DanglingIndex(u32),
    #[error("Mesh has {0} faces, more than a binary STL can hold")]
    TooManyFaces(usize),
}

#[derive(Debug, Error)]
pub enum StlParseErrorKind {
    #[error("Invalid float in vertex record (value: '{0}')")]
    InvalidFloat(String),
    #[error("Vertex record needs three coordinates")]
    IncompleteVertex,
    #[error("Facet closed with {0} vertices, expected 3")]
    WrongVertexCount(usize),
    #[error("Vertex record outside of an 'outer loop'")]
    VertexOutsideLoop,
}

/// Welds bit-identical positions into shared vertices.
#[derive(Default)]
struct VertexWelder {
    mesh: IndexedMesh,
    index: HashMap<[u64; 3], u32>,
}

impl VertexWelder {
    fn insert(&mut self, p: Point3<f64>) -> u32 {
        let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
        let next = self.mesh.vertices.len() as u32;
        *self.index.entry(key).or_insert_with(|| {
            self.mesh.vertices.push(p);
            next
        })
    }

    fn push_triangle(&mut self, corners: [Point3<f64>; 3]) {
        let face = corners.map(|p| self.insert(p));
        self.mesh.faces.push(face);
    }

    fn finish(self) -> IndexedMesh {
        self.mesh
    }
}

/// Reads ASCII or binary STL and writes binary STL.
pub struct StlFile;

impl StlFile {
    fn is_binary(bytes: &[u8]) -> bool {
        if bytes.len() < HEADER_SIZE + 4 {
            return false;
        }
        let count = Self::declared_count(bytes) as usize;
        let exact_size = bytes.len() == HEADER_SIZE + 4 + count * TRIANGLE_SIZE;
        let looks_ascii = bytes[..5].eq_ignore_ascii_case(b"solid")
            || String::from_utf8_lossy(&bytes[..HEADER_SIZE])
                .trim_start()
                .starts_with("solid");
        exact_size || !looks_ascii
    }

    fn declared_count(bytes: &[u8]) -> u32 {
        u32::from_le_bytes([
            bytes[HEADER_SIZE],
            bytes[HEADER_SIZE + 1],
            bytes[HEADER_SIZE + 2],
            bytes[HEADER_SIZE + 3],
        ])
    }

    fn read_binary(bytes: &[u8]) -> Result<IndexedMesh, StlError> {
        let declared = Self::declared_count(bytes);
        let body = &bytes[HEADER_SIZE + 4..];
        let available = body.len() / TRIANGLE_SIZE;
        if available < declared as usize {
            return Err(StlError::Truncated {
                declared,
                available,
            });
        }

        let mut welder = VertexWelder::default();
        for triangle in body.chunks_exact(TRIANGLE_SIZE).take(declared as usize) {
            // Stored normals are ignored.
            welder.push_triangle([
                read_vertex(&triangle[12..24]),
                read_vertex(&triangle[24..36]),
                read_vertex(&triangle[36..48]),
            ]);
        }
        Ok(welder.finish())
    }

    fn read_ascii(bytes: &[u8]) -> Result<IndexedMesh, StlError> {
        let mut welder = VertexWelder::default();
        let mut corners: Vec<Point3<f64>> = Vec::with_capacity(3);
        let mut in_loop = false;

        for (line_idx, line) in bytes.lines().enumerate() {
            let line = line?;
            let line_no = line_idx + 1;
            let mut parts = line.split_whitespace();
            let Some(keyword) = parts.next() else {
                continue;
            };

            match keyword.to_ascii_lowercase().as_str() {
                "outer" => {
                    in_loop = true;
                    corners.clear();
                }
                "vertex" => {
                    if !in_loop {
                        return Err(StlError::Parse {
                            line: line_no,
                            kind: StlParseErrorKind::VertexOutsideLoop,
                        });
                    }
                    let mut coords = [0.0; 3];
                    for coord in &mut coords {
                        let raw = parts.next().ok_or(StlError::Parse {
                            line: line_no,
                            kind: StlParseErrorKind::IncompleteVertex,
                        })?;
                        *coord = raw.parse().map_err(|_| StlError::Parse {
                            line: line_no,
                            kind: StlParseErrorKind::InvalidFloat(raw.to_string()),
                        })?;
                    }
                    corners.push(Point3::new(coords[0], coords[1], coords[2]));
                }
                "endloop" => {
                    if corners.len() != 3 {
                        return Err(StlError::Parse {
                            line: line_no,
                            kind: StlParseErrorKind::WrongVertexCount(corners.len()),
                        });
                    }
                    welder.push_triangle([corners[0], corners[1], corners[2]]);
                    in_loop = false;
                }
                "endsolid" => break,
                _ => {}
            }
        }
        Ok(welder.finish())
    }
}

fn read_vertex(buf: &[u8]) -> Point3<f64> {
    let coord = |i: usize| {
        f64::from(f32::from_le_bytes([
            buf[i],
            buf[i + 1],
            buf[i + 2],
            buf[i + 3],
        ]))
    };
    Point3::new(coord(0), coord(4), coord(8))
}

fn write_vec3(writer: &mut impl Write, x: f64, y: f64, z: f64) -> io::Result<()> {
    writer.write_all(&(x as f32).to_le_bytes())?;
    writer.write_all(&(y as f32).to_le_bytes())?;
    writer.write_all(&(z as f32).to_le_bytes())
}

impl MeshFile for StlFile {
    type Error = StlError;

    fn read_from(reader: &mut impl BufRead) -> Result<IndexedMesh, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        if bytes.len() < 6 {
            return Err(StlError::TooSmall(bytes.len()));
        }
        if Self::is_binary(&bytes) {
            Self::read_binary(&bytes)
        } else {
            Self::read_ascii(&bytes)
        }
    }

    fn write_to(mesh: &IndexedMesh, writer: &mut impl Write) -> Result<(), Self::Error> {
        let face_count =
            u32::try_from(mesh.faces.len()).map_err(|_| StlError::TooManyFaces(mesh.faces.len()))?;

        let mut header = [b' '; HEADER_SIZE];
        header[..EXPORT_HEADER.len()].copy_from_slice(EXPORT_HEADER);
        writer.write_all(&header)?;
        writer.write_all(&face_count.to_le_bytes())?;

        for &face in &mesh.faces {
            let mut corners = [Point3::origin(); 3];
            for (corner, index) in corners.iter_mut().zip(face) {
                *corner = *mesh
                    .vertices
                    .get(index as usize)
                    .ok_or(StlError::DanglingIndex(index))?;
            }
            let [a, b, c] = corners;
            let normal = (b - a)
                .cross(&(c - a))
                .try_normalize(f64::EPSILON)
                .unwrap_or_else(Vector3::zeros);
            write_vec3(writer, normal.x, normal.y, normal.z)?;
            for p in [a, b, c] {
                write_vec3(writer, p.x, p.y, p.z)?;
            }
            writer.write_all(&0u16.to_le_bytes())?;
        }
        Ok(())
    }
}
