use super::mesh::IndexedMesh;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing triangulated mesh formats.
///
/// Implementors handle the format-specific parsing and serialization; the
/// path-based helpers only add buffered file handling on top.
pub trait MeshFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads an indexed mesh from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the reader fails.
    fn read_from(reader: &mut impl BufRead) -> Result<IndexedMesh, Self::Error>;

    /// Writes an indexed mesh to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(mesh: &IndexedMesh, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads an indexed mesh from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<IndexedMesh, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes an indexed mesh to a file path, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(mesh, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
