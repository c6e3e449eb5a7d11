//! Binary STL reading and writing
//!
//! Layout, all little-endian:
//!
//! | Offset | Size | Field                                   |
//! |--------|------|-----------------------------------------|
//! | 0      | 80   | Header (ignored on read)                |
//! | 80     | 4    | Triangle count `N` (`u32`)              |
//! | 84     | 50·N | Records: normal, 3 vertices (`f32` ×12), attribute (`u16`) |

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use tracing::{debug, info, warn};

use crate::config::WriterConfig;
use crate::error::{Error, Result};
use crate::file;
use crate::model::{MeshModel, Point3, SoupTriangle, SoupVertex, Vector3};

/// Size of the header block in bytes
pub const HEADER_SIZE: usize = 80;

/// Size of one triangle record in bytes
pub const RECORD_SIZE: usize = 50;

/// Offset of the first triangle record
pub const RECORDS_OFFSET: usize = HEADER_SIZE + 4;

/// Upper bound on up-front allocation driven by the declared triangle count
const MAX_PREALLOCATED_TRIANGLES: usize = 1 << 20;

/// Load a binary STL file
///
/// # Errors
///
/// - [`Error::NotFound`] when the path does not exist
/// - [`Error::Io`] when the file is shorter than its declared triangle count
pub fn load<P: AsRef<Path>>(path: P) -> Result<MeshModel> {
    let path = path.as_ref();
    file::ensure_exists(path)?;

    let file = File::open(path)?;
    let model = read(BufReader::new(file))?;

    info!(
        path = %path.display(),
        triangles = model.triangle_count(),
        "loaded binary STL"
    );
    Ok(model)
}

/// Read binary STL from a reader
///
/// The header and the per-record attribute bytes are skipped. A declared
/// count of zero yields an empty model.
pub fn read<R: Read>(mut reader: R) -> Result<MeshModel> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;
    let count = reader.read_u32::<LittleEndian>()?;

    let mut model = MeshModel::new();
    if count == 0 {
        return Ok(model);
    }

    let reserve = (count as usize).min(MAX_PREALLOCATED_TRIANGLES);
    model.positions.reserve(reserve * 3);
    model.triangle_indices.reserve(reserve * 3);

    for _ in 0..count {
        let triangle = read_record(&mut reader)?;
        model.append_triangle(&triangle);
    }

    debug!(triangles = count, "read binary STL records");
    Ok(model)
}

fn read_record<R: Read>(reader: &mut R) -> Result<SoupTriangle> {
    let [nx, ny, nz] = read_triple(reader)?;
    let a = read_triple(reader)?;
    let b = read_triple(reader)?;
    let c = read_triple(reader)?;
    let _attribute = reader.read_u16::<LittleEndian>()?;

    let vertex = |[x, y, z]: [f32; 3]| SoupVertex::at(Point3::new(x.into(), y.into(), z.into()));
    Ok(SoupTriangle::with_normal(
        Vector3::new(nx.into(), ny.into(), nz.into()),
        vertex(a),
        vertex(b),
        vertex(c),
    ))
}

fn read_triple<R: Read>(reader: &mut R) -> Result<[f32; 3]> {
    Ok([
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
    ])
}

/// Encode header text into the fixed 80-byte block
///
/// The UTF-8 bytes are truncated at 80 or padded with zero bytes.
///
/// # Example
///
/// ```
/// let header = meshfiles::stl::binary::header_bytes("hello");
/// assert_eq!(&header[..5], b"hello");
/// assert!(header[5..].iter().all(|&b| b == 0));
/// ```
pub fn header_bytes(header_text: &str) -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    let text = header_text.as_bytes();
    let len = text.len().min(HEADER_SIZE);
    header[..len].copy_from_slice(&text[..len]);
    header
}

/// Save a model as binary STL using the default [`WriterConfig`]
///
/// Any existing file at `path` is deleted first. Returns `Ok(false)` without
/// creating a file when the model has no triangles.
pub fn save<P: AsRef<Path>>(model: &MeshModel, path: P) -> Result<bool> {
    save_with_config(model, path, &WriterConfig::default())
}

/// Save a model as binary STL
pub fn save_with_config<P: AsRef<Path>>(
    model: &MeshModel,
    path: P,
    config: &WriterConfig,
) -> Result<bool> {
    let path = path.as_ref();
    file::remove_existing(path)?;

    let soup = model.to_triangle_soup()?;
    if soup.is_empty() {
        warn!(path = %path.display(), "model has no triangles, binary STL not written");
        return Ok(false);
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_soup(&soup, &mut writer, config)?;
    writer.flush()?;

    info!(
        path = %path.display(),
        triangles = soup.len(),
        "saved binary STL"
    );
    Ok(true)
}

/// Write a model as binary STL using the default [`WriterConfig`]
///
/// Returns `Ok(false)` and writes nothing when the model has no triangles.
pub fn write<W: Write>(model: &MeshModel, writer: W) -> Result<bool> {
    write_with_config(model, writer, &WriterConfig::default())
}

/// Write a model as binary STL
pub fn write_with_config<W: Write>(
    model: &MeshModel,
    mut writer: W,
    config: &WriterConfig,
) -> Result<bool> {
    let soup = model.to_triangle_soup()?;
    if soup.is_empty() {
        return Ok(false);
    }
    write_soup(&soup, &mut writer, config)?;
    writer.flush()?;
    Ok(true)
}

fn write_soup<W: Write>(soup: &[SoupTriangle], writer: &mut W, config: &WriterConfig) -> Result<()> {
    let count = u32::try_from(soup.len()).map_err(|_| {
        Error::InvalidModel(format!(
            "{} triangles exceed the binary STL limit of {}",
            soup.len(),
            u32::MAX
        ))
    })?;

    writer.write_all(&header_bytes(config.header_text()))?;
    writer.write_u32::<LittleEndian>(count)?;

    for triangle in soup {
        let normal = triangle.normal_or_zero();
        write_triple(writer, normal.x, normal.y, normal.z)?;
        for vertex in [&triangle.a, &triangle.b, &triangle.c] {
            let p = vertex.location;
            write_triple(writer, p.x, p.y, p.z)?;
        }
        writer.write_u16::<LittleEndian>(0)?;
    }
    Ok(())
}

fn write_triple<W: Write>(writer: &mut W, x: f64, y: f64, z: f64) -> Result<()> {
    writer.write_f32::<LittleEndian>(x as f32)?;
    writer.write_f32::<LittleEndian>(y as f32)?;
    writer.write_f32::<LittleEndian>(z as f32)?;
    Ok(())
}
