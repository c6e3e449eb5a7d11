//! End-to-end 3MF loading and saving
//!
//! Combines the archive layer in [`crate::opc`] with the model XML reader and
//! writer. Saving renumbers object IDs first when they collide.

use std::io::{Read, Seek, Write};
use std::path::Path;

use tracing::info;

use crate::config::WriterConfig;
use crate::error::Result;
use crate::model::{MeshModel, normalize_ids};
use crate::opc;
use crate::parser::parse_model_xml;
use crate::writer::model_xml_string;

/// Read every object of a 3MF archive
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let models = meshfiles::threemf::from_reader(File::open("assembly.3mf")?)?;
/// for model in &models {
///     println!("object {}: {} triangles", model.id, model.triangle_count());
/// }
/// # Ok(())
/// # }
/// ```
pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Vec<MeshModel>> {
    let xml = opc::read_model_entry(reader)?;
    parse_model_xml(&xml)
}

/// Load every object of a 3MF file
///
/// # Errors
///
/// - [`crate::Error::NotFound`] / [`crate::Error::EmptyFile`] for a missing or empty file
/// - [`crate::Error::MissingFile`] when the archive has no `3D/3dmodel.model` entry
/// - any model XML error from the reader
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<MeshModel>> {
    let path = path.as_ref();
    let xml = opc::extract_model_file(path)?;
    let models = parse_model_xml(&xml)?;

    info!(path = %path.display(), objects = models.len(), "loaded 3MF");
    Ok(models)
}

/// Write models as a 3MF archive using the default [`WriterConfig`]
///
/// Colliding object IDs are renumbered in place before writing.
pub fn to_writer<W: Write + Seek>(models: &mut [MeshModel], writer: W) -> Result<W> {
    to_writer_with_config(models, writer, &WriterConfig::default())
}

/// Write models as a 3MF archive
pub fn to_writer_with_config<W: Write + Seek>(
    models: &mut [MeshModel],
    writer: W,
    config: &WriterConfig,
) -> Result<W> {
    normalize_ids(models);
    let xml = model_xml_string(models)?;
    opc::create_package(writer, &xml, config.line_ending())
}

/// Save models as a 3MF file using the default [`WriterConfig`]
///
/// Any existing file at `path` is replaced. Colliding object IDs are
/// renumbered in place from 0 before writing. Returns whether the written
/// archive is non-empty.
///
/// # Example
///
/// ```no_run
/// use meshfiles::MeshModel;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut models = vec![MeshModel::new(), MeshModel::new()];
/// meshfiles::threemf::save(&mut models, "out.3mf")?;
/// assert_eq!(models[1].id, 1);
/// # Ok(())
/// # }
/// ```
pub fn save<P: AsRef<Path>>(models: &mut [MeshModel], path: P) -> Result<bool> {
    save_with_config(models, path, &WriterConfig::default())
}

/// Save models as a 3MF file
pub fn save_with_config<P: AsRef<Path>>(
    models: &mut [MeshModel],
    path: P,
    config: &WriterConfig,
) -> Result<bool> {
    let path = path.as_ref();
    normalize_ids(models);
    let xml = model_xml_string(models)?;
    let written = opc::pack_model_file(&xml, path, config.line_ending())?;

    info!(path = %path.display(), objects = models.len(), "saved 3MF");
    Ok(written)
}
