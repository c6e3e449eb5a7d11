//! Package writing functionality for creating 3MF files

use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use tracing::debug;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::{CONTENT_TYPES_PATH, CONTENT_TYPES_XML, MODEL_PATH, RELS_PATH, RELS_XML};
use crate::config::LineEnding;
use crate::error::Result;

/// Create a 3MF package (ZIP archive) from model XML
///
/// Entries are written in this order, each followed by one line terminator:
/// - `_rels/.rels`
/// - `[Content_Types].xml`
/// - `3D/3dmodel.model`
///
/// Returns the writer after finishing the ZIP archive.
pub fn create_package<W: Write + Seek>(
    writer: W,
    model_xml: &str,
    line_ending: LineEnding,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default();

    for (name, contents) in [
        (RELS_PATH, RELS_XML),
        (CONTENT_TYPES_PATH, CONTENT_TYPES_XML),
        (MODEL_PATH, model_xml),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(contents.as_bytes())?;
        zip.write_all(line_ending.as_str().as_bytes())?;
    }

    Ok(zip.finish()?)
}

/// Write model XML to a new 3MF file, replacing any existing one
///
/// Returns whether the resulting file is non-empty.
pub fn pack_model_file<P: AsRef<Path>>(
    model_xml: &str,
    path: P,
    line_ending: LineEnding,
) -> Result<bool> {
    let path = path.as_ref();
    let file = File::create(path)?;

    let mut writer = create_package(BufWriter::new(file), model_xml, line_ending)?;
    writer.flush()?;
    drop(writer);

    let len = fs::metadata(path)?.len();
    debug!(path = %path.display(), bytes = len, "packed 3MF archive");
    Ok(len > 0)
}
