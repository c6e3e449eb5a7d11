//! Locating and decoding the model part of a package

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use super::MODEL_PATH;
use crate::error::{Error, Result};
use crate::file;
use crate::text::decode_text;

/// Read the model XML out of a 3MF archive
///
/// The entry name is matched against `3D/3dmodel.model` without regard to
/// case; a leading `/` is tolerated. The text encoding is taken from the
/// entry's byte-order mark, defaulting to UTF-8.
///
/// # Errors
///
/// - [`Error::Zip`] if the input is not a readable ZIP archive
/// - [`Error::MissingFile`] if no entry matches the model path
pub fn read_model_entry<R: Read + Seek>(reader: R) -> Result<String> {
    let mut archive = ZipArchive::new(reader)?;

    let name = archive
        .file_names()
        .find(|name| is_model_entry(name))
        .map(str::to_owned)
        .ok_or_else(|| Error::MissingFile(MODEL_PATH.to_string()))?;

    let mut entry = archive.by_name(&name)?;
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut bytes)?;

    debug!(entry = %name, bytes = bytes.len(), "read model entry");
    Ok(decode_text(&bytes))
}

/// Read the model XML out of a 3MF file on disk
///
/// # Errors
///
/// [`Error::NotFound`] or [`Error::EmptyFile`] before the archive is opened,
/// otherwise as [`read_model_entry`].
pub fn extract_model_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    file::ensure_non_empty(path)?;

    let file = File::open(path)?;
    read_model_entry(BufReader::new(file))
}

fn is_model_entry(name: &str) -> bool {
    name.strip_prefix('/')
        .unwrap_or(name)
        .eq_ignore_ascii_case(MODEL_PATH)
}
