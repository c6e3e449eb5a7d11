//! STL reading and writing
//!
//! STL stores a mesh as independent triangles. Loading never merges shared
//! vertices, so a model read from STL has three positions per triangle.
//!
//! The [`ascii`] and [`binary`] modules handle one encoding each. [`load`]
//! picks the encoding from the file contents.

pub mod ascii;
pub mod binary;

use std::fs;
use std::io::Cursor;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::error::Result;
use crate::file;
use crate::model::MeshModel;
use crate::text::decode_text;

/// The two STL encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlEncoding {
    /// Text `solid` / `facet` / `vertex` grammar
    Ascii,
    /// 80-byte header, triangle count and fixed 50-byte records
    Binary,
}

/// Guess the encoding of STL bytes
///
/// Data is ASCII when it begins with `solid ` (after an optional UTF-8 BOM),
/// unless its length is exactly what the binary count field at offset 80
/// predicts. Some binary exporters write `solid` into the header, and the
/// length check keeps those files binary.
pub fn detect_encoding(bytes: &[u8]) -> StlEncoding {
    let text = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if !text.starts_with(b"solid ") {
        return StlEncoding::Binary;
    }

    if bytes.len() >= binary::RECORDS_OFFSET {
        let count = LittleEndian::read_u32(&bytes[binary::HEADER_SIZE..binary::RECORDS_OFFSET]);
        let expected = binary::RECORDS_OFFSET as u64 + binary::RECORD_SIZE as u64 * u64::from(count);
        if expected == bytes.len() as u64 {
            return StlEncoding::Binary;
        }
    }

    StlEncoding::Ascii
}

/// Load an STL file in either encoding
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let model = meshfiles::stl::load("bracket.stl")?;
/// assert_eq!(model.positions.len(), model.triangle_count() * 3);
/// # Ok(())
/// # }
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<MeshModel> {
    let path = path.as_ref();
    file::ensure_non_empty(path)?;

    let bytes = fs::read(path)?;
    let encoding = detect_encoding(&bytes);
    debug!(path = %path.display(), ?encoding, "detected STL encoding");

    match encoding {
        StlEncoding::Ascii => ascii::parse_str(&decode_text(&bytes)),
        StlEncoding::Binary => binary::read(Cursor::new(bytes)),
    }
}
