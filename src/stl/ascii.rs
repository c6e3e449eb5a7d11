//! ASCII STL reading and writing
//!
//! ```text
//! solid <header>
//! facet normal nx ny nz
//!  outer loop
//!   vertex x y z
//!   vertex x y z
//!   vertex x y z
//!  endloop
//! endfacet
//! endsolid <header>
//! ```
//!
//! Facet blocks are located by scanning for `facet ` and the following
//! `endfacet`; anything between blocks is ignored. LF and CRLF line endings
//! are both accepted.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::config::WriterConfig;
use crate::error::{Error, Result};
use crate::file;
use crate::model::{MeshModel, Point3, SoupTriangle, SoupVertex, Vector3};
use crate::numeric::{format_rounded, parse_float};
use crate::text::decode_text;

const SOLID_TOKEN: &str = "solid ";
const FACET_START_TOKEN: &str = "facet ";
const FACET_END_TOKEN: &str = "endfacet";

/// Lines in one facet block
const FACET_LINE_COUNT: usize = 7;

const FACET_SHAPE: &str = "facet normal X Y Z, outer loop, vertex X Y Z, vertex X Y Z, \
                           vertex X Y Z, endloop, endfacet";
const NORMAL_EXAMPLE: &str = "Expected format: \"facet normal 4.004000 2.000000 0.000001\"";
const VERTEX_EXAMPLE: &str = "Expected format: \"vertex 4.004000 2.000000 0.000001\"";

/// Load an ASCII STL file
///
/// # Errors
///
/// - [`Error::NotFound`] / [`Error::EmptyFile`] for a missing or empty file
/// - [`Error::InvalidFormat`] when the text does not start with `solid ` or a
///   facet block is malformed
/// - [`Error::ParseError`] when a coordinate is not a number
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let model = meshfiles::stl::ascii::load("part.stl")?;
/// println!("{} triangles", model.triangle_count());
/// # Ok(())
/// # }
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<MeshModel> {
    let path = path.as_ref();
    file::ensure_non_empty(path)?;

    let bytes = fs::read(path)?;
    let model = parse_str(&decode_text(&bytes))?;

    info!(
        path = %path.display(),
        triangles = model.triangle_count(),
        "loaded ASCII STL"
    );
    Ok(model)
}

/// Read ASCII STL from a reader
pub fn read<R: Read>(mut reader: R) -> Result<MeshModel> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_str(&decode_text(&bytes))
}

/// Parse ASCII STL text
///
/// Every facet becomes three new vertices; no vertices are shared.
pub fn parse_str(contents: &str) -> Result<MeshModel> {
    if !contents.starts_with(SOLID_TOKEN) {
        return Err(Error::invalid_format_context(
            "ASCII STL",
            &format!("Expected file to begin with line: \"{}\"", SOLID_TOKEN),
        ));
    }

    let mut model = MeshModel::new();
    let mut remaining = contents;
    let mut facet_number = 0;

    while let Some((block, rest)) = extract_facet(remaining, facet_number + 1)? {
        facet_number += 1;
        let triangle = parse_facet(block, facet_number)?;
        model.append_triangle(&triangle);
        remaining = rest;
    }

    debug!(facets = facet_number, "parsed ASCII STL facets");
    Ok(model)
}

/// Split off the next `facet ... endfacet` block, returning it and the text after it
///
/// A `facet ` with no `endfacet` after it is a truncated block and fails.
fn extract_facet(contents: &str, facet_number: usize) -> Result<Option<(&str, &str)>> {
    let Some(start) = contents.find(FACET_START_TOKEN) else {
        return Ok(None);
    };
    let Some(length) = contents[start..].find(FACET_END_TOKEN) else {
        return Err(Error::invalid_format_context(
            &format!("STL facet {}", facet_number),
            &format!("Block is not terminated by \"{}\"", FACET_END_TOKEN),
        ));
    };
    let end = start + length + FACET_END_TOKEN.len();
    Ok(Some((&contents[start..end], &contents[end..])))
}

fn parse_facet(block: &str, facet_number: usize) -> Result<SoupTriangle> {
    // whitespace-only lines still count towards the seven
    let lines: Vec<&str> = block.lines().filter(|line| !line.is_empty()).collect();

    if lines.len() != FACET_LINE_COUNT {
        return Err(Error::invalid_format_context(
            &format!("STL facet {}", facet_number),
            &format!(
                "Expected {} lines: {} (found {})",
                FACET_LINE_COUNT,
                FACET_SHAPE,
                lines.len()
            ),
        ));
    }

    // lines[1] is "outer loop" and lines[5] is "endloop"; neither is checked
    let normal = parse_normal_line(lines[0])?;
    let a = parse_vertex_line(lines[2])?;
    let b = parse_vertex_line(lines[3])?;
    let c = parse_vertex_line(lines[4])?;

    Ok(SoupTriangle::with_normal(normal, a, b, c))
}

fn parse_normal_line(line: &str) -> Result<Vector3> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 5 {
        return Err(Error::invalid_format_context(
            "STL facet normal",
            &format!(
                "Expected 5 parts delimited by spaces in \"{}\". {}",
                line.trim(),
                NORMAL_EXAMPLE
            ),
        ));
    }

    if !parts[0].eq_ignore_ascii_case("facet") || !parts[1].eq_ignore_ascii_case("normal") {
        return Err(Error::invalid_format_context(
            "STL facet normal",
            &format!("Unexpected keywords in \"{}\". {}", line.trim(), NORMAL_EXAMPLE),
        ));
    }

    let [x, y, z] = parse_components(&parts[2..], "facet normal component")?;
    Ok(Vector3::new(x, y, z))
}

fn parse_vertex_line(line: &str) -> Result<SoupVertex> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 4 {
        return Err(Error::invalid_format_context(
            "STL vertex",
            &format!(
                "Expected 4 parts delimited by spaces in \"{}\". {}",
                line.trim(),
                VERTEX_EXAMPLE
            ),
        ));
    }

    if !parts[0].eq_ignore_ascii_case("vertex") {
        return Err(Error::invalid_format_context(
            "STL vertex",
            &format!("Unexpected keyword in \"{}\". {}", line.trim(), VERTEX_EXAMPLE),
        ));
    }

    let [x, y, z] = parse_components(&parts[1..], "vertex coordinate")?;
    Ok(SoupVertex::at(Point3::new(x, y, z)))
}

fn parse_components(tokens: &[&str], field_name: &str) -> Result<[f64; 3]> {
    let mut values = [0.0; 3];
    for (value, token) in values.iter_mut().zip(tokens) {
        *value = parse_float(token).ok_or_else(|| {
            Error::parse_error_with_context(field_name, token, "floating-point number")
        })?;
    }
    Ok(values)
}

/// Save a model as ASCII STL using the default [`WriterConfig`]
///
/// Any existing file at `path` is deleted first. An empty model still produces
/// a `solid` / `endsolid` pair.
pub fn save<P: AsRef<Path>>(model: &MeshModel, path: P) -> Result<()> {
    save_with_config(model, path, &WriterConfig::default())
}

/// Save a model as ASCII STL
pub fn save_with_config<P: AsRef<Path>>(
    model: &MeshModel,
    path: P,
    config: &WriterConfig,
) -> Result<()> {
    let path = path.as_ref();
    file::remove_existing(path)?;

    let file = File::create(path)?;
    write_with_config(model, BufWriter::new(file), config)?;

    info!(
        path = %path.display(),
        triangles = model.triangle_count(),
        "saved ASCII STL"
    );
    Ok(())
}

/// Write a model as ASCII STL using the default [`WriterConfig`]
pub fn write<W: Write>(model: &MeshModel, writer: W) -> Result<()> {
    write_with_config(model, writer, &WriterConfig::default())
}

/// Write a model as ASCII STL
///
/// Coordinates and normal components are rounded to 6 decimal places.
pub fn write_with_config<W: Write>(
    model: &MeshModel,
    mut writer: W,
    config: &WriterConfig,
) -> Result<()> {
    let soup = model.to_triangle_soup()?;
    let newline = config.line_ending().as_str();
    let header = config.header_text();

    write!(writer, "solid {}{}", header, newline)?;
    for triangle in &soup {
        write_facet(&mut writer, triangle, newline)?;
    }
    write!(writer, "endsolid {}{}", header, newline)?;

    writer.flush()?;
    Ok(())
}

fn write_facet<W: Write>(writer: &mut W, triangle: &SoupTriangle, newline: &str) -> Result<()> {
    let normal = triangle.normal_or_zero();
    write!(
        writer,
        "facet normal {} {} {}{}",
        format_rounded(normal.x),
        format_rounded(normal.y),
        format_rounded(normal.z),
        newline
    )?;
    write!(writer, "outer loop{}", newline)?;
    for vertex in [&triangle.a, &triangle.b, &triangle.c] {
        let p = vertex.location;
        write!(
            writer,
            "vertex {} {} {}{}",
            format_rounded(p.x),
            format_rounded(p.y),
            format_rounded(p.z),
            newline
        )?;
    }
    write!(writer, "endloop{}", newline)?;
    write!(writer, "endfacet{}", newline)?;
    Ok(())
}
