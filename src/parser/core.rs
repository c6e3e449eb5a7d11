//! Core 3MF element parsing
//!
//! Attribute-level parsing for the elements the reader understands: build
//! items, objects, vertices, triangles and base materials.

use quick_xml::escape::unescape;
use quick_xml::events::BytesStart;
use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{AFFINE_VALUE_COUNT, Color, Matrix4, Point3};
use crate::numeric::{parse_float, parse_i32, parse_index};

/// Decode a raw attribute value, resolving entity and character references
pub(super) fn attribute_text(raw: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(raw).map_err(|e| Error::InvalidXml(e.to_string()))?;
    let text = unescape(text).map_err(|e| Error::XmlAttr(e.to_string()))?;
    Ok(text.into_owned())
}

/// Look up an unprefixed attribute by name
fn attribute_value(e: &BytesStart, name: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name.as_bytes() {
            return attribute_text(&attr.value).map(Some);
        }
    }
    Ok(None)
}

/// Parse a `build/item` element into its object ID and optional transform
///
/// `objectid` is required and must be an integer. A missing or blank
/// `transform` yields `None`.
pub fn parse_build_item(e: &BytesStart) -> Result<(i32, Option<Matrix4>)> {
    let objectid = attribute_value(e, "objectid")?
        .ok_or_else(|| Error::missing_attribute("item", "objectid"))?;
    let objectid = parse_i32(&objectid)
        .ok_or_else(|| Error::parse_error_with_context("item objectid", &objectid, "integer"))?;

    let transform = match attribute_value(e, "transform")? {
        Some(value) => parse_transform(&value)?,
        None => None,
    };

    Ok((objectid, transform))
}

/// Parse a whitespace-delimited 12-value affine transform
///
/// Blank input and token counts other than 12 yield `None`. A token that is
/// not a number is an error.
pub fn parse_transform(value: &str) -> Result<Option<Matrix4>> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(None);
    }
    if tokens.len() != AFFINE_VALUE_COUNT {
        warn!(
            values = tokens.len(),
            "transform does not have {} values, ignoring", AFFINE_VALUE_COUNT
        );
        return Ok(None);
    }

    let mut values = [0.0; AFFINE_VALUE_COUNT];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        *slot = parse_float(token).ok_or_else(|| {
            Error::parse_error_with_context("item transform", token, "floating-point number")
        })?;
    }

    Ok(Some(Matrix4::from_affine(&values)))
}

/// Parse the `id` of an `object` element
///
/// A missing or non-integer ID is tolerated and reported as `None`.
pub fn parse_object_id(e: &BytesStart) -> Result<Option<i32>> {
    let id = attribute_value(e, "id")?;
    let parsed = id.as_deref().and_then(parse_i32);
    if parsed.is_none() {
        warn!(id = ?id, "object has no usable id, keeping the unassigned id");
    }
    Ok(parsed)
}

/// Parse a `vertex` element; absent coordinates are 0
pub fn parse_vertex(e: &BytesStart) -> Result<Point3> {
    let mut coords = [0.0; 3];
    for (slot, name) in coords.iter_mut().zip(["x", "y", "z"]) {
        if let Some(value) = attribute_value(e, name)? {
            *slot = parse_float(&value).ok_or_else(|| {
                Error::parse_error_with_context(
                    &format!("vertex {}", name),
                    &value,
                    "floating-point number",
                )
            })?;
        }
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

/// Parse a `triangle` element; absent indices are 0
pub fn parse_triangle(e: &BytesStart) -> Result<[usize; 3]> {
    let mut indices = [0; 3];
    for (slot, name) in indices.iter_mut().zip(["v1", "v2", "v3"]) {
        if let Some(value) = attribute_value(e, name)? {
            *slot = parse_index(&value).ok_or_else(|| {
                Error::parse_error_with_context(
                    &format!("triangle {}", name),
                    &value,
                    "non-negative integer",
                )
            })?;
        }
    }
    Ok(indices)
}

/// Parse the `displaycolor` of a `base` element, if present
pub fn parse_base_color(e: &BytesStart) -> Result<Option<Color>> {
    attribute_value(e, "displaycolor")?
        .map(|value| Color::from_hex(&value))
        .transpose()
}
