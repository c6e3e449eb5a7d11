//! XML parsing for 3MF model files

mod core;

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Color, Matrix4, MeshModel, Point3};

pub use core::{
    parse_base_color, parse_build_item, parse_object_id, parse_transform, parse_triangle,
    parse_vertex,
};

use core::attribute_text;

/// Default buffer capacity for XML parsing (4KB)
const XML_BUFFER_CAPACITY: usize = 4096;

/// Enclosing elements that change how children are read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Build,
    BaseMaterials,
    Other,
}

/// `xmlns` declarations in scope, innermost element last
///
/// Only elements whose namespace equals the root element's namespace are
/// interpreted; everything else is skipped.
#[derive(Debug, Default)]
struct Namespaces {
    /// Per open element: prefix ("" for the default namespace) to URI
    frames: Vec<HashMap<String, String>>,
    /// Namespace of the root element, fixed once the root is seen
    root: Option<Option<String>>,
}

impl Namespaces {
    /// Resolve `prefix` against `own` declarations, then the enclosing elements
    fn resolve(&self, own: &HashMap<String, String>, prefix: &str) -> Option<String> {
        own.get(prefix)
            .or_else(|| self.frames.iter().rev().find_map(|frame| frame.get(prefix)))
            .cloned()
    }

    /// Local name of `qname` if it belongs to the root namespace
    ///
    /// The first element seen fixes the root namespace.
    fn local_name<'a>(
        &mut self,
        own: &HashMap<String, String>,
        qname: &'a str,
    ) -> Option<&'a str> {
        let (prefix, local) = split_qname(qname);
        let uri = self.resolve(own, prefix);
        let root = self.root.get_or_insert_with(|| uri.clone());
        (uri == *root).then_some(local)
    }
}

/// Collect the `xmlns` and `xmlns:p` declarations of one element
fn declarations(e: &BytesStart) -> Result<HashMap<String, String>> {
    let mut declarations = HashMap::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key =
            std::str::from_utf8(attr.key.as_ref()).map_err(|e| Error::InvalidXml(e.to_string()))?;

        if key == "xmlns" {
            declarations.insert(String::new(), attribute_text(&attr.value)?);
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            declarations.insert(prefix.to_string(), attribute_text(&attr.value)?);
        }
    }
    Ok(declarations)
}

fn element_name(e: &BytesStart) -> Result<String> {
    std::str::from_utf8(e.name().as_ref())
        .map(str::to_string)
        .map_err(|e| Error::InvalidXml(e.to_string()))
}

/// Split `prefix:local` into its parts; unprefixed names get prefix ""
fn split_qname(qname: &str) -> (&str, &str) {
    qname.split_once(':').unwrap_or(("", qname))
}

/// Everything collected in one pass over the document
#[derive(Debug, Default)]
struct Collected {
    transforms: HashMap<i32, Matrix4>,
    object_ids: Vec<Option<i32>>,
    positions: Vec<Point3>,
    triangle_indices: Vec<usize>,
    base_colors: Vec<Option<Color>>,
}

impl Collected {
    fn add_build_item(&mut self, objectid: i32, transform: Option<Matrix4>) -> Result<()> {
        let Some(transform) = transform else {
            return Ok(());
        };
        if self.transforms.contains_key(&objectid) {
            return Err(Error::invalid_xml_element(
                "item",
                &format!("object {} already has a build transform", objectid),
            ));
        }
        self.transforms.insert(objectid, transform);
        Ok(())
    }

    fn into_models(self) -> Vec<MeshModel> {
        self.object_ids
            .iter()
            .enumerate()
            .map(|(ordinal, id)| {
                let mut model = MeshModel::new();
                if let Some(id) = *id {
                    model.id = id;
                    if let Some(transform) = self.transforms.get(&id) {
                        model.transform = *transform;
                    }
                }
                if let Some(Some(color)) = self.base_colors.get(ordinal) {
                    model.material_color = *color;
                }
                model.positions = self.positions.clone();
                model.triangle_indices = self.triangle_indices.clone();
                model
            })
            .collect()
    }
}

/// Single-pass state of the model reader
#[derive(Debug, Default)]
struct ModelReader {
    namespaces: Namespaces,
    scopes: Vec<Scope>,
    collected: Collected,
}

impl ModelReader {
    /// Handle an element that has children
    fn open_element(&mut self, e: &BytesStart) -> Result<()> {
        let own = declarations(e)?;
        let scope = self.handle_element(e, &own)?;
        self.namespaces.frames.push(own);
        self.scopes.push(scope);
        Ok(())
    }

    fn close_element(&mut self) {
        self.namespaces.frames.pop();
        self.scopes.pop();
    }

    /// Handle a self-closing element
    fn empty_element(&mut self, e: &BytesStart) -> Result<()> {
        let own = declarations(e)?;
        self.handle_element(e, &own)?;
        Ok(())
    }

    /// Interpret one element, returning the scope it opens
    fn handle_element(&mut self, e: &BytesStart, own: &HashMap<String, String>) -> Result<Scope> {
        let name = element_name(e)?;
        let in_build = self.scopes.contains(&Scope::Build);
        let in_basematerials = self.scopes.contains(&Scope::BaseMaterials);
        let collected = &mut self.collected;

        match self.namespaces.local_name(own, &name) {
            Some("build") => return Ok(Scope::Build),
            Some("basematerials") => return Ok(Scope::BaseMaterials),
            Some("item") if in_build => {
                let (objectid, transform) = parse_build_item(e)?;
                collected.add_build_item(objectid, transform)?;
            }
            Some("object") => collected.object_ids.push(parse_object_id(e)?),
            Some("vertex") => collected.positions.push(parse_vertex(e)?),
            Some("triangle") => collected.triangle_indices.extend(parse_triangle(e)?),
            Some("base") if in_basematerials => {
                collected.base_colors.push(parse_base_color(e)?)
            }
            _ => {}
        }
        Ok(Scope::Other)
    }
}

/// Parse the 3D model XML content into one model per `object` element
///
/// `vertex` and `triangle` elements are gathered from the whole document,
/// not from the enclosing object, so every returned model carries the same
/// geometry. Transforms come from `build/item` elements and colors from the
/// `basematerials/base` element at the same position as the object.
///
/// # Errors
///
/// - [`Error::InvalidXml`] for DTD declarations, a build item without
///   `objectid` or a second transform for the same object
/// - [`Error::InvalidModel`] when a triangle references a missing vertex or
///   the triangle index count is not a multiple of 3
/// - [`Error::ParseError`] for non-numeric coordinates, indices or transform values
/// - [`Error::Xml`] for malformed XML
pub fn parse_model_xml(xml: &str) -> Result<Vec<MeshModel>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::with_capacity(XML_BUFFER_CAPACITY);
    let mut state = ModelReader::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::DocType(_) => {
                // DTD declarations are not allowed (XXE risk)
                return Err(Error::InvalidXml(
                    "DTD declarations are not allowed in 3MF files".to_string(),
                ));
            }
            Event::Start(ref e) => state.open_element(e)?,
            Event::Empty(ref e) => state.empty_element(e)?,
            Event::End(_) => state.close_element(),
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    let collected = state.collected;
    debug!(
        objects = collected.object_ids.len(),
        vertices = collected.positions.len(),
        triangles = collected.triangle_indices.len() / 3,
        "parsed model XML"
    );
    let models = collected.into_models();
    for model in &models {
        model.validate()?;
    }
    Ok(models)
}
