//! XML writing for 3MF model files
//!
//! Serializes a slice of [`MeshModel`]s into one `3dmodel.model` document.

mod core;
mod material;

use std::io::Write as IoWrite;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::error::{Error, Result};
use crate::model::MeshModel;

/// Core 3MF namespace, written as the default namespace
pub const CORE_NAMESPACE: &str = "http://schemas.microsoft.com/3dmanufacturing/core/2015/02";

/// Materials extension namespace, bound to the `m` prefix
pub const MATERIAL_NAMESPACE: &str =
    "http://schemas.microsoft.com/3dmanufacturing/material/2015/02";

/// ID of the single `basematerials` group every triangle refers to
pub(crate) const BASE_MATERIALS_ID: &str = "1";

/// Write models to 3MF model XML
///
/// Produces one `base` per model inside a single `basematerials` group, one
/// `object` per model and one build `item` per model carrying its transform.
/// Object IDs are written as they are; callers wanting unique IDs run
/// [`crate::model::normalize_ids`] first.
pub fn write_model_xml<W: IoWrite>(models: &[MeshModel], writer: W) -> Result<()> {
    let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

    xml_writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| Error::xml_write(format!("Failed to write XML declaration: {}", e)))?;

    let mut model_elem = BytesStart::new("model");
    model_elem.push_attribute(("xmlns", CORE_NAMESPACE));
    model_elem.push_attribute(("unit", "millimeter"));
    model_elem.push_attribute(("xml:lang", "en-US"));
    model_elem.push_attribute(("xmlns:m", MATERIAL_NAMESPACE));

    xml_writer
        .write_event(Event::Start(model_elem))
        .map_err(|e| Error::xml_write(format!("Failed to write model element: {}", e)))?;

    write_resources(&mut xml_writer, models)?;
    write_build(&mut xml_writer, models)?;

    xml_writer
        .write_event(Event::End(BytesEnd::new("model")))
        .map_err(|e| Error::xml_write(format!("Failed to close model element: {}", e)))?;

    Ok(())
}

/// Write models to a model XML string
pub fn model_xml_string(models: &[MeshModel]) -> Result<String> {
    let mut buffer = Vec::new();
    write_model_xml(models, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| Error::xml_write(format!("Model XML is not valid UTF-8: {}", e)))
}

fn write_resources<W: IoWrite>(writer: &mut Writer<W>, models: &[MeshModel]) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("resources")))
        .map_err(|e| Error::xml_write(format!("Failed to write resources element: {}", e)))?;

    material::write_base_materials(writer, models)?;

    for model in models {
        core::write_object(writer, model)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("resources")))
        .map_err(|e| Error::xml_write(format!("Failed to close resources element: {}", e)))?;

    Ok(())
}

fn write_build<W: IoWrite>(writer: &mut Writer<W>, models: &[MeshModel]) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("build")))
        .map_err(|e| Error::xml_write(format!("Failed to write build element: {}", e)))?;

    for model in models {
        let mut elem = BytesStart::new("item");
        elem.push_attribute(("objectid", model.id.to_string().as_str()));
        elem.push_attribute(("transform", transform_string(model).as_str()));

        writer
            .write_event(Event::Empty(elem))
            .map_err(|e| Error::xml_write(format!("Failed to write build item: {}", e)))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("build")))
        .map_err(|e| Error::xml_write(format!("Failed to close build element: {}", e)))?;

    Ok(())
}

/// The 12 affine values in reader order, space separated
fn transform_string(model: &MeshModel) -> String {
    model
        .transform
        .affine_values()
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Matrix4, Point3};

    fn triangle_model(id: i32) -> MeshModel {
        let mut model = MeshModel::with_id(id);
        model.positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        model.triangle_indices = vec![0, 1, 2];
        model
    }

    #[test]
    fn test_write_header() {
        let xml = model_xml_string(&[]).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains(&format!("xmlns=\"{}\"", CORE_NAMESPACE)));
        assert!(xml.contains("unit=\"millimeter\""));
        assert!(xml.contains("xml:lang=\"en-US\""));
        assert!(xml.contains(&format!("xmlns:m=\"{}\"", MATERIAL_NAMESPACE)));
    }

    #[test]
    fn test_write_single_model() {
        let mut model = triangle_model(3);
        model.material_color = Color::new(0xAB, 0x01, 0xFF);
        let xml = model_xml_string(&[model]).unwrap();

        assert!(xml.contains("<basematerials id=\"1\">"));
        assert!(xml.contains("<base name=\"Material\" displaycolor=\"#AB01FF\"/>"));
        assert!(xml.contains("<object id=\"3\" type=\"model\">"));
        assert!(xml.contains("<vertex x=\"1\" y=\"0\" z=\"0\"/>"));
        assert!(xml.contains("<triangle v1=\"0\" v2=\"1\" v3=\"2\" pid=\"1\" p1=\"0\"/>"));
        assert!(xml.contains("<item objectid=\"3\" transform=\"1 0 0 0 1 0 0 0 1 0 0 0\"/>"));
    }

    #[test]
    fn test_write_rounds_vertices() {
        let mut model = triangle_model(1);
        model.positions[0] = Point3::new(1.0000004, -2.1234567, 0.5);
        let xml = model_xml_string(&[model]).unwrap();
        assert!(xml.contains("<vertex x=\"1\" y=\"-2.123457\" z=\"0.5\"/>"));
    }

    #[test]
    fn test_write_transform_row_major() {
        let mut model = triangle_model(1);
        model.transform = Matrix4::from_affine(&[
            2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0, 10.0, 20.5, -30.0,
        ]);
        let xml = model_xml_string(&[model]).unwrap();
        assert!(xml.contains("transform=\"2 0 0 0 2 0 0 0 2 10 20.5 -30\""));
    }

    #[test]
    fn test_one_base_and_object_per_model() {
        let xml = model_xml_string(&[triangle_model(0), triangle_model(1)]).unwrap();
        assert_eq!(xml.matches("<base ").count(), 2);
        assert_eq!(xml.matches("<object ").count(), 2);
        assert_eq!(xml.matches("<item ").count(), 2);
        assert_eq!(xml.matches("<basematerials ").count(), 1);
    }
}
