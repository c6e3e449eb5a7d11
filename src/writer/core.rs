//! Object and mesh writing

use std::io::Write as IoWrite;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use super::BASE_MATERIALS_ID;
use crate::error::{Error, Result};
use crate::model::MeshModel;
use crate::numeric::format_rounded;

/// Write an `object` element with its mesh
pub(super) fn write_object<W: IoWrite>(writer: &mut Writer<W>, model: &MeshModel) -> Result<()> {
    let mut elem = BytesStart::new("object");
    elem.push_attribute(("id", model.id.to_string().as_str()));
    elem.push_attribute(("type", "model"));

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::xml_write(format!("Failed to write object element: {}", e)))?;

    write_mesh(writer, model)?;

    writer
        .write_event(Event::End(BytesEnd::new("object")))
        .map_err(|e| Error::xml_write(format!("Failed to close object element: {}", e)))?;

    Ok(())
}

/// Write a mesh
///
/// Coordinates are rounded to 6 decimal places. Every triangle points at the
/// first entry of the shared base material group. A trailing partial group
/// of indices is dropped.
fn write_mesh<W: IoWrite>(writer: &mut Writer<W>, model: &MeshModel) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("mesh")))
        .map_err(|e| Error::xml_write(format!("Failed to write mesh element: {}", e)))?;

    writer
        .write_event(Event::Start(BytesStart::new("vertices")))
        .map_err(|e| Error::xml_write(format!("Failed to write vertices element: {}", e)))?;

    for vertex in &model.positions {
        let mut v_elem = BytesStart::new("vertex");
        v_elem.push_attribute(("x", format_rounded(vertex.x).as_str()));
        v_elem.push_attribute(("y", format_rounded(vertex.y).as_str()));
        v_elem.push_attribute(("z", format_rounded(vertex.z).as_str()));

        writer
            .write_event(Event::Empty(v_elem))
            .map_err(|e| Error::xml_write(format!("Failed to write vertex: {}", e)))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("vertices")))
        .map_err(|e| Error::xml_write(format!("Failed to close vertices element: {}", e)))?;

    writer
        .write_event(Event::Start(BytesStart::new("triangles")))
        .map_err(|e| Error::xml_write(format!("Failed to write triangles element: {}", e)))?;

    for triangle in model.triangle_indices.chunks_exact(3) {
        let mut t_elem = BytesStart::new("triangle");
        t_elem.push_attribute(("v1", triangle[0].to_string().as_str()));
        t_elem.push_attribute(("v2", triangle[1].to_string().as_str()));
        t_elem.push_attribute(("v3", triangle[2].to_string().as_str()));
        t_elem.push_attribute(("pid", BASE_MATERIALS_ID));
        t_elem.push_attribute(("p1", "0"));

        writer
            .write_event(Event::Empty(t_elem))
            .map_err(|e| Error::xml_write(format!("Failed to write triangle: {}", e)))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("triangles")))
        .map_err(|e| Error::xml_write(format!("Failed to close triangles element: {}", e)))?;

    writer
        .write_event(Event::End(BytesEnd::new("mesh")))
        .map_err(|e| Error::xml_write(format!("Failed to close mesh element: {}", e)))?;

    Ok(())
}
