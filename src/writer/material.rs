//! Base material writing

use std::io::Write as IoWrite;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use super::BASE_MATERIALS_ID;
use crate::error::{Error, Result};
use crate::model::MeshModel;

/// Name given to every base material entry
const BASE_MATERIAL_NAME: &str = "Material";

/// Write the `basematerials` group, one `base` per model in model order
pub(super) fn write_base_materials<W: IoWrite>(
    writer: &mut Writer<W>,
    models: &[MeshModel],
) -> Result<()> {
    let mut elem = BytesStart::new("basematerials");
    elem.push_attribute(("id", BASE_MATERIALS_ID));

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::xml_write(format!("Failed to write basematerials element: {}", e)))?;

    for model in models {
        let mut mat_elem = BytesStart::new("base");
        mat_elem.push_attribute(("name", BASE_MATERIAL_NAME));
        mat_elem.push_attribute(("displaycolor", model.material_color.to_hex().as_str()));

        writer
            .write_event(Event::Empty(mat_elem))
            .map_err(|e| Error::xml_write(format!("Failed to write base material: {}", e)))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("basematerials")))
        .map_err(|e| Error::xml_write(format!("Failed to close basematerials element: {}", e)))?;

    Ok(())
}
