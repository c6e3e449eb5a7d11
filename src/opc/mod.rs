//! OPC (Open Packaging Conventions) handling for 3MF files
//!
//! A 3MF file is a ZIP archive holding the model XML plus two fixed manifest
//! parts. Only the model part is read back; the manifests are written but
//! never validated.

mod reader;
mod writer;

pub use reader::{extract_model_file, read_model_entry};
pub use writer::{create_package, pack_model_file};

/// Main 3D model file path within the 3MF archive
pub const MODEL_PATH: &str = "3D/3dmodel.model";

/// Content types file path
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";

/// Relationships file path
pub const RELS_PATH: &str = "_rels/.rels";

/// Fixed `_rels/.rels` document pointing at the model part
pub const RELS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Type="http://schemas.microsoft.com/3dmanufacturing/2013/01/3dmodel" Target="/3D/3dmodel.model" Id="rel0" />
</Relationships>"#;

/// Fixed `[Content_Types].xml` document
pub const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
	<Default Extension="jpeg" ContentType="image/jpeg" />
	<Default Extension="jpg" ContentType="image/jpeg" />
	<Default Extension="model" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodel+xml" />
	<Default Extension="png" ContentType="image/png" />
	<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml" />
	<Default Extension="texture" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodeltexture" />
</Types>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineEnding;
    use crate::error::ErrorKind;
    use std::io::{Cursor, Read, Write};
    use zip::ZipArchive;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_package_constants() {
        assert_eq!(MODEL_PATH, "3D/3dmodel.model");
        assert_eq!(CONTENT_TYPES_PATH, "[Content_Types].xml");
        assert!(RELS_XML.contains(
            "Type=\"http://schemas.microsoft.com/3dmanufacturing/2013/01/3dmodel\""
        ));
        assert!(RELS_XML.contains("Target=\"/3D/3dmodel.model\""));
    }

    #[test]
    fn test_package_entry_order_and_contents() {
        let cursor = create_package(Cursor::new(Vec::new()), "<model/>", LineEnding::Lf).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names.len(), 3);

        let order: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(order, vec![RELS_PATH, CONTENT_TYPES_PATH, MODEL_PATH]);

        let mut model = String::new();
        archive
            .by_name(MODEL_PATH)
            .unwrap()
            .read_to_string(&mut model)
            .unwrap();
        assert_eq!(model, "<model/>\n");

        let mut types = String::new();
        archive
            .by_name(CONTENT_TYPES_PATH)
            .unwrap()
            .read_to_string(&mut types)
            .unwrap();
        for ext in ["jpeg", "jpg", "model", "png", "rels", "texture"] {
            assert!(types.contains(&format!("Extension=\"{}\"", ext)));
        }
    }

    #[test]
    fn test_read_model_entry_roundtrip() {
        let cursor =
            create_package(Cursor::new(Vec::new()), "<model/>", LineEnding::CrLf).unwrap();
        let text = read_model_entry(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(text, "<model/>\r\n");
    }

    #[test]
    fn test_model_entry_name_is_case_insensitive() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("3d/3DMODEL.MODEL", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<model/>").unwrap();
        let cursor = zip.finish().unwrap();

        let text = read_model_entry(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(text, "<model/>");
    }

    #[test]
    fn test_archive_without_model_entry() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("readme.txt", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"hello").unwrap();
        let cursor = zip.finish().unwrap();

        let err = read_model_entry(Cursor::new(cursor.into_inner())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuralFormat);
        assert!(err.to_string().contains(MODEL_PATH));
    }

    #[test]
    fn test_non_zip_input_is_zip_error() {
        let err = read_model_entry(Cursor::new(b"solid not a zip".to_vec())).unwrap_err();
        assert!(matches!(err, crate::error::Error::Zip(_)));
    }
}
