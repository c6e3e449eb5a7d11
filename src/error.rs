//! Error types for mesh file operations
//!
//! Every error carries an error code for categorization and a message that
//! names the offending file, field, attribute or line.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O, filesystem and archive errors
//! - **E2xxx**: XML and text grammar errors
//! - **E3xxx**: Model and numeric errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error reading or writing a stream
//! - `E1002`: ZIP archive format error
//! - `E1003`: Missing required entry in archive
//! - `E1004`: Source file not found
//! - `E1005`: Source file is empty
//! - `E2001`: XML parsing error
//! - `E2002`: XML attribute error
//! - `E2003`: Invalid XML structure
//! - `E2004`: Invalid file format (STL grammar)
//! - `E2005`: XML writing error
//! - `E3001`: Invalid model structure
//! - `E3002`: Numeric parse error

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh file operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
///
/// Callers that only care about what went wrong (rather than where) can
/// branch on this instead of matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The source path does not exist
    NotFound,
    /// The source file has zero length
    EmptyFile,
    /// Wrong element or line count, missing archive entry, index out of bounds
    StructuralFormat,
    /// A token that must be a number failed to parse
    NumericParse,
    /// Underlying read, write or stream fault
    Io,
}

/// Errors that can occur when reading or writing mesh files
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading or writing
    ///
    /// **Error Code**: E1001
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// ZIP archive error
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Corrupted ZIP file
    /// - Truncated archive
    /// - A non-archive file handed to the 3MF reader
    #[error("[E1002] ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Missing required entry in the archive
    ///
    /// **Error Code**: E1003
    #[error("[E1003] Missing required file: {0}")]
    MissingFile(String),

    /// Source path does not exist
    ///
    /// **Error Code**: E1004
    #[error("[E1004] File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Source file has zero length
    ///
    /// **Error Code**: E1005
    #[error("[E1005] File is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    /// XML parsing error
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Malformed XML syntax
    /// - Unclosed tags
    #[error("[E2001] XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error
    ///
    /// **Error Code**: E2002
    #[error("[E2002] XML attribute error: {0}")]
    XmlAttr(String),

    /// Invalid XML structure
    ///
    /// **Error Code**: E2003
    ///
    /// **Common Causes**:
    /// - Missing required attribute (e.g. `objectid` on a build item)
    /// - DTD declarations
    #[error("[E2003] Invalid XML structure: {0}")]
    InvalidXml(String),

    /// Invalid file format
    ///
    /// **Error Code**: E2004
    ///
    /// **Common Causes**:
    /// - ASCII STL not starting with `solid `
    /// - Facet block with a line count other than 7
    /// - Wrong keyword or token count on a `facet normal` or `vertex` line
    #[error("[E2004] Invalid format: {0}")]
    InvalidFormat(String),

    /// XML writing error
    ///
    /// **Error Code**: E2005
    #[error("[E2005] XML writing error: {0}")]
    XmlWrite(String),

    /// Invalid model structure
    ///
    /// **Error Code**: E3001
    ///
    /// **Common Causes**:
    /// - Triangle index count not a multiple of 3
    /// - Out-of-bounds vertex indices
    /// - Normal count not matching triangle count
    #[error("[E3001] Invalid model: {0}")]
    InvalidModel(String),

    /// Parse error for numeric values
    ///
    /// **Error Code**: E3002
    ///
    /// **Suggestions**:
    /// - Verify numeric values use proper format (e.g., "1.5" not "1,5")
    #[error("[E3002] Parse error: {0}")]
    ParseError(String),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttr(format!("Attribute parsing failed: {}", err))
    }
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::EmptyFile(_) => ErrorKind::EmptyFile,
            Error::ParseError(_) => ErrorKind::NumericParse,
            Error::Io(_) | Error::XmlWrite(_) => ErrorKind::Io,
            Error::Zip(zip::result::ZipError::Io(_)) => ErrorKind::Io,
            Error::Zip(_)
            | Error::MissingFile(_)
            | Error::Xml(_)
            | Error::XmlAttr(_)
            | Error::InvalidXml(_)
            | Error::InvalidFormat(_)
            | Error::InvalidModel(_) => ErrorKind::StructuralFormat,
        }
    }

    /// Create an InvalidXml error with element context
    pub fn invalid_xml_element(element: &str, message: &str) -> Self {
        Error::InvalidXml(format!("Element '<{}>': {}", element, message))
    }

    /// Create an InvalidXml error for a missing required attribute
    pub fn missing_attribute(element: &str, attribute: &str) -> Self {
        Error::InvalidXml(format!(
            "Element '<{}>' is missing required attribute '{}'",
            element, attribute
        ))
    }

    /// Create an InvalidFormat error with context about what structure is invalid
    ///
    /// # Arguments
    /// * `context` - What part of the format is invalid (e.g., "STL facet block")
    /// * `message` - Description of the error
    pub fn invalid_format_context(context: &str, message: &str) -> Self {
        Error::InvalidFormat(format!("{}: {}", context, message))
    }

    /// Create a ParseError with context about what was being parsed
    ///
    /// # Arguments
    /// * `field_name` - The name of the field being parsed (e.g., "vertex x coordinate")
    /// * `value` - The value that failed to parse
    /// * `expected_type` - The expected type (e.g., "floating-point number")
    pub fn parse_error_with_context(field_name: &str, value: &str, expected_type: &str) -> Self {
        Error::ParseError(format!(
            "Failed to parse '{}': expected {}, got '{}'. \
             Verify the value is properly formatted.",
            field_name, expected_type, value
        ))
    }

    /// Create an XmlWrite error
    pub fn xml_write(message: String) -> Self {
        Error::XmlWrite(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_messages() {
        let io_err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "test"));
        assert!(io_err.to_string().contains("[E1001]"));

        let missing_file = Error::MissingFile("3D/3dmodel.model".to_string());
        assert!(missing_file.to_string().contains("[E1003]"));

        let not_found = Error::NotFound(PathBuf::from("missing.stl"));
        assert!(not_found.to_string().contains("[E1004]"));
        assert!(not_found.to_string().contains("missing.stl"));

        let empty = Error::EmptyFile(PathBuf::from("empty.3mf"));
        assert!(empty.to_string().contains("[E1005]"));

        let invalid_model = Error::InvalidModel("test error".to_string());
        assert!(invalid_model.to_string().contains("[E3001]"));

        let parse_err = Error::ParseError("test".to_string());
        assert!(parse_err.to_string().contains("[E3002]"));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::NotFound(PathBuf::from("a")).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            Error::EmptyFile(PathBuf::from("a")).kind(),
            ErrorKind::EmptyFile
        );
        assert_eq!(
            Error::MissingFile("3D/3dmodel.model".into()).kind(),
            ErrorKind::StructuralFormat
        );
        assert_eq!(
            Error::InvalidFormat("7 lines".into()).kind(),
            ErrorKind::StructuralFormat
        );
        assert_eq!(
            Error::InvalidModel("index".into()).kind(),
            ErrorKind::StructuralFormat
        );
        assert_eq!(
            Error::ParseError("x".into()).kind(),
            ErrorKind::NumericParse
        );
        assert_eq!(
            Error::Io(io::Error::other("boom")).kind(),
            ErrorKind::Io
        );
    }

    #[test]
    fn test_parse_error_with_context_helper() {
        let err =
            Error::parse_error_with_context("vertex x coordinate", "abc", "floating-point number");
        assert!(err.to_string().contains("vertex x coordinate"));
        assert!(err.to_string().contains("floating-point number"));
        assert!(err.to_string().contains("'abc'"));
        assert!(err.to_string().contains("[E3002]"));
        assert_eq!(err.kind(), ErrorKind::NumericParse);
    }

    #[test]
    fn test_missing_attribute_helper() {
        let err = Error::missing_attribute("item", "objectid");
        assert!(err.to_string().contains("Element '<item>'"));
        assert!(err.to_string().contains("missing required attribute 'objectid'"));
        assert!(err.to_string().contains("[E2003]"));
    }

    #[test]
    fn test_invalid_xml_element_helper() {
        let err = Error::invalid_xml_element("basematerials", "nested inside another group");
        assert_eq!(
            err.to_string(),
            "[E2003] Invalid XML structure: Element '<basematerials>': nested inside another group"
        );
        assert_eq!(err.kind(), ErrorKind::StructuralFormat);
    }

    #[test]
    fn test_invalid_format_context_helper() {
        let err = Error::invalid_format_context("STL facet block", "Expected 7 lines");
        assert!(err.to_string().contains("STL facet block"));
        assert!(err.to_string().contains("Expected 7 lines"));
        assert!(err.to_string().contains("[E2004]"));
    }
}
