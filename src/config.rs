//! Writer configuration
//!
//! Everything a writer needs that is not part of the mesh itself is passed in
//! at call time through [`WriterConfig`]. There is no process-wide state.

/// Library name used in the default header banner
const LIBRARY_NAME: &str = "meshfiles Rust Library";

/// Build the fixed banner that identifies the producing library and version
///
/// Both STL writers place this string in their header: the ASCII writer after
/// `solid ` / `endsolid `, the binary writer in the 80-byte header block.
///
/// # Example
///
/// ```
/// let banner = meshfiles::config::default_header_text();
/// assert!(banner.starts_with("Exported from meshfiles"));
/// ```
pub fn default_header_text() -> String {
    format!(
        "Exported from {} v{}",
        LIBRARY_NAME,
        env!("CARGO_PKG_VERSION")
    )
}

/// Line terminator used by text writers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The newline convention of the platform this crate was compiled for
    pub fn platform() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// The terminator as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::platform()
    }
}

/// Configuration for the STL and 3MF writers
///
/// # Example
///
/// ```
/// use meshfiles::config::{LineEnding, WriterConfig};
///
/// let config = WriterConfig::new()
///     .with_header_text("exported by my tool")
///     .with_line_ending(LineEnding::CrLf);
/// assert_eq!(config.header_text(), "exported by my tool");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    header_text: String,
    line_ending: LineEnding,
}

impl WriterConfig {
    /// Create a configuration with the library banner and platform newlines
    pub fn new() -> Self {
        Self {
            header_text: default_header_text(),
            line_ending: LineEnding::platform(),
        }
    }

    /// Replace the header banner
    pub fn with_header_text(mut self, header_text: impl Into<String>) -> Self {
        self.header_text = header_text.into();
        self
    }

    /// Replace the line terminator used by text output
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Header banner written by the STL writers
    pub fn header_text(&self) -> &str {
        &self.header_text
    }

    /// Line terminator for text output
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self::new()
    }
}
