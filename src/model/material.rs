//! Material colors

use crate::error::{Error, Result};

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// `#2F4F4F`, the color given to models that do not set one
    pub const DARK_SLATE_GRAY: Color = Color {
        r: 0x2F,
        g: 0x4F,
        b: 0x4F,
    };

    /// Create a color from its channels
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `#RRGGBB` form, as written to `displaycolor`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`; the alpha channel is dropped
    pub fn from_hex(value: &str) -> Result<Self> {
        let invalid =
            || Error::parse_error_with_context("displaycolor", value, "#RRGGBB or #RRGGBBAA");

        let digits = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        let is_hex = digits.bytes().all(|b| b.is_ascii_hexdigit());
        if !is_hex || (digits.len() != 6 && digits.len() != 8) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DARK_SLATE_GRAY
    }
}
