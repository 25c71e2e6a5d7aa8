// Hex color parsing and alpha blending for chart fills
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 6 hex digits, got {0} characters")]
    InvalidLength(usize),
    #[error("invalid hex digit in color {0:?}")]
    InvalidHex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(color: &str) -> Result<Self, ColorParseError> {
        let hex = color.strip_prefix('#').unwrap_or(color);
        if hex.len() != 6 {
            return Err(ColorParseError::InvalidLength(hex.len()));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(color.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ColorParseError::InvalidHex(color.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            rgb: self,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

/// CSS color string for `color` at `alpha` opacity.
///
/// Colors that are not 6-digit hex are returned untouched so a named or
/// already-translucent color still paints something.
pub fn with_alpha(color: &str, alpha: f64) -> String {
    match Rgb::from_hex(color) {
        Ok(rgb) => rgb.with_alpha(alpha).to_string(),
        Err(_) => color.to_string(),
    }
}
