//! Material colour parsing
//!
//! Colours arrive from the UI as a 6-digit hex string (optionally
//! prefixed with `#`) and an independent decimal alpha channel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fully opaque alpha
pub const OPAQUE: u8 = 255;

/// Input parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid hex colour: {0:?}")]
    InvalidHex(String),

    #[error("Invalid channel value: {0:?}")]
    InvalidChannel(String),

    #[error("Scene name must not be empty")]
    EmptyName,

    #[error("Scene name is {len} bytes, the limit is {max}")]
    NameTooLong { len: usize, max: usize },
}

/// Three 8-bit colour channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, a: u8) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Lower-case `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        // 0.8 grey
        Self::new(204, 204, 204)
    }
}

/// Colour plus alpha, as handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

}

impl Default for Rgba {
    fn default() -> Self {
        Rgb::default().with_alpha(OPAQUE)
    }
}

/// Parse `#rrggbb` or `rrggbb` (case-insensitive).
pub fn parse_hex(input: &str) -> Result<Rgb, ParseError> {
    let digits = input.strip_prefix('#').unwrap_or(input);

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidHex(input.to_string()));
    }

    let channel = |at: usize| {
        u8::from_str_radix(&digits[at..at + 2], 16)
            .map_err(|_| ParseError::InvalidHex(input.to_string()))
    };

    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Parse a decimal channel value in `0..=255`.
pub fn parse_channel(input: &str) -> Result<u8, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidChannel(input.to_string()));
    }
    trimmed
        .parse::<u8>()
        .map_err(|_| ParseError::InvalidChannel(input.to_string()))
}
