//! Four-channel colors and the fixed logo palette.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use palette::Srgb;
use serde::{Serialize, Serializer};

use crate::error::Error;

/// An 8-bit RGBA color.
///
/// Parses from and serializes as a hex string: `#RRGGBB` when opaque, `#RRGGBBAA` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Charcoal used for dark artwork and dark backgrounds (`#454647`).
    pub const DARK: Self = Self::new(69, 70, 71, 255);

    /// Off-white used for light artwork and light backgrounds (`#EBEBEB`).
    pub const LIGHT: Self = Self::new(235, 235, 235, 255);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Creates a color from its four channels.
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Returns the channels in RGBA order.
    pub fn as_tuple(&self) -> (u8, u8, u8, u8) {
        (self.red, self.green, self.blue, self.alpha)
    }

    /// Returns the color as an `image` pixel.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.red, self.green, self.blue, self.alpha])
    }

    /// Formats as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.alpha == u8::MAX {
            format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                self.red, self.green, self.blue, self.alpha
            )
        }
    }
}

impl From<Rgba<u8>> for Color {
    fn from(pixel: Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self::new(r, g, b, a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || Error::Color(s.to_string());
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let (rgb_part, alpha) = match hex.len() {
            3 | 6 => (hex, u8::MAX),
            8 => {
                let alpha = u8::from_str_radix(&hex[6..], 16).map_err(|_| invalid())?;
                (&hex[..6], alpha)
            }
            _ => return Err(invalid()),
        };

        let rgb: Srgb<u8> = rgb_part.parse().map_err(|_| invalid())?;
        Ok(Self::new(rgb.red, rgb.green, rgb.blue, alpha))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
