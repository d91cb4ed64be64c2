use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An opaque sRGB colour. Transparency lives on [`Paint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Look up a named colour. Accepts the single-letter codes and the
    /// common CSS names.
    pub fn named(name: &str) -> Option<Self> {
        let color = match name.to_lowercase().as_str() {
            "b" | "blue" => Self::BLUE,
            "r" | "red" => Self::RED,
            "g" | "green" => Self::GREEN,
            "k" | "black" => Self::BLACK,
            "w" | "white" => Self::WHITE,
            "c" => Self::rgb(0, 191, 191),
            "m" => Self::rgb(191, 0, 191),
            "y" => Self::rgb(191, 191, 0),
            "gray" | "grey" => Self::GRAY,
            "lightgray" | "lightgrey" => Self::rgb(211, 211, 211),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(128, 0, 128),
            "cyan" => Self::rgb(0, 255, 255),
            "magenta" => Self::rgb(255, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            _ => return None,
        };
        Some(color)
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix('#') {
            Some(hex) => Self::from_hex(hex),
            None => Self::named(s),
        };
        parsed.ok_or_else(|| Error::UnknownColor(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// A colour with opacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub alpha: f64,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self { color, alpha: 1.0 }
    }

    pub fn translucent(color: Color, alpha: f64) -> Self {
        Self { color, alpha: alpha.clamp(0.0, 1.0) }
    }
}

/// How neighbouring lattice points are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    None,
}

impl LineStyle {
    pub fn is_visible(&self) -> bool {
        !matches!(self, LineStyle::None)
    }
}

impl FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "solid" | "-" => Ok(LineStyle::Solid),
            "dashed" | "--" => Ok(LineStyle::Dashed),
            "none" | "" => Ok(LineStyle::None),
            other => Err(Error::UnknownLineStyle(other.to_string())),
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::None => "none",
        };
        f.write_str(name)
    }
}
