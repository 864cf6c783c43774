use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Invalid hex color '{0}'")]
    InvalidHex(String),

    #[error("Unknown color name '{0}'")]
    UnknownName(String),
}

/// RGB color for fills and strokes.
///
/// Parses `#rgb`, `#rrggbb` and a small set of CSS color names; always
/// serializes as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);
    pub const GREEN: Color = Color::rgb(0x00, 0x80, 0x00);
    pub const LIME: Color = Color::rgb(0x00, 0xFF, 0x00);
    pub const YELLOW: Color = Color::rgb(0xFF, 0xFF, 0x00);
    pub const PURPLE: Color = Color::rgb(0x80, 0x00, 0x80);
    pub const ORANGE: Color = Color::rgb(0xFF, 0xA5, 0x00);
    pub const CYAN: Color = Color::rgb(0x00, 0xFF, 0xFF);
    pub const MAGENTA: Color = Color::rgb(0xFF, 0x00, 0xFF);
    pub const BROWN: Color = Color::rgb(0xA5, 0x2A, 0x2A);
    pub const PINK: Color = Color::rgb(0xFF, 0xC0, 0xCB);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::RED,
            "blue" => Self::BLUE,
            "green" => Self::GREEN,
            "lime" => Self::LIME,
            "yellow" => Self::YELLOW,
            "purple" => Self::PURPLE,
            "orange" => Self::ORANGE,
            "cyan" | "aqua" => Self::CYAN,
            "magenta" | "fuchsia" => Self::MAGENTA,
            "brown" => Self::BROWN,
            "pink" => Self::PINK,
            _ => return None,
        };
        Some(color)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    fn parse_hex(digits: &str) -> Option<Self> {
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut it = digits.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Self::rgb(it.next()??, it.next()??, it.next()??))
            }
            6 => Some(Self::rgb(
                channel(digits.get(0..2)?)?,
                channel(digits.get(2..4)?)?,
                channel(digits.get(4..6)?)?,
            )),
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix('#') {
            Some(digits) => {
                Self::parse_hex(digits).ok_or_else(|| ColorParseError::InvalidHex(s.to_string()))
            }
            None => Self::named(s).ok_or_else(|| ColorParseError::UnknownName(s.to_string())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Paint parameters for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    /// 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }
}

impl Style {
    pub fn filled(color: Color) -> Self {
        Self::default().with_fill(color)
    }

    pub fn stroked(color: Color, width: f64) -> Self {
        Self::default().with_stroke(color, width)
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}
