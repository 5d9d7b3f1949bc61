//! Color types

use serde::{Deserialize, Serialize};

use crate::StyleError;

/// RGBA Color (0-255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn to_f32(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// One color channel, as addressed by color pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
        }
    }
}

/// Color as stored in the style schema.
///
/// Deserializes from a 3 or 4 element channel array (`[r, g, b]`,
/// `[r, g, b, a]`) or from a `#RRGGBB` / `#RRGGBBAA` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorSpec", into = "String")]
pub struct Color(pub Rgba);

impl Color {
    pub const TRANSPARENT: Self = Self(Rgba::TRANSPARENT);
    pub const BLACK: Self = Self(Rgba::BLACK);
    pub const WHITE: Self = Self(Rgba::WHITE);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Rgba::rgb(r, g, b))
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(Rgba::new(r, g, b, a))
    }

    /// Build from a channel slice; only RGB and RGBA lengths are valid.
    pub fn from_channels(channels: &[u8]) -> Option<Self> {
        match *channels {
            [r, g, b] => Some(Self::rgb(r, g, b)),
            [r, g, b, a] => Some(Self::rgba(r, g, b, a)),
            _ => None,
        }
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(s.get(i..i + 2)?, 16).ok();

        match s.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.0.a == 0
    }

    pub fn with_alpha(&self, a: u8) -> Self {
        let mut color = self.0;
        color.a = a;
        Self(color)
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.0.r,
            Channel::Green => self.0.g,
            Channel::Blue => self.0.b,
        }
    }

    pub fn with_channel(&self, channel: Channel, value: u8) -> Self {
        let mut color = self.0;
        match channel {
            Channel::Red => color.r = value,
            Channel::Green => color.g = value,
            Channel::Blue => color.b = value,
        }
        Self(color)
    }

    pub fn to_f32(&self) -> [f32; 4] {
        self.0.to_f32()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl From<Rgba> for Color {
    fn from(rgba: Rgba) -> Self {
        Self(rgba)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0.to_hex()
    }
}

/// Raw color notation accepted in configuration files
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Channels(Vec<u8>),
    Hex(String),
}

impl ColorSpec {
    /// Convert, naming the offending entry on failure.
    pub fn to_color(&self, name: &str) -> Result<Color, StyleError> {
        match self {
            Self::Channels(channels) => {
                Color::from_channels(channels).ok_or_else(|| StyleError::InvalidColor {
                    name: name.to_string(),
                    len: channels.len(),
                })
            }
            Self::Hex(hex) => Color::from_hex(hex).ok_or_else(|| StyleError::InvalidHex {
                name: name.to_string(),
                value: hex.clone(),
            }),
        }
    }
}

impl TryFrom<ColorSpec> for Color {
    type Error = StyleError;

    fn try_from(spec: ColorSpec) -> Result<Self, Self::Error> {
        spec.to_color("color")
    }
}
