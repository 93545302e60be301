//! Color type, parsing and mixing

use crate::error::ThemeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Create from hex value (0xRRGGBB)
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgba8(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
            255,
        )
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Linear interpolation between two colors
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }

    /// Mix toward white by `amount` (0.0 keeps the color, 1.0 is white)
    pub fn tint(self, amount: f32) -> Self {
        Self::lerp(&self, &Self::WHITE.with_alpha(self.a), amount.clamp(0.0, 1.0))
    }

    /// Mix toward black by `amount` (0.0 keeps the color, 1.0 is black)
    pub fn shade(self, amount: f32) -> Self {
        Self::lerp(&self, &Self::BLACK.with_alpha(self.a), amount.clamp(0.0, 1.0))
    }

    /// Lighten the color
    pub fn lighten(self, amount: f32) -> Self {
        Self {
            r: (self.r + amount).min(1.0),
            g: (self.g + amount).min(1.0),
            b: (self.b + amount).min(1.0),
            a: self.a,
        }
    }

    /// Darken the color
    pub fn darken(self, amount: f32) -> Self {
        Self {
            r: (self.r - amount).max(0.0),
            g: (self.g - amount).max(0.0),
            b: (self.b - amount).max(0.0),
            a: self.a,
        }
    }

    /// True when every channel is finite and inside 0.0..=1.0
    pub fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        fn channel(c: f32) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        ]
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    fn parse_hex(digits: &str) -> Option<Self> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            3 => Some(Self::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
            4 => Some(Self::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    fn parse_functional(args: &str, with_alpha: bool) -> Option<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return None;
        }
        let r: u8 = parts[0].parse().ok()?;
        let g: u8 = parts[1].parse().ok()?;
        let b: u8 = parts[2].parse().ok()?;
        let mut color = Self::from_rgba8(r, g, b, 255);
        if with_alpha {
            let a: f32 = parts[3].parse().ok()?;
            if !(0.0..=1.0).contains(&a) {
                return None;
            }
            color.a = a;
        }
        Some(color)
    }
}

impl FromStr for Color {
    type Err = ThemeError;

    /// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
    /// `rgba(r, g, b, a)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let lower = input.to_ascii_lowercase();
        let parsed = if let Some(digits) = input.strip_prefix('#') {
            Self::parse_hex(digits)
        } else if let Some(args) = lower
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::parse_functional(args, true)
        } else if let Some(args) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::parse_functional(args, false)
        } else {
            None
        };

        parsed.ok_or_else(|| ThemeError::validation(format!("invalid color format: '{s}'")))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#000000".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!(
            "#FF000080".parse::<Color>().unwrap().to_rgba8(),
            [255, 0, 0, 128]
        );
        assert_eq!("#1e66f5".parse::<Color>().unwrap(), Color::from_hex(0x1E66F5));
    }

    #[test]
    fn parses_functional_forms() {
        let c: Color = "rgb(255, 128, 0)".parse().unwrap();
        assert_eq!(c.to_rgba8(), [255, 128, 0, 255]);

        let c: Color = "RGBA(0,0,0,0.5)".parse().unwrap();
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "#12", "#ggg", "rgb(1,2)", "rgb(256,0,0)", "rgba(0,0,0,2)", "blue"] {
            let err = input.parse::<Color>().unwrap_err();
            assert_eq!(err.code(), "THEME_002", "input {input:?}");
        }
    }

    #[test]
    fn hex_output_round_trips_through_parse() {
        let c = Color::from_hex(0x4F46E5);
        assert_eq!(c.to_hex(), "#4f46e5");
        assert_eq!(c.with_alpha(0.0).to_hex(), "#4f46e500");
    }

    #[test]
    fn tint_and_shade_move_toward_white_and_black() {
        let c = Color::rgb(0.5, 0.5, 0.5);
        assert_eq!(c.tint(1.0), Color::WHITE);
        assert_eq!(c.shade(1.0), Color::BLACK);
        assert_eq!(c.tint(0.0), c);
        assert!(c.tint(0.5).r > c.r);
        assert!(c.shade(0.5).r < c.r);
    }

    #[test]
    fn normalized_check() {
        assert!(Color::WHITE.is_normalized());
        assert!(!Color::new(1.2, 0.0, 0.0, 1.0).is_normalized());
        assert!(!Color::new(f32::NAN, 0.0, 0.0, 1.0).is_normalized());
    }
}
