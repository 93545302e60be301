//! Base palettes for the built-in themes
//!
//! Slate neutrals with an indigo brand hue.

use crate::color::Color;
use crate::tokens::ColorTokens;

/// Slate neutral ramp
pub mod slate {
    use crate::color::Color;

    pub const S50: u32 = 0xF8FAFC;
    pub const S100: u32 = 0xF1F5F9;
    pub const S200: u32 = 0xE2E8F0;
    pub const S300: u32 = 0xCBD5E1;
    pub const S400: u32 = 0x94A3B8;
    pub const S500: u32 = 0x64748B;
    pub const S600: u32 = 0x475569;
    pub const S700: u32 = 0x334155;
    pub const S800: u32 = 0x1E293B;
    pub const S900: u32 = 0x0F172A;

    pub fn get(hex: u32) -> Color {
        Color::from_hex(hex)
    }
}

/// Light scheme colors; also the global fallback for unset color tokens
pub fn light_colors() -> ColorTokens {
    let s = slate::get;
    ColorTokens {
        primary: Color::from_hex(0x4F46E5),
        primary_hover: Color::from_hex(0x4338CA),
        primary_active: Color::from_hex(0x3730A3),
        secondary: Color::from_hex(0x7C3AED),
        secondary_hover: Color::from_hex(0x6D28D9),
        secondary_active: Color::from_hex(0x5B21B6),
        accent: Color::from_hex(0x0EA5E9),
        success: Color::from_hex(0x16A34A),
        warning: Color::from_hex(0xD97706),
        error: Color::from_hex(0xDC2626),
        info: Color::from_hex(0x0284C7),
        background: s(slate::S50),
        surface: Color::WHITE,
        surface_elevated: Color::WHITE,
        surface_overlay: s(slate::S100),
        text_primary: s(slate::S900),
        text_secondary: s(slate::S600),
        text_tertiary: s(slate::S500),
        text_inverse: Color::WHITE,
        text_link: Color::from_hex(0x4338CA),
        border: s(slate::S200),
        border_hover: s(slate::S300),
        border_focus: Color::from_hex(0x4F46E5),
        border_error: Color::from_hex(0xDC2626),
        selection: Color::from_hex(0x4F46E5).with_alpha(0.25),
        tooltip_bg: s(slate::S800),
        tooltip_text: s(slate::S50),
    }
}

/// Dark scheme colors
pub fn dark_colors() -> ColorTokens {
    let s = slate::get;
    ColorTokens {
        primary: Color::from_hex(0x818CF8),
        primary_hover: Color::from_hex(0xA5B4FC),
        primary_active: Color::from_hex(0xC7D2FE),
        secondary: Color::from_hex(0xA78BFA),
        secondary_hover: Color::from_hex(0xC4B5FD),
        secondary_active: Color::from_hex(0xDDD6FE),
        accent: Color::from_hex(0x38BDF8),
        success: Color::from_hex(0x4ADE80),
        warning: Color::from_hex(0xFBBF24),
        error: Color::from_hex(0xF87171),
        info: Color::from_hex(0x38BDF8),
        background: s(slate::S900),
        surface: s(slate::S800),
        surface_elevated: s(slate::S700),
        surface_overlay: Color::from_hex(0x020617),
        text_primary: s(slate::S100),
        text_secondary: s(slate::S300),
        text_tertiary: s(slate::S400),
        text_inverse: s(slate::S900),
        text_link: Color::from_hex(0xA5B4FC),
        border: s(slate::S700),
        border_hover: s(slate::S600),
        border_focus: Color::from_hex(0x818CF8),
        border_error: Color::from_hex(0xF87171),
        selection: Color::from_hex(0x818CF8).with_alpha(0.3),
        tooltip_bg: s(slate::S100),
        tooltip_text: s(slate::S900),
    }
}
