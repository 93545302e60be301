//! Built-in themes
//!
//! - `light`: slate/indigo light scheme (same as the global token defaults)
//! - `dark`: slate/indigo dark scheme
//! - `high-contrast`: extends `dark`, pure black surfaces, enforces WCAG AAA
//! - `dim`: extends `dark` with lifted surfaces

pub mod palette;

use crate::color::Color;
use crate::contrast::WcagLevel;
use crate::theme::{AccessibilityConfig, ColorScheme, ThemeConfig};
use crate::tokens::{
    BorderOverrides, BorderToken, ColorOverrides, ColorToken, ShadowOverrides, ShadowTokens,
    TokenOverrides,
};
use std::fmt::{Display, Formatter};

/// Built-in theme catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    Light,
    Dark,
    HighContrast,
    Dim,
}

impl ThemePreset {
    /// Stable preset id, used as the registered variant name
    pub fn id(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::HighContrast => "high-contrast",
            Self::Dim => "dim",
        }
    }

    /// User-facing display name
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::HighContrast => "High Contrast",
            Self::Dim => "Dim",
        }
    }

    /// Full preset list, parents before children
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 4] = [
            ThemePreset::Light,
            ThemePreset::Dark,
            ThemePreset::HighContrast,
            ThemePreset::Dim,
        ];
        &PRESETS
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|preset| preset.id() == id)
    }

    /// Registration config for this preset
    pub fn config(self) -> ThemeConfig {
        let base = ThemeConfig::new(self.id()).description(self.display_name());
        match self {
            Self::Light => base.scheme(ColorScheme::Light),
            Self::Dark => base.scheme(ColorScheme::Dark).tokens(TokenOverrides {
                colors: ColorOverrides::from(&palette::dark_colors()),
                shadows: ShadowOverrides::from(&ShadowTokens::dark()),
                ..TokenOverrides::default()
            }),
            Self::HighContrast => base
                .scheme(ColorScheme::Dark)
                .extends(Self::Dark.id())
                .tokens(TokenOverrides {
                    colors: high_contrast_colors(),
                    borders: BorderOverrides::default()
                        .with(BorderToken::Thin, 2.0)
                        .with(BorderToken::Thick, 3.0),
                    ..TokenOverrides::default()
                })
                .accessibility(AccessibilityConfig {
                    enforce_contrast: true,
                    min_level: WcagLevel::Aaa,
                    reduced_motion: false,
                }),
            Self::Dim => base
                .scheme(ColorScheme::Dark)
                .extends(Self::Dark.id())
                .tokens(TokenOverrides {
                    colors: ColorOverrides::default()
                        .with(ColorToken::Background, palette::slate::get(palette::slate::S800))
                        .with(ColorToken::Surface, palette::slate::get(palette::slate::S700))
                        .with(
                            ColorToken::SurfaceElevated,
                            palette::slate::get(palette::slate::S600),
                        ),
                    ..TokenOverrides::default()
                }),
        }
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Configs for every built-in preset, in registration order
pub fn builtin_configs() -> Vec<ThemeConfig> {
    ThemePreset::all().iter().map(|preset| preset.config()).collect()
}

fn high_contrast_colors() -> ColorOverrides {
    let yellow = Color::from_hex(0xFFD400);
    ColorOverrides::default()
        .with(ColorToken::Primary, yellow)
        .with(ColorToken::PrimaryHover, Color::from_hex(0xFFE566))
        .with(ColorToken::PrimaryActive, Color::from_hex(0xFFF0A0))
        .with(ColorToken::Background, Color::BLACK)
        .with(ColorToken::Surface, Color::BLACK)
        .with(ColorToken::SurfaceElevated, Color::from_hex(0x121212))
        .with(ColorToken::TextPrimary, Color::WHITE)
        .with(ColorToken::TextSecondary, Color::from_hex(0xE5E5E5))
        .with(ColorToken::TextTertiary, Color::from_hex(0xCCCCCC))
        .with(ColorToken::TextInverse, Color::BLACK)
        .with(ColorToken::TextLink, yellow)
        .with(ColorToken::Border, Color::WHITE)
        .with(ColorToken::BorderFocus, yellow)
}
