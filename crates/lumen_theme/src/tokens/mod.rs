//! Design tokens for theming
//!
//! Tokens are the atomic values that make up a design system:
//! - Colors
//! - Typography (families, sizes, weights, line heights)
//! - Spacing
//! - Shadows
//! - Breakpoints, radii, border widths and component sizes
//! - Animation durations and easings
//!
//! [`ThemeTokens`] is always complete. [`TokenOverrides`] is its partial
//! counterpart, used for inheritance layers and caller overrides.

#[macro_use]
mod macros;

mod color;
mod layout;
mod motion;
mod shadow;
mod spacing;
mod typography;

pub use color::*;
pub use layout::*;
pub use motion::*;
pub use shadow::*;
pub use spacing::*;
pub use typography::*;

use crate::error::{Result, ThemeError};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Complete token set for one theme
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ThemeTokens {
    pub colors: ColorTokens,
    pub font_families: FontFamilyTokens,
    pub font_sizes: FontSizeTokens,
    pub font_weights: FontWeightTokens,
    pub line_heights: LineHeightTokens,
    pub spacing: SpacingTokens,
    pub shadows: ShadowTokens,
    pub breakpoints: BreakpointTokens,
    pub radii: RadiusTokens,
    pub borders: BorderTokens,
    pub sizes: SizeTokens,
    pub durations: DurationTokens,
    pub easings: EasingTokens,
}

impl ThemeTokens {
    /// Apply a partial layer on top of these tokens (set keys win)
    pub fn apply(&mut self, overrides: &TokenOverrides) {
        self.colors.apply(&overrides.colors);
        self.font_families.apply(&overrides.font_families);
        self.font_sizes.apply(&overrides.font_sizes);
        self.font_weights.apply(&overrides.font_weights);
        self.line_heights.apply(&overrides.line_heights);
        self.spacing.apply(&overrides.spacing);
        self.shadows.apply(&overrides.shadows);
        self.breakpoints.apply(&overrides.breakpoints);
        self.radii.apply(&overrides.radii);
        self.borders.apply(&overrides.borders);
        self.sizes.apply(&overrides.sizes);
        self.durations.apply(&overrides.durations);
        self.easings.apply(&overrides.easings);
    }

    /// Builder form of [`Self::apply`]
    pub fn with(mut self, overrides: &TokenOverrides) -> Self {
        self.apply(overrides);
        self
    }

    /// Zero out motion: durations become 0ms and easings `linear`
    pub fn reduce_motion(&mut self) {
        self.durations = DurationTokens::reduced();
        self.easings = EasingTokens::reduced();
    }
}

/// Partial token set; every key is optional
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TokenOverrides {
    #[serde(skip_serializing_if = "ColorOverrides::is_empty")]
    pub colors: ColorOverrides,
    #[serde(skip_serializing_if = "FontFamilyOverrides::is_empty")]
    pub font_families: FontFamilyOverrides,
    #[serde(skip_serializing_if = "FontSizeOverrides::is_empty")]
    pub font_sizes: FontSizeOverrides,
    #[serde(skip_serializing_if = "FontWeightOverrides::is_empty")]
    pub font_weights: FontWeightOverrides,
    #[serde(skip_serializing_if = "LineHeightOverrides::is_empty")]
    pub line_heights: LineHeightOverrides,
    #[serde(skip_serializing_if = "SpacingOverrides::is_empty")]
    pub spacing: SpacingOverrides,
    #[serde(skip_serializing_if = "ShadowOverrides::is_empty")]
    pub shadows: ShadowOverrides,
    #[serde(skip_serializing_if = "BreakpointOverrides::is_empty")]
    pub breakpoints: BreakpointOverrides,
    #[serde(skip_serializing_if = "RadiusOverrides::is_empty")]
    pub radii: RadiusOverrides,
    #[serde(skip_serializing_if = "BorderOverrides::is_empty")]
    pub borders: BorderOverrides,
    #[serde(skip_serializing_if = "SizeOverrides::is_empty")]
    pub sizes: SizeOverrides,
    #[serde(skip_serializing_if = "DurationOverrides::is_empty")]
    pub durations: DurationOverrides,
    #[serde(skip_serializing_if = "EasingOverrides::is_empty")]
    pub easings: EasingOverrides,
}

impl TokenOverrides {
    /// Layer `other` on top of `self`; keys set in `other` win
    pub fn merge(&mut self, other: &TokenOverrides) {
        self.colors.merge(&other.colors);
        self.font_families.merge(&other.font_families);
        self.font_sizes.merge(&other.font_sizes);
        self.font_weights.merge(&other.font_weights);
        self.line_heights.merge(&other.line_heights);
        self.spacing.merge(&other.spacing);
        self.shadows.merge(&other.shadows);
        self.breakpoints.merge(&other.breakpoints);
        self.radii.merge(&other.radii);
        self.borders.merge(&other.borders);
        self.sizes.merge(&other.sizes);
        self.durations.merge(&other.durations);
        self.easings.merge(&other.easings);
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of individual token keys set
    pub fn len(&self) -> usize {
        self.colors.len()
            + self.font_families.len()
            + self.font_sizes.len()
            + self.font_weights.len()
            + self.line_heights.len()
            + self.spacing.len()
            + self.shadows.len()
            + self.breakpoints.len()
            + self.radii.len()
            + self.borders.len()
            + self.sizes.len()
            + self.durations.len()
            + self.easings.len()
    }

    /// Set one token from a `category.token` path and its textual value,
    /// e.g. `colors.primary` = `#ff0066` or `spacing.4` = `18`.
    pub fn set_path(&mut self, path: &str, raw: &str) -> Result<()> {
        let (category, token) = path
            .split_once('.')
            .ok_or_else(|| ThemeError::validation(format!("token path '{path}' must be 'category.token'")))?;
        let category = TokenCategory::from_name(category).ok_or_else(|| {
            ThemeError::validation_with(
                format!("unknown token category '{category}'"),
                TokenCategory::ALL.iter().map(|c| c.name().to_string()).collect(),
            )
        })?;
        let unknown = || ThemeError::validation(format!("unknown token '{token}' in {category}"));

        match category {
            TokenCategory::Colors => self.colors.set(
                ColorToken::from_name(token).ok_or_else(unknown)?,
                parse_value(path, raw)?,
            ),
            TokenCategory::FontFamilies => self.font_families.set(
                FontFamilyToken::from_name(token).ok_or_else(unknown)?,
                raw.to_string(),
            ),
            TokenCategory::FontSizes => self.font_sizes.set(
                FontSizeToken::from_name(token).ok_or_else(unknown)?,
                parse_value(path, raw)?,
            ),
            TokenCategory::FontWeights => self.font_weights.set(
                FontWeightToken::from_name(token).ok_or_else(unknown)?,
                parse_value(path, raw)?,
            ),
            TokenCategory::LineHeights => self.line_heights.set(
                LineHeightToken::from_name(token).ok_or_else(unknown)?,
                parse_value(path, raw)?,
            ),
            TokenCategory::Spacing => self.spacing.set(
                SpacingToken::from_name(token).ok_or_else(unknown)?,
                parse_value(path, raw)?,
            ),
            TokenCategory::Shadows => self.shadows.set(
                ShadowToken::from_name(token).ok_or_else(unknown)?,
                parse_value(path, raw)?,
            ),
            TokenCategory::Breakpoints => self.breakpoints.set(
                BreakpointToken::from_name(token).ok_or_else(unknown)?,
                parse_value(path, raw)?,
            ),
            TokenCategory::Radii => self.radii.set(
                RadiusToken::from_name(token).ok_or_else(unknown)?,
                parse_value(path, raw)?,
            ),
            TokenCategory::Borders => self.borders.set(
                BorderToken::from_name(token).ok_or_else(unknown)?,
                parse_value(path, raw)?,
            ),
            TokenCategory::Sizes => self.sizes.set(
                SizeToken::from_name(token).ok_or_else(unknown)?,
                parse_value(path, raw)?,
            ),
            TokenCategory::Durations => self.durations.set(
                DurationToken::from_name(token).ok_or_else(unknown)?,
                parse_value(path, raw)?,
            ),
            TokenCategory::Easings => self.easings.set(
                EasingToken::from_name(token).ok_or_else(unknown)?,
                raw.to_string(),
            ),
        }
        Ok(())
    }
}

impl From<&ThemeTokens> for TokenOverrides {
    fn from(tokens: &ThemeTokens) -> Self {
        Self {
            colors: (&tokens.colors).into(),
            font_families: (&tokens.font_families).into(),
            font_sizes: (&tokens.font_sizes).into(),
            font_weights: (&tokens.font_weights).into(),
            line_heights: (&tokens.line_heights).into(),
            spacing: (&tokens.spacing).into(),
            shadows: (&tokens.shadows).into(),
            breakpoints: (&tokens.breakpoints).into(),
            radii: (&tokens.radii).into(),
            borders: (&tokens.borders).into(),
            sizes: (&tokens.sizes).into(),
            durations: (&tokens.durations).into(),
            easings: (&tokens.easings).into(),
        }
    }
}

fn parse_value<T>(path: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ThemeError::validation(format!("invalid value '{raw}' for {path}: {e}")))
}

/// Token categories, named as they appear in config files
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Colors,
    FontFamilies,
    FontSizes,
    FontWeights,
    LineHeights,
    Spacing,
    Shadows,
    Breakpoints,
    Radii,
    Borders,
    Sizes,
    Durations,
    Easings,
}

impl TokenCategory {
    pub const ALL: &'static [TokenCategory] = &[
        TokenCategory::Colors,
        TokenCategory::FontFamilies,
        TokenCategory::FontSizes,
        TokenCategory::FontWeights,
        TokenCategory::LineHeights,
        TokenCategory::Spacing,
        TokenCategory::Shadows,
        TokenCategory::Breakpoints,
        TokenCategory::Radii,
        TokenCategory::Borders,
        TokenCategory::Sizes,
        TokenCategory::Durations,
        TokenCategory::Easings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TokenCategory::Colors => "colors",
            TokenCategory::FontFamilies => "font-families",
            TokenCategory::FontSizes => "font-sizes",
            TokenCategory::FontWeights => "font-weights",
            TokenCategory::LineHeights => "line-heights",
            TokenCategory::Spacing => "spacing",
            TokenCategory::Shadows => "shadows",
            TokenCategory::Breakpoints => "breakpoints",
            TokenCategory::Radii => "radii",
            TokenCategory::Borders => "borders",
            TokenCategory::Sizes => "sizes",
            TokenCategory::Durations => "durations",
            TokenCategory::Easings => "easings",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

impl Display for TokenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_overrides_are_identity() {
        let tokens = ThemeTokens::default();
        let merged = tokens.clone().with(&TokenOverrides::default());
        assert_eq!(merged, tokens);
    }

    #[test]
    fn applying_full_partial_reproduces_tokens() {
        let tokens = ThemeTokens::default();
        let full = TokenOverrides::from(&tokens);
        let mut other = ThemeTokens::default();
        other.colors.primary = Color::BLACK;
        other.spacing.space_4 = 99.0;

        assert_eq!(other.with(&full), tokens);
    }

    #[test]
    fn set_path_parses_per_category() {
        let mut overrides = TokenOverrides::default();
        overrides.set_path("colors.primary", "#ff0066").unwrap();
        overrides.set_path("spacing.4", "18").unwrap();
        overrides.set_path("font-weights.bold", "800").unwrap();
        overrides.set_path("durations.fast", "90").unwrap();
        overrides.set_path("font-families.mono", "Iosevka").unwrap();

        assert_eq!(overrides.len(), 5);
        assert_eq!(
            overrides.colors.get(ColorToken::Primary).map(Color::to_hex),
            Some("#ff0066".to_string())
        );
        assert_eq!(overrides.spacing.get(SpacingToken::Space4), Some(&18.0));
        assert_eq!(overrides.font_weights.get(FontWeightToken::Bold), Some(&800));
    }

    #[test]
    fn set_path_rejects_bad_input() {
        let mut overrides = TokenOverrides::default();
        assert!(overrides.set_path("colors", "#fff").is_err());
        assert!(overrides.set_path("paint.primary", "#fff").is_err());
        assert!(overrides.set_path("colors.nope", "#fff").is_err());
        assert!(overrides.set_path("spacing.4", "wide").is_err());
        assert!(overrides.is_empty());
    }

    #[test]
    fn empty_overrides_serialize_to_empty_object() {
        let json = serde_json::to_string(&TokenOverrides::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn overrides_deserialize_from_toml() {
        let overrides: TokenOverrides = toml::from_str(
            r##"
            [colors]
            primary = "#123456"

            [font-sizes]
            2xl = 26.0
            "##,
        )
        .unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.font_sizes.get(FontSizeToken::Xxl), Some(&26.0));
    }
}
