//! Theme enhancement
//!
//! Wraps a [`ComposedTheme`] with typed accessors, precomputed scales, color
//! variants and the flat legacy color map older consumers read.

use crate::color::Color;
use crate::error::{Result, ThemeError};
use crate::theme::{ColorScheme, ComposedTheme, ThemeMetadata};
use crate::tokens::{
    BreakpointToken, ColorToken, DurationToken, FontSizeToken, RadiusToken, Shadow, ShadowToken,
    SpacingToken, TextStyle, ThemeTokens, TokenCategory,
};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Legacy flat-map fields every enhanced theme must expose
pub const REQUIRED_LEGACY_FIELDS: &[&str] =
    &["primary", "secondary", "success", "warning", "error", "info"];

/// Tints and shades of one brand or status color
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ColorVariants {
    pub lighter: Color,
    pub light: Color,
    pub base: Color,
    pub dark: Color,
    pub darker: Color,
}

impl ColorVariants {
    pub fn of(base: Color) -> Self {
        Self {
            lighter: base.tint(0.4),
            light: base.tint(0.2),
            base,
            dark: base.shade(0.2),
            darker: base.shade(0.4),
        }
    }

    /// `(suffix, color)` pairs, lightest first
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Color)> {
        [
            ("lighter", self.lighter),
            ("light", self.light),
            ("base", self.base),
            ("dark", self.dark),
            ("darker", self.darker),
        ]
        .into_iter()
    }
}

/// Values derived once per enhanced theme
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComputedValues {
    pub spacing_scale: IndexMap<SpacingToken, f32>,
    pub typography_scale: IndexMap<FontSizeToken, TextStyle>,
    pub color_variants: IndexMap<ColorToken, ColorVariants>,
}

impl ComputedValues {
    fn from_tokens(tokens: &ThemeTokens) -> Self {
        let spacing_scale = tokens.spacing.iter().map(|(k, v)| (k, *v)).collect();

        let typography_scale = tokens
            .font_sizes
            .iter()
            .map(|(step, size)| {
                let family = if step == FontSizeToken::Display {
                    &tokens.font_families.serif
                } else {
                    &tokens.font_families.sans
                };
                let style = TextStyle {
                    family: family.clone(),
                    size: *size,
                    weight: *tokens.font_weights.get(step.default_weight()),
                    line_height: *tokens.line_heights.get(step.default_line_height()),
                };
                (step, style)
            })
            .collect();

        let color_variants = ColorToken::BRAND_AND_STATUS
            .iter()
            .map(|&token| (token, ColorVariants::of(*tokens.colors.get(token))))
            .collect();

        Self {
            spacing_scale,
            typography_scale,
            color_variants,
        }
    }
}

/// A composed theme with accessors and computed values
#[derive(Clone, Debug)]
pub struct EnhancedTheme {
    composed: Arc<ComposedTheme>,
    computed: ComputedValues,
    legacy: IndexMap<String, Color>,
}

impl EnhancedTheme {
    pub fn name(&self) -> &str {
        &self.composed.name
    }

    pub fn scheme(&self) -> ColorScheme {
        self.composed.scheme
    }

    pub fn metadata(&self) -> &ThemeMetadata {
        &self.composed.metadata
    }

    pub fn tokens(&self) -> &ThemeTokens {
        &self.composed.tokens
    }

    pub fn composed(&self) -> &Arc<ComposedTheme> {
        &self.composed
    }

    pub fn computed(&self) -> &ComputedValues {
        &self.computed
    }

    // ========== Accessors ==========

    pub fn get_spacing(&self, token: SpacingToken) -> f32 {
        *self.tokens().spacing.get(token)
    }

    /// `n` grid units
    pub fn spacing_multiple(&self, n: f32) -> f32 {
        self.tokens().spacing.unit() * n
    }

    pub fn get_color(&self, token: ColorToken) -> Color {
        *self.tokens().colors.get(token)
    }

    /// Tint/shade variants; present for brand and status colors
    pub fn color_variants(&self, token: ColorToken) -> Option<&ColorVariants> {
        self.computed.color_variants.get(&token)
    }

    pub fn get_typography(&self, token: FontSizeToken) -> Option<&TextStyle> {
        self.computed.typography_scale.get(&token)
    }

    pub fn get_breakpoint(&self, token: BreakpointToken) -> u32 {
        *self.tokens().breakpoints.get(token)
    }

    /// `@media (min-width: ..)` query for a breakpoint
    pub fn media_up(&self, token: BreakpointToken) -> String {
        format!("@media (min-width: {}px)", self.get_breakpoint(token))
    }

    pub fn get_radius(&self, token: RadiusToken) -> f32 {
        *self.tokens().radii.get(token)
    }

    pub fn get_shadow(&self, token: ShadowToken) -> &Shadow {
        self.tokens().shadows.get(token)
    }

    pub fn get_duration(&self, token: DurationToken) -> Duration {
        Duration::from_millis(u64::from(*self.tokens().durations.get(token)))
    }

    // ========== Legacy fields ==========

    pub fn primary(&self) -> Color {
        self.get_color(ColorToken::Primary)
    }

    pub fn secondary(&self) -> Color {
        self.get_color(ColorToken::Secondary)
    }

    pub fn success(&self) -> Color {
        self.get_color(ColorToken::Success)
    }

    pub fn warning(&self) -> Color {
        self.get_color(ColorToken::Warning)
    }

    pub fn error(&self) -> Color {
        self.get_color(ColorToken::Error)
    }

    pub fn info(&self) -> Color {
        self.get_color(ColorToken::Info)
    }

    /// Flat name → color map: every color token plus `{name}-{variant}` keys
    pub fn legacy(&self) -> &IndexMap<String, Color> {
        &self.legacy
    }

    /// Flattened variable map of every token, keyed without the `--` prefix.
    ///
    /// Color keys use the token name (`text-primary`); other categories are
    /// prefixed (`spacing-4`, `font-size-xl`, `duration-fast`).
    pub fn css_variables(&self) -> IndexMap<String, String> {
        let tokens = self.tokens();
        let mut vars = IndexMap::with_capacity(128);

        for (name, color) in &self.legacy {
            vars.insert(name.clone(), color.to_hex());
        }
        push(&mut vars, "font-family", tokens.font_families.iter(), |v| v.clone());
        push(&mut vars, "font-size", tokens.font_sizes.iter(), |v| format!("{v}px"));
        push(&mut vars, "font-weight", tokens.font_weights.iter(), |v| v.to_string());
        push(&mut vars, "line-height", tokens.line_heights.iter(), |v| v.to_string());
        push(&mut vars, "spacing", tokens.spacing.iter(), |v| format!("{v}px"));
        push(&mut vars, "shadow", tokens.shadows.iter(), Shadow::to_css);
        push(&mut vars, "breakpoint", tokens.breakpoints.iter(), |v| format!("{v}px"));
        push(&mut vars, "radius", tokens.radii.iter(), |v| format!("{v}px"));
        push(&mut vars, "border", tokens.borders.iter(), |v| format!("{v}px"));
        push(&mut vars, "size", tokens.sizes.iter(), |v| format!("{v}px"));
        push(&mut vars, "duration", tokens.durations.iter(), |v| format!("{v}ms"));
        push(&mut vars, "easing", tokens.easings.iter(), |v| v.clone());
        vars
    }
}

fn push<'a, K: Display, V: 'a>(
    vars: &mut IndexMap<String, String>,
    prefix: &str,
    entries: impl Iterator<Item = (K, &'a V)>,
    fmt: impl Fn(&V) -> String,
) {
    for (key, value) in entries {
        vars.insert(format!("{prefix}-{key}"), fmt(value));
    }
}

/// Builds [`EnhancedTheme`]s and checks they are complete
#[derive(Clone, Debug)]
pub struct ThemeEnhancer {
    required_fields: Vec<String>,
}

impl ThemeEnhancer {
    pub fn new() -> Self {
        Self {
            required_fields: REQUIRED_LEGACY_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Require an extra key in the legacy color map
    pub fn with_required_field(mut self, field: impl Into<String>) -> Self {
        self.required_fields.push(field.into());
        self
    }

    pub fn enhance(&self, composed: Arc<ComposedTheme>) -> Result<EnhancedTheme> {
        let computed = ComputedValues::from_tokens(&composed.tokens);

        let mut legacy = IndexMap::with_capacity(ColorToken::ALL.len() * 2);
        for (token, color) in composed.tokens.colors.iter() {
            legacy.insert(token.name().to_string(), *color);
        }
        for (token, variants) in &computed.color_variants {
            for (suffix, color) in variants.iter() {
                legacy.insert(format!("{token}-{suffix}"), color);
            }
        }

        let theme = EnhancedTheme {
            composed,
            computed,
            legacy,
        };

        let missing = self.check(&theme);
        if !missing.is_empty() {
            return Err(ThemeError::Enhancement {
                variant: theme.name().to_string(),
                missing,
            });
        }
        debug!(theme = theme.name(), vars = theme.legacy.len(), "enhanced theme");
        Ok(theme)
    }

    /// Everything `theme` lacks, described for the enhancement error
    pub fn check(&self, theme: &EnhancedTheme) -> Vec<String> {
        let mut missing = Vec::new();
        for field in &self.required_fields {
            if !theme.legacy.contains_key(field) {
                missing.push(format!("legacy field '{field}'"));
            }
        }
        for token in SpacingToken::ALL {
            if !theme.computed.spacing_scale.contains_key(token) {
                missing.push(format!("{} scale entry '{token}'", TokenCategory::Spacing));
            }
        }
        for token in FontSizeToken::ALL {
            if !theme.computed.typography_scale.contains_key(token) {
                missing.push(format!("typography scale entry '{token}'"));
            }
        }
        for token in ColorToken::BRAND_AND_STATUS {
            if !theme.computed.color_variants.contains_key(token) {
                missing.push(format!("color variants for '{token}'"));
            }
        }
        missing
    }
}

impl Default for ThemeEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeConfig;
    use crate::tokens::TokenOverrides;
    use crate::ThemeComposer;

    fn composed() -> Arc<ComposedTheme> {
        let composer = ThemeComposer::new();
        composer.register_theme(ThemeConfig::new("light")).unwrap();
        Arc::new(composer.compose("light", &TokenOverrides::default()).unwrap())
    }

    #[test]
    fn accessors_read_tokens() {
        let theme = ThemeEnhancer::new().enhance(composed()).unwrap();
        assert_eq!(theme.get_spacing(SpacingToken::Space4), 16.0);
        assert_eq!(theme.spacing_multiple(3.0), 12.0);
        assert_eq!(theme.get_breakpoint(BreakpointToken::Md), 768);
        assert_eq!(theme.media_up(BreakpointToken::Md), "@media (min-width: 768px)");
        assert_eq!(theme.get_duration(DurationToken::Fast), Duration::from_millis(150));
        assert_eq!(theme.primary(), theme.get_color(ColorToken::Primary));
    }

    #[test]
    fn typography_scale_uses_step_defaults() {
        let theme = ThemeEnhancer::new().enhance(composed()).unwrap();
        let display = theme.get_typography(FontSizeToken::Display).unwrap();
        assert_eq!(display.size, 36.0);
        assert_eq!(display.weight, 700);
        assert_eq!(display.line_height, 1.25);
        let base = theme.get_typography(FontSizeToken::Base).unwrap();
        assert_eq!(base.weight, 400);
    }

    #[test]
    fn variants_bracket_the_base_color() {
        let theme = ThemeEnhancer::new().enhance(composed()).unwrap();
        let v = theme.color_variants(ColorToken::Primary).unwrap();
        assert_eq!(v.base, theme.primary());
        assert!(v.lighter.r >= v.light.r && v.light.r >= v.base.r);
        assert!(v.darker.r <= v.dark.r && v.dark.r <= v.base.r);
        assert!(theme.color_variants(ColorToken::Background).is_none());
    }

    #[test]
    fn legacy_map_has_required_fields() {
        let theme = ThemeEnhancer::new().enhance(composed()).unwrap();
        for field in REQUIRED_LEGACY_FIELDS {
            assert!(theme.legacy().contains_key(*field), "missing {field}");
        }
        assert!(theme.legacy().contains_key("primary-darker"));
    }

    #[test]
    fn css_variables_cover_every_category() {
        let theme = ThemeEnhancer::new().enhance(composed()).unwrap();
        let vars = theme.css_variables();
        assert_eq!(vars["primary"], theme.primary().to_hex());
        assert_eq!(vars["spacing-4"], "16px");
        assert_eq!(vars["font-size-2xl"], "24px");
        assert_eq!(vars["duration-fast"], "150ms");
        assert_eq!(vars["shadow-none"], "none");
    }

    #[test]
    fn missing_required_field_is_an_enhancement_error() {
        let err = ThemeEnhancer::new()
            .with_required_field("brand-glow")
            .enhance(composed())
            .unwrap_err();
        assert_eq!(err.code(), "THEME_004");
        assert!(err.to_string().contains("brand-glow"));
    }
}
