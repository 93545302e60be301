//! Color tokens for theming

use crate::color::Color;

token_set! {
    /// Complete set of semantic color tokens
    ColorTokens / ColorOverrides: ColorToken => Color {
        // Brand colors
        Primary => primary = "primary",
        PrimaryHover => primary_hover = "primary-hover",
        PrimaryActive => primary_active = "primary-active",
        Secondary => secondary = "secondary",
        SecondaryHover => secondary_hover = "secondary-hover",
        SecondaryActive => secondary_active = "secondary-active",
        Accent => accent = "accent",

        // Status colors
        Success => success = "success",
        Warning => warning = "warning",
        Error => error = "error",
        Info => info = "info",

        // Surfaces
        Background => background = "background",
        Surface => surface = "surface",
        SurfaceElevated => surface_elevated = "surface-elevated",
        SurfaceOverlay => surface_overlay = "surface-overlay",

        // Text
        TextPrimary => text_primary = "text-primary",
        TextSecondary => text_secondary = "text-secondary",
        TextTertiary => text_tertiary = "text-tertiary",
        TextInverse => text_inverse = "text-inverse",
        TextLink => text_link = "text-link",

        // Borders
        Border => border = "border",
        BorderHover => border_hover = "border-hover",
        BorderFocus => border_focus = "border-focus",
        BorderError => border_error = "border-error",

        // Selection and tooltips
        Selection => selection = "selection",
        TooltipBackground => tooltip_bg = "tooltip-bg",
        TooltipText => tooltip_text = "tooltip-text",
    }
}

impl ColorToken {
    /// Colors that get tint/shade variants and legacy aliases
    pub const BRAND_AND_STATUS: &'static [ColorToken] = &[
        ColorToken::Primary,
        ColorToken::Secondary,
        ColorToken::Accent,
        ColorToken::Success,
        ColorToken::Warning,
        ColorToken::Error,
        ColorToken::Info,
    ];
}

impl Default for ColorTokens {
    fn default() -> Self {
        crate::themes::palette::light_colors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for token in ColorToken::ALL {
            assert_eq!(ColorToken::from_name(token.name()), Some(*token));
        }
        assert_eq!(ColorToken::from_name("not-a-color"), None);
    }

    #[test]
    fn overrides_merge_last_write_wins() {
        let mut base = ColorOverrides::default()
            .with(ColorToken::Primary, Color::BLACK)
            .with(ColorToken::Error, Color::BLACK);
        let top = ColorOverrides::default().with(ColorToken::Primary, Color::WHITE);

        base.merge(&top);

        assert_eq!(base.get(ColorToken::Primary), Some(&Color::WHITE));
        assert_eq!(base.get(ColorToken::Error), Some(&Color::BLACK));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn apply_only_touches_set_keys() {
        let mut colors = ColorTokens::default();
        let before = colors.clone();
        colors.apply(&ColorOverrides::default().with(ColorToken::Accent, Color::WHITE));

        assert_eq!(*colors.get(ColorToken::Accent), Color::WHITE);
        assert_eq!(colors.primary, before.primary);
        assert_eq!(colors.background, before.background);
    }
}
