//! Layout tokens: breakpoints, radii, border widths and component sizes

token_set! {
    /// Viewport breakpoints (min-width, pixels)
    BreakpointTokens / BreakpointOverrides: BreakpointToken => u32 {
        Xs => xs = "xs",
        Sm => sm = "sm",
        Md => md = "md",
        Lg => lg = "lg",
        Xl => xl = "xl",
        Xxl => xxl = "2xl",
    }
}

token_set! {
    /// Border radii in pixels
    RadiusTokens / RadiusOverrides: RadiusToken => f32 {
        None => none = "none",
        Sm => sm = "sm",
        Default => base = "default",
        Md => md = "md",
        Lg => lg = "lg",
        Xl => xl = "xl",
        Full => full = "full",
    }
}

token_set! {
    /// Border widths in pixels
    BorderTokens / BorderOverrides: BorderToken => f32 {
        None => none = "none",
        Thin => thin = "thin",
        Thick => thick = "thick",
        Heavy => heavy = "heavy",
    }
}

token_set! {
    /// Fixed component dimensions in pixels
    SizeTokens / SizeOverrides: SizeToken => f32 {
        IconSm => icon_sm = "icon-sm",
        IconMd => icon_md = "icon-md",
        IconLg => icon_lg = "icon-lg",
        AvatarSm => avatar_sm = "avatar-sm",
        AvatarMd => avatar_md = "avatar-md",
        AvatarLg => avatar_lg = "avatar-lg",
        ControlSm => control_sm = "control-sm",
        ControlMd => control_md = "control-md",
        ControlLg => control_lg = "control-lg",
    }
}

impl BreakpointTokens {
    /// Largest breakpoint whose min-width fits `width`
    pub fn classify(&self, width: u32) -> BreakpointToken {
        BreakpointToken::ALL
            .iter()
            .rev()
            .copied()
            .find(|token| width >= *self.get(*token))
            .unwrap_or(BreakpointToken::Xs)
    }
}

impl Default for BreakpointTokens {
    fn default() -> Self {
        Self {
            xs: 0,
            sm: 640,
            md: 768,
            lg: 1024,
            xl: 1280,
            xxl: 1536,
        }
    }
}

impl Default for RadiusTokens {
    fn default() -> Self {
        Self {
            none: 0.0,
            sm: 2.0,
            base: 4.0,
            md: 6.0,
            lg: 8.0,
            xl: 12.0,
            full: 9999.0,
        }
    }
}

impl Default for BorderTokens {
    fn default() -> Self {
        Self {
            none: 0.0,
            thin: 1.0,
            thick: 2.0,
            heavy: 4.0,
        }
    }
}

impl Default for SizeTokens {
    fn default() -> Self {
        Self {
            icon_sm: 16.0,
            icon_md: 20.0,
            icon_lg: 24.0,
            avatar_sm: 32.0,
            avatar_md: 40.0,
            avatar_lg: 56.0,
            control_sm: 32.0,
            control_md: 40.0,
            control_lg: 48.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_picks_largest_matching_breakpoint() {
        let bp = BreakpointTokens::default();
        assert_eq!(bp.classify(320), BreakpointToken::Xs);
        assert_eq!(bp.classify(768), BreakpointToken::Md);
        assert_eq!(bp.classify(1100), BreakpointToken::Lg);
        assert_eq!(bp.classify(4000), BreakpointToken::Xxl);
    }
}
