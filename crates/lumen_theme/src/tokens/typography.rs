//! Typography tokens: families, sizes, weights and line heights

use serde::Serialize;

token_set! {
    /// Font family stacks
    FontFamilyTokens / FontFamilyOverrides: FontFamilyToken => String {
        Sans => sans = "sans",
        Serif => serif = "serif",
        Mono => mono = "mono",
    }
}

token_set! {
    /// Font size scale in pixels
    FontSizeTokens / FontSizeOverrides: FontSizeToken => f32 {
        Xs => xs = "xs",
        Sm => sm = "sm",
        Base => base = "base",
        Lg => lg = "lg",
        Xl => xl = "xl",
        Xxl => xxl = "2xl",
        Xxxl => xxxl = "3xl",
        Display => display = "display",
    }
}

token_set! {
    /// Font weights (100-900)
    FontWeightTokens / FontWeightOverrides: FontWeightToken => u16 {
        Light => light = "light",
        Normal => normal = "normal",
        Medium => medium = "medium",
        Semibold => semibold = "semibold",
        Bold => bold = "bold",
    }
}

token_set! {
    /// Unitless line height multipliers
    LineHeightTokens / LineHeightOverrides: LineHeightToken => f32 {
        Tight => tight = "tight",
        Normal => normal = "normal",
        Relaxed => relaxed = "relaxed",
    }
}

impl Default for FontFamilyTokens {
    fn default() -> Self {
        Self {
            sans: "Inter, system-ui, -apple-system, 'Segoe UI', sans-serif".to_string(),
            serif: "Georgia, 'Times New Roman', serif".to_string(),
            mono: "'JetBrains Mono', Menlo, Consolas, monospace".to_string(),
        }
    }
}

impl Default for FontSizeTokens {
    fn default() -> Self {
        Self {
            xs: 12.0,
            sm: 14.0,
            base: 16.0,
            lg: 18.0,
            xl: 20.0,
            xxl: 24.0,
            xxxl: 30.0,
            display: 36.0,
        }
    }
}

impl Default for FontWeightTokens {
    fn default() -> Self {
        Self {
            light: 300,
            normal: 400,
            medium: 500,
            semibold: 600,
            bold: 700,
        }
    }
}

impl Default for LineHeightTokens {
    fn default() -> Self {
        Self {
            tight: 1.25,
            normal: 1.5,
            relaxed: 1.75,
        }
    }
}

/// Resolved text style for one step of the type scale
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    pub family: String,
    pub size: f32,
    pub weight: u16,
    pub line_height: f32,
}

impl FontSizeToken {
    /// Weight used for this step when building the type scale
    pub fn default_weight(self) -> FontWeightToken {
        match self {
            FontSizeToken::Xs | FontSizeToken::Sm | FontSizeToken::Base | FontSizeToken::Lg => {
                FontWeightToken::Normal
            }
            FontSizeToken::Xl | FontSizeToken::Xxl => FontWeightToken::Semibold,
            FontSizeToken::Xxxl | FontSizeToken::Display => FontWeightToken::Bold,
        }
    }

    /// Line height used for this step when building the type scale
    pub fn default_line_height(self) -> LineHeightToken {
        match self {
            FontSizeToken::Xxxl | FontSizeToken::Display => LineHeightToken::Tight,
            _ => LineHeightToken::Normal,
        }
    }
}
