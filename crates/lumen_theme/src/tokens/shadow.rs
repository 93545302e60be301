//! Shadow tokens for theming

use crate::color::Color;
use crate::error::ThemeError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A box shadow definition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
}

impl Shadow {
    pub const fn new(offset_x: f32, offset_y: f32, blur: f32, spread: f32, color: Color) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread,
            color,
        }
    }

    pub const fn none() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, Color::TRANSPARENT)
    }

    /// CSS `box-shadow` value
    pub fn to_css(&self) -> String {
        if self.color.a == 0.0 {
            return "none".to_string();
        }
        format!(
            "{}px {}px {}px {}px {}",
            self.offset_x,
            self.offset_y,
            self.blur,
            self.spread,
            self.color.to_hex()
        )
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self::none()
    }
}

impl FromStr for Shadow {
    type Err = ThemeError;

    /// Parses `x y blur spread color`, e.g. `0 4px 6px -1px #0000001a`, or `none`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.eq_ignore_ascii_case("none") {
            return Ok(Self::none());
        }

        let invalid = || ThemeError::validation(format!("invalid shadow: '{s}'"));
        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.len() != 5 {
            return Err(invalid());
        }
        let length = |raw: &str| -> Result<f32, ThemeError> {
            raw.trim_end_matches("px").parse::<f32>().map_err(|_| invalid())
        };

        Ok(Self::new(
            length(parts[0])?,
            length(parts[1])?,
            length(parts[2])?,
            length(parts[3])?,
            parts[4].parse()?,
        ))
    }
}

token_set! {
    /// Complete set of shadow tokens
    ShadowTokens / ShadowOverrides: ShadowToken => Shadow {
        Sm => sm = "sm",
        Default => base = "default",
        Md => md = "md",
        Lg => lg = "lg",
        Xl => xl = "xl",
        Xxl => xxl = "2xl",
        Inner => inner = "inner",
        None => none = "none",
    }
}

impl ShadowTokens {
    /// Shadows tuned for light surfaces
    pub fn light() -> Self {
        Self::with_strength(1.0)
    }

    /// Shadows tuned for dark surfaces (stronger alpha)
    pub fn dark() -> Self {
        Self::with_strength(3.0)
    }

    fn with_strength(k: f32) -> Self {
        let ink = |alpha: f32| Color::BLACK.with_alpha((alpha * k).min(1.0));
        Self {
            sm: Shadow::new(0.0, 1.0, 2.0, 0.0, ink(0.05)),
            base: Shadow::new(0.0, 1.0, 3.0, 0.0, ink(0.1)),
            md: Shadow::new(0.0, 4.0, 6.0, -1.0, ink(0.1)),
            lg: Shadow::new(0.0, 10.0, 15.0, -3.0, ink(0.1)),
            xl: Shadow::new(0.0, 20.0, 25.0, -5.0, ink(0.1)),
            xxl: Shadow::new(0.0, 25.0, 50.0, -12.0, ink(0.25)),
            inner: Shadow::new(0.0, 2.0, 4.0, 0.0, ink(0.05)),
            none: Shadow::none(),
        }
    }
}

impl Default for ShadowTokens {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_like_shadow() {
        let shadow: Shadow = "0 4px 6px -1px #000000".parse().unwrap();
        assert_eq!(shadow.offset_y, 4.0);
        assert_eq!(shadow.spread, -1.0);
        assert_eq!(shadow.color, Color::BLACK);
        assert_eq!("none".parse::<Shadow>().unwrap(), Shadow::none());
        assert!("4px 6px".parse::<Shadow>().is_err());
    }

    #[test]
    fn dark_shadows_are_stronger() {
        let light = ShadowTokens::light();
        let dark = ShadowTokens::dark();
        assert!(dark.md.color.a > light.md.color.a);
        assert_eq!(dark.get(ShadowToken::None).to_css(), "none");
    }
}
