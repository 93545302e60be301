//! WCAG contrast calculation
//!
//! Relative luminance and contrast ratio follow WCAG 2.x
//! (<https://www.w3.org/TR/WCAG20/#contrast-ratiodef>). Alpha is ignored:
//! colors are treated as opaque.

use crate::color::Color;
use crate::error::Result;
use crate::tokens::{ColorToken, ColorTokens};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Foreground/background pairings checked for every theme
pub const CONTRAST_PAIRINGS: &[(ColorToken, ColorToken)] = &[
    (ColorToken::TextPrimary, ColorToken::Background),
    (ColorToken::TextPrimary, ColorToken::Surface),
    (ColorToken::TextSecondary, ColorToken::Background),
    (ColorToken::TextInverse, ColorToken::Primary),
];

/// WCAG conformance level reached by a color pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    #[serde(rename = "fail")]
    Fail,
    /// 3:1, large text only
    #[serde(rename = "AA-large")]
    AaLarge,
    /// 4.5:1
    #[serde(rename = "AA")]
    Aa,
    /// 7:1
    #[serde(rename = "AAA")]
    Aaa,
}

impl WcagLevel {
    /// Minimum contrast ratio for normal text at this level
    pub fn min_ratio(self) -> f64 {
        match self {
            WcagLevel::Fail => 0.0,
            WcagLevel::AaLarge => 3.0,
            WcagLevel::Aa => 4.5,
            WcagLevel::Aaa => 7.0,
        }
    }

    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 7.0 {
            WcagLevel::Aaa
        } else if ratio >= 4.5 {
            WcagLevel::Aa
        } else if ratio >= 3.0 {
            WcagLevel::AaLarge
        } else {
            WcagLevel::Fail
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WcagLevel::Fail => "fail",
            WcagLevel::AaLarge => "AA-large",
            WcagLevel::Aa => "AA",
            WcagLevel::Aaa => "AAA",
        })
    }
}

/// Contrast ratio of one color pair and the level it reaches
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContrastReport {
    /// Truncated to two decimals
    pub ratio: f64,
    pub level: WcagLevel,
}

impl ContrastReport {
    pub fn meets(&self, required: WcagLevel) -> bool {
        self.level >= required
    }
}

/// One checked pairing inside an [`AccessibilityReport`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairingCheck {
    pub foreground: ColorToken,
    pub background: ColorToken,
    pub report: ContrastReport,
    pub passes: bool,
}

/// Compliance of a theme's fixed pairings against a required level
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityReport {
    pub required: WcagLevel,
    pub checks: Vec<PairingCheck>,
    pub compliant: bool,
}

impl AccessibilityReport {
    /// Pairings that miss the required level
    pub fn failures(&self) -> impl Iterator<Item = &PairingCheck> {
        self.checks.iter().filter(|check| !check.passes)
    }
}

/// WCAG relative luminance of an sRGB color
pub fn relative_luminance(color: Color) -> f64 {
    fn channel(c: f32) -> f64 {
        let c = f64::from(c.clamp(0.0, 1.0));
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * channel(color.r) + 0.7152 * channel(color.g) + 0.0722 * channel(color.b)
}

/// Unrounded contrast ratio between two colors (1.0 ..= 21.0)
pub fn contrast_ratio(foreground: Color, background: Color) -> f64 {
    let l1 = relative_luminance(foreground);
    let l2 = relative_luminance(background);
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + 0.05) / (darker + 0.05)
}

/// The reported ratio is truncated to two decimals and the level is read
/// from that value, so a pair just under a threshold never prints as meeting it.
pub fn check_compliance(foreground: Color, background: Color) -> ContrastReport {
    let ratio = contrast_ratio(foreground, background);
    // the epsilon absorbs float error on exact ratios such as 21:1
    let ratio = (ratio * 100.0 + 1e-9).floor() / 100.0;
    ContrastReport {
        ratio,
        level: WcagLevel::from_ratio(ratio),
    }
}

/// [`check_compliance`] for color strings such as `#000000`
pub fn check_wcag_compliance(foreground: &str, background: &str) -> Result<ContrastReport> {
    Ok(check_compliance(foreground.parse()?, background.parse()?))
}

/// Check every pairing in [`CONTRAST_PAIRINGS`] against `required`
pub fn audit(colors: &ColorTokens, required: WcagLevel) -> AccessibilityReport {
    let checks: Vec<PairingCheck> = CONTRAST_PAIRINGS
        .iter()
        .map(|&(foreground, background)| {
            let report = check_compliance(*colors.get(foreground), *colors.get(background));
            PairingCheck {
                foreground,
                background,
                report,
                passes: report.meets(required),
            }
        })
        .collect();
    let compliant = checks.iter().all(|check| check.passes);
    AccessibilityReport {
        required,
        checks,
        compliant,
    }
}

/// Move `foreground` toward black or white until it reaches `required`
/// against `background`. Returns the best color found when the level is
/// unreachable.
pub fn ensure_contrast(foreground: Color, background: Color, required: WcagLevel) -> Color {
    if check_compliance(foreground, background).meets(required) {
        return foreground;
    }
    let toward_dark = relative_luminance(background) > 0.5;
    let mut best = foreground;
    for step in 1..=20 {
        let amount = step as f32 * 0.05;
        let candidate = if toward_dark {
            foreground.shade(amount)
        } else {
            foreground.tint(amount)
        };
        best = candidate;
        if check_compliance(candidate, background).meets(required) {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_on_white_is_21_aaa() {
        let report = check_wcag_compliance("#000000", "#FFFFFF").unwrap();
        assert!((report.ratio - 21.0).abs() < 0.01);
        assert_eq!(report.level, WcagLevel::Aaa);
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = Color::from_hex(0x4F46E5);
        let b = Color::WHITE;
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn same_color_fails() {
        let report = check_compliance(Color::from_hex(0x777777), Color::from_hex(0x777777));
        assert_eq!(report.ratio, 1.0);
        assert_eq!(report.level, WcagLevel::Fail);
    }

    #[test]
    fn mid_gray_on_white_is_aa_large() {
        // #949494 on white is about 3.03:1
        let report = check_compliance(Color::from_hex(0x949494), Color::WHITE);
        assert_eq!(report.level, WcagLevel::AaLarge);
    }

    #[test]
    fn ratio_just_under_threshold_stays_below_it() {
        // #959595 on white is about 2.995:1
        let report = check_compliance(Color::from_hex(0x959595), Color::WHITE);
        assert_eq!(report.ratio, 2.99);
        assert_eq!(report.level, WcagLevel::Fail);
    }

    #[test]
    fn level_always_matches_reported_ratio() {
        for v in 0..=255u8 {
            let report = check_compliance(Color::from_rgba8(v, v, v, 255), Color::WHITE);
            assert_eq!(report.level, WcagLevel::from_ratio(report.ratio), "gray {v:#04x}");
        }
    }

    #[test]
    fn invalid_input_is_a_validation_error() {
        let err = check_wcag_compliance("black", "#fff").unwrap_err();
        assert_eq!(err.code(), "THEME_002");
    }

    #[test]
    fn ensure_contrast_reaches_level_on_light_background() {
        let fixed = ensure_contrast(Color::from_hex(0xAAAAAA), Color::WHITE, WcagLevel::Aa);
        assert!(check_compliance(fixed, Color::WHITE).meets(WcagLevel::Aa));
    }

    #[test]
    fn ensure_contrast_tints_on_dark_background() {
        let bg = Color::from_hex(0x111111);
        let fixed = ensure_contrast(Color::from_hex(0x444444), bg, WcagLevel::Aaa);
        assert!(fixed.r > 0.3);
        assert!(check_compliance(fixed, bg).meets(WcagLevel::Aaa));
    }

    #[test]
    fn level_serializes_with_wcag_names() {
        assert_eq!(serde_json::to_string(&WcagLevel::Aaa).unwrap(), "\"AAA\"");
        assert_eq!(serde_json::to_string(&WcagLevel::AaLarge).unwrap(), "\"AA-large\"");
    }
}
