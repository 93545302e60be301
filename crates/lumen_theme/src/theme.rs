//! Theme configuration and composed theme values

use crate::contrast::{AccessibilityReport, WcagLevel};
use crate::tokens::{ThemeTokens, TokenOverrides};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Light or dark appearance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// Accessibility requirements a theme declares for itself
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AccessibilityConfig {
    /// Fail theme creation when text/surface pairings miss `min_level`
    pub enforce_contrast: bool,
    /// Contrast level required when enforcing
    pub min_level: WcagLevel,
    /// Zero animation durations and flatten easings
    pub reduced_motion: bool,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            enforce_contrast: false,
            min_level: WcagLevel::Aa,
            reduced_motion: false,
        }
    }
}

/// A registered theme: its own tokens plus the parents it inherits from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ThemeConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub scheme: ColorScheme,
    /// Parent themes, applied in order before `tokens`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    /// Tokens this theme defines
    #[serde(default)]
    pub tokens: TokenOverrides,
    /// Final adjustments applied after `tokens`
    #[serde(default)]
    pub overrides: TokenOverrides,
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl ThemeConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            description: None,
            scheme: ColorScheme::Light,
            extends: Vec::new(),
            tokens: TokenOverrides::default(),
            overrides: TokenOverrides::default(),
            accessibility: AccessibilityConfig::default(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn tokens(mut self, tokens: TokenOverrides) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends.push(parent.into());
        self
    }

    pub fn overrides(mut self, overrides: TokenOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn accessibility(mut self, accessibility: AccessibilityConfig) -> Self {
        self.accessibility = accessibility;
        self
    }
}

/// Provenance of a composed theme
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeMetadata {
    pub created_at: DateTime<Utc>,
    pub version: String,
    pub extends: Vec<String>,
    /// Present when the theme enforces contrast
    pub accessibility: Option<AccessibilityReport>,
}

/// A theme's tokens after inheritance and overrides are resolved
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComposedTheme {
    pub name: String,
    pub scheme: ColorScheme,
    pub tokens: ThemeTokens,
    pub metadata: ThemeMetadata,
}
