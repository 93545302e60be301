//! Lumen Theme Engine
//!
//! Design-token theming with inheritance, caching, plugins and WCAG checks.
//!
//! # Overview
//!
//! The engine provides:
//! - **Design tokens**: Colors, typography, spacing, shadows, breakpoints, radii, motion
//! - **Composition**: Themes extend parents and layer overrides key by key
//! - **Caching**: Composed themes are kept in a TTL + LRU cache
//! - **Plugins**: Async-initialized transformations applied after composition
//! - **Validation**: Rule-based scoring and WCAG contrast auditing
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lumen_theme::{ColorToken, SpacingToken, ThemeEngine, TokenOverrides};
//!
//! let engine = ThemeEngine::builder().with_builtin_themes().build()?;
//!
//! let theme = engine.theme("dark")?;
//! let primary = theme.get_color(ColorToken::Primary);
//! let gutter = theme.get_spacing(SpacingToken::Space4);
//!
//! // Per-call overrides; the composition is cached by variant + overrides
//! let mut overrides = TokenOverrides::default();
//! overrides.set_path("colors.primary", "#ff0066")?;
//! let branded = engine.create_theme("dark", &overrides)?;
//! ```
//!
//! # Composition
//!
//! Each token is resolved from the highest layer that sets it:
//!
//! 1. caller overrides
//! 2. the theme's own `overrides`
//! 3. the theme's own `tokens`
//! 4. parents named in `extends`, later parents first
//! 5. global defaults
//!
//! # Themes
//!
//! Built-in themes are listed by [`ThemePreset`]: `light`, `dark`,
//! `high-contrast` and `dim`.
//!
//! # Errors
//!
//! Every failure is a [`ThemeError`] with a stable code (`THEME_001`..`THEME_008`),
//! a category, a severity and a declared recovery strategy.

pub mod cache;
pub mod color;
pub mod composer;
pub mod config;
pub mod contrast;
pub mod engine;
pub mod enhancer;
pub mod error;
pub mod plugin;
mod sync;
pub mod theme;
pub mod themes;
pub mod tokens;
pub mod validator;

// Re-export commonly used types
pub use cache::{cache_key, CacheMetrics, CacheSettings, ThemeCache};
pub use color::Color;
pub use composer::ThemeComposer;
pub use config::{EngineConfig, LumenConfig};
pub use contrast::{check_compliance, check_wcag_compliance, ContrastReport, WcagLevel};
pub use engine::{EngineSettings, HealthReport, HealthStatus, ThemeEngine, ThemeEngineBuilder};
pub use enhancer::{ColorVariants, EnhancedTheme, ThemeEnhancer};
pub use error::{ErrorCategory, ErrorSeverity, RecoveryStrategy, Result, ThemeError};
pub use plugin::builtin::{ContrastBoost, ReducedMotion};
pub use plugin::{
    PluginContext, PluginManager, PluginManifest, PluginPermission, PluginSettings, PluginState,
    PluginStatus, ThemePlugin,
};
pub use theme::{AccessibilityConfig, ColorScheme, ComposedTheme, ThemeConfig, ThemeMetadata};
pub use themes::ThemePreset;
pub use tokens::*;
pub use validator::{
    Severity, ThemeValidator, ValidationIssue, ValidationReport, ValidationRule, ValidationStatus,
};
