//! Theme composition
//!
//! Resolves a registered theme into a complete token set. Layers are applied
//! in increasing precedence:
//!
//! 1. global defaults
//! 2. parents, in declaration order (each resolved with its own parents)
//! 3. the theme's own `tokens`
//! 4. the theme's own `overrides`
//! 5. caller overrides
//!
//! Merging is per token key inside each category, so the result never has
//! holes.

use crate::contrast;
use crate::error::{Result, ThemeError};
use crate::sync::RwLockExt;
use crate::theme::{ComposedTheme, ThemeConfig, ThemeMetadata};
use crate::tokens::{ThemeTokens, TokenOverrides};
use chrono::Utc;
use indexmap::IndexMap;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Registry of theme configs plus the composition algorithm
pub struct ThemeComposer {
    themes: RwLock<IndexMap<String, ThemeConfig>>,
    defaults: ThemeTokens,
}

impl ThemeComposer {
    pub fn new() -> Self {
        Self::with_defaults(ThemeTokens::default())
    }

    /// Use `defaults` as the bottom layer instead of the built-in tokens
    pub fn with_defaults(defaults: ThemeTokens) -> Self {
        Self {
            themes: RwLock::new(IndexMap::new()),
            defaults,
        }
    }

    pub fn defaults(&self) -> &ThemeTokens {
        &self.defaults
    }

    /// Register a theme. Registering an existing name replaces it.
    ///
    /// Returns `true` when an existing theme was replaced.
    pub fn register_theme(&self, config: ThemeConfig) -> Result<bool> {
        let name = config.name.trim();
        if name.is_empty() {
            return Err(ThemeError::configuration("theme name must not be empty"));
        }
        if config.extends.iter().any(|parent| parent == name) {
            return Err(ThemeError::configuration(format!(
                "theme '{name}' cannot extend itself"
            )));
        }

        let name = name.to_string();
        let mut themes = self.themes.write_guard();
        let replaced = themes.insert(name.clone(), config).is_some();
        if replaced {
            warn!("theme '{}' was already registered; overwriting", name);
        } else {
            debug!("registered theme '{}'", name);
        }
        Ok(replaced)
    }

    pub fn unregister_theme(&self, name: &str) -> Option<ThemeConfig> {
        self.themes.write_guard().shift_remove(name)
    }

    /// Registered variant names, in registration order
    pub fn variants(&self) -> Vec<String> {
        self.themes.read_guard().keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.read_guard().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.themes.read_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn config(&self, name: &str) -> Option<ThemeConfig> {
        self.themes.read_guard().get(name).cloned()
    }

    /// Compose `name` with its inheritance chain and `overrides`
    pub fn compose(&self, name: &str, overrides: &TokenOverrides) -> Result<ComposedTheme> {
        let themes = self.themes.read_guard();
        let config = themes
            .get(name)
            .ok_or_else(|| ThemeError::not_found("theme", name, themes.keys().cloned().collect()))?;

        let mut stack = Vec::new();
        let chain = resolve_chain(&themes, config, &mut stack)?;

        let mut tokens = self.defaults.clone();
        tokens.apply(&chain);
        tokens.apply(overrides);
        if config.accessibility.reduced_motion {
            tokens.reduce_motion();
        }

        let accessibility = config
            .accessibility
            .enforce_contrast
            .then(|| contrast::audit(&tokens.colors, config.accessibility.min_level));

        debug!(
            theme = name,
            parents = config.extends.len(),
            overrides = overrides.len(),
            "composed theme"
        );

        Ok(ComposedTheme {
            name: config.name.clone(),
            scheme: config.scheme,
            tokens,
            metadata: ThemeMetadata {
                created_at: Utc::now(),
                version: config.version.clone(),
                extends: config.extends.clone(),
                accessibility,
            },
        })
    }
}

impl Default for ThemeComposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten `config` and its ancestors into one partial layer
fn resolve_chain(
    themes: &IndexMap<String, ThemeConfig>,
    config: &ThemeConfig,
    stack: &mut Vec<String>,
) -> Result<TokenOverrides> {
    stack.push(config.name.clone());

    let mut merged = TokenOverrides::default();
    for parent_name in &config.extends {
        if stack.contains(parent_name) {
            let mut cycle = stack.clone();
            cycle.push(parent_name.clone());
            return Err(ThemeError::Composition {
                variant: stack[0].clone(),
                message: format!("inheritance cycle: {}", cycle.join(" -> ")),
                source: None,
            });
        }
        let parent = themes.get(parent_name).ok_or_else(|| ThemeError::Dependency {
            dependency: parent_name.clone(),
            required_by: config.name.clone(),
            message: "parent theme not found".to_string(),
        })?;
        let parent_chain = resolve_chain(themes, parent, stack)?;
        merged.merge(&parent_chain);
    }
    merged.merge(&config.tokens);
    merged.merge(&config.overrides);

    stack.pop();
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::tokens::{ColorOverrides, ColorToken, SpacingOverrides, SpacingToken};

    fn colors(token: ColorToken, hex: u32) -> TokenOverrides {
        TokenOverrides {
            colors: ColorOverrides::default().with(token, Color::from_hex(hex)),
            ..TokenOverrides::default()
        }
    }

    #[test]
    fn unknown_theme_lists_available() {
        let composer = ThemeComposer::new();
        composer.register_theme(ThemeConfig::new("light")).unwrap();
        composer.register_theme(ThemeConfig::new("dark")).unwrap();

        match composer.compose("sepia", &TokenOverrides::default()) {
            Err(ThemeError::NotFound {
                name, available, ..
            }) => {
                assert_eq!(name, "sepia");
                assert_eq!(available, vec!["light", "dark"]);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn precedence_is_override_then_own_then_parents() {
        let composer = ThemeComposer::new();
        composer
            .register_theme(
                ThemeConfig::new("a")
                    .tokens(colors(ColorToken::Primary, 0xAA0000))
                    .overrides(colors(ColorToken::Accent, 0xAA0000)),
            )
            .unwrap();
        composer
            .register_theme(ThemeConfig::new("b").tokens(colors(ColorToken::Primary, 0xBB0000)))
            .unwrap();
        composer
            .register_theme(
                ThemeConfig::new("child")
                    .extends("a")
                    .extends("b")
                    .tokens(colors(ColorToken::Secondary, 0xCC0000)),
            )
            .unwrap();

        let theme = composer.compose("child", &TokenOverrides::default()).unwrap();
        // b is declared after a, so it wins for primary
        assert_eq!(theme.tokens.colors.primary, Color::from_hex(0xBB0000));
        assert_eq!(theme.tokens.colors.accent, Color::from_hex(0xAA0000));
        assert_eq!(theme.tokens.colors.secondary, Color::from_hex(0xCC0000));
        assert_eq!(theme.metadata.extends, vec!["a", "b"]);

        let theme = composer
            .compose("child", &colors(ColorToken::Primary, 0xDD0000))
            .unwrap();
        assert_eq!(theme.tokens.colors.primary, Color::from_hex(0xDD0000));
    }

    #[test]
    fn own_overrides_beat_own_tokens() {
        let composer = ThemeComposer::new();
        composer
            .register_theme(
                ThemeConfig::new("t")
                    .tokens(colors(ColorToken::Primary, 0x111111))
                    .overrides(colors(ColorToken::Primary, 0x222222)),
            )
            .unwrap();
        let theme = composer.compose("t", &TokenOverrides::default()).unwrap();
        assert_eq!(theme.tokens.colors.primary, Color::from_hex(0x222222));
    }

    #[test]
    fn multi_level_inheritance() {
        let composer = ThemeComposer::new();
        composer
            .register_theme(ThemeConfig::new("root").tokens(TokenOverrides {
                spacing: SpacingOverrides::default().with(SpacingToken::Space4, 20.0),
                ..TokenOverrides::default()
            }))
            .unwrap();
        composer
            .register_theme(ThemeConfig::new("mid").extends("root"))
            .unwrap();
        composer
            .register_theme(ThemeConfig::new("leaf").extends("mid"))
            .unwrap();

        let theme = composer.compose("leaf", &TokenOverrides::default()).unwrap();
        assert_eq!(theme.tokens.spacing.space_4, 20.0);
        assert_eq!(theme.tokens.spacing.space_2, 8.0);
    }

    #[test]
    fn dangling_parent_is_a_dependency_error() {
        let composer = ThemeComposer::new();
        composer
            .register_theme(ThemeConfig::new("orphan").extends("ghost"))
            .unwrap();

        let err = composer
            .compose("orphan", &TokenOverrides::default())
            .unwrap_err();
        assert_eq!(err.code(), "THEME_008");
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn cycles_are_rejected() {
        let composer = ThemeComposer::new();
        composer.register_theme(ThemeConfig::new("x").extends("y")).unwrap();
        composer.register_theme(ThemeConfig::new("y").extends("x")).unwrap();

        let err = composer.compose("x", &TokenOverrides::default()).unwrap_err();
        assert_eq!(err.code(), "THEME_003");
        assert!(err.to_string().contains("x -> y -> x"));
    }

    #[test]
    fn self_extension_and_empty_names_are_configuration_errors() {
        let composer = ThemeComposer::new();
        assert!(composer.register_theme(ThemeConfig::new("  ")).is_err());
        assert!(composer
            .register_theme(ThemeConfig::new("loop").extends("loop"))
            .is_err());
    }

    #[test]
    fn re_registering_overwrites() {
        let composer = ThemeComposer::new();
        assert!(!composer.register_theme(ThemeConfig::new("t")).unwrap());
        assert!(composer
            .register_theme(ThemeConfig::new("t").version("2.0.0"))
            .unwrap());
        assert_eq!(composer.len(), 1);
        assert_eq!(composer.config("t").unwrap().version, "2.0.0");
    }

    #[test]
    fn diamond_inheritance_is_not_a_cycle() {
        let composer = ThemeComposer::new();
        composer.register_theme(ThemeConfig::new("base")).unwrap();
        composer.register_theme(ThemeConfig::new("l").extends("base")).unwrap();
        composer.register_theme(ThemeConfig::new("r").extends("base")).unwrap();
        composer
            .register_theme(ThemeConfig::new("d").extends("l").extends("r"))
            .unwrap();
        assert!(composer.compose("d", &TokenOverrides::default()).is_ok());
    }
}
