//! Theme engine
//!
//! The engine owns every registry (themes, cache, plugins, validation rules)
//! as one explicit instance. It is `Send + Sync`; share it by reference or
//! behind an `Arc`.
//!
//! # Theme creation
//!
//! ```text
//! create_theme(variant, overrides)
//!     │
//!     ├── cache lookup ── miss ──▶ ThemeComposer::compose ──▶ cache insert
//!     ├── PluginManager::apply      (enabled plugins, in order)
//!     ├── accessibility enforcement (when the theme asks for it)
//!     ├── ThemeEnhancer::enhance
//!     └── ThemeValidator::validate  (errors block, warnings don't)
//! ```
//!
//! The cache holds compositions before plugins run, so enabling or disabling
//! a plugin takes effect on the next call without invalidation.

use crate::cache::{cache_key, CacheMetrics, CacheSettings, ThemeCache};
use crate::composer::ThemeComposer;
use crate::config::LumenConfig;
use crate::contrast;
use crate::enhancer::{EnhancedTheme, ThemeEnhancer};
use crate::error::{Result, ThemeError};
use crate::plugin::{PluginManager, PluginSettings, PluginStatus, ThemePlugin};
use crate::sync::MutexExt;
use crate::theme::{ComposedTheme, ThemeConfig};
use crate::themes;
use crate::tokens::{ThemeTokens, TokenOverrides};
use crate::validator::{ThemeValidator, ValidationReport};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Lookups needed before a low hit rate counts against health
const HIT_RATE_MIN_LOOKUPS: u64 = 10;
const HIT_RATE_DEGRADED_BELOW: f64 = 0.5;
const PLUGIN_FAILURES_UNHEALTHY: u64 = 3;

/// Runtime settings for a [`ThemeEngine`]
#[derive(Clone, Debug, PartialEq)]
pub struct EngineSettings {
    pub cache: CacheSettings,
    /// `None` disables the background sweeper
    pub sweep_interval: Option<Duration>,
    pub plugins: PluginSettings,
    pub performance_budget: Duration,
    pub builtin_themes: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            cache: CacheSettings::default(),
            sweep_interval: Some(Duration::from_secs(60)),
            plugins: PluginSettings::default(),
            performance_budget: Duration::from_millis(50),
            builtin_themes: false,
        }
    }
}

/// Overall engine health, ordered from best to worst
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Clone, Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub cache: CacheMetrics,
    pub variants: usize,
    pub plugins: Vec<PluginStatus>,
    pub plugin_failures: u64,
    /// Errors surfaced so far, by code
    pub error_counts: BTreeMap<&'static str, u64>,
    pub notes: Vec<String>,
}

/// Builder for [`ThemeEngine`]
#[derive(Default)]
pub struct ThemeEngineBuilder {
    settings: EngineSettings,
    themes: Vec<ThemeConfig>,
    defaults: Option<ThemeTokens>,
    enhancer: Option<ThemeEnhancer>,
    validator: Option<ThemeValidator>,
}

impl ThemeEngineBuilder {
    pub fn settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Register light, dark, high-contrast and dim before other themes
    pub fn with_builtin_themes(mut self) -> Self {
        self.settings.builtin_themes = true;
        self
    }

    pub fn theme(mut self, config: ThemeConfig) -> Self {
        self.themes.push(config);
        self
    }

    pub fn themes(mut self, configs: impl IntoIterator<Item = ThemeConfig>) -> Self {
        self.themes.extend(configs);
        self
    }

    /// Bottom composition layer; defaults to the light palette
    pub fn defaults(mut self, tokens: ThemeTokens) -> Self {
        self.defaults = Some(tokens);
        self
    }

    pub fn enhancer(mut self, enhancer: ThemeEnhancer) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    pub fn validator(mut self, validator: ThemeValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn build(self) -> Result<ThemeEngine> {
        let composer = match self.defaults {
            Some(tokens) => ThemeComposer::with_defaults(tokens),
            None => ThemeComposer::new(),
        };
        if self.settings.builtin_themes {
            for config in themes::builtin_configs() {
                composer.register_theme(config)?;
            }
        }
        for config in self.themes {
            composer.register_theme(config)?;
        }

        debug!(
            variants = composer.len(),
            cache_capacity = self.settings.cache.capacity.get(),
            "theme engine built"
        );
        Ok(ThemeEngine {
            composer,
            cache: Arc::new(ThemeCache::new(self.settings.cache)),
            enhancer: self.enhancer.unwrap_or_default(),
            validator: self.validator.unwrap_or_default(),
            plugins: PluginManager::new(self.settings.plugins.clone()),
            error_counts: Mutex::new(FxHashMap::default()),
            settings: self.settings,
        })
    }
}

/// Theme composition, caching, plugins and validation behind one handle
pub struct ThemeEngine {
    composer: ThemeComposer,
    cache: Arc<ThemeCache>,
    enhancer: ThemeEnhancer,
    validator: ThemeValidator,
    plugins: PluginManager<ComposedTheme>,
    settings: EngineSettings,
    error_counts: Mutex<FxHashMap<&'static str, u64>>,
}

impl ThemeEngine {
    pub fn builder() -> ThemeEngineBuilder {
        ThemeEngineBuilder::default()
    }

    /// Engine configured from a parsed `lumen.toml`
    pub fn from_config(config: &LumenConfig) -> Result<Self> {
        Self::builder()
            .settings(config.engine.settings()?)
            .themes(config.themes.iter().cloned())
            .build()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    // ========== Themes ==========

    /// Register or replace a theme. Clears the cache.
    pub fn register_theme(&self, config: ThemeConfig) -> Result<()> {
        self.observe(self.composer.register_theme(config))?;
        self.cache.clear();
        Ok(())
    }

    pub fn unregister_theme(&self, name: &str) -> Option<ThemeConfig> {
        let removed = self.composer.unregister_theme(name);
        if removed.is_some() {
            self.cache.clear();
        }
        removed
    }

    pub fn variants(&self) -> Vec<String> {
        self.composer.variants()
    }

    pub fn theme_config(&self, name: &str) -> Option<ThemeConfig> {
        self.composer.config(name)
    }

    /// Composed theme after plugins, without enhancement or validation
    pub fn compose(&self, variant: &str, overrides: &TokenOverrides) -> Result<Arc<ComposedTheme>> {
        self.observe(self.compose_with_plugins(variant, overrides))
    }

    /// Build the enhanced theme for `variant` with caller `overrides`
    pub fn create_theme(&self, variant: &str, overrides: &TokenOverrides) -> Result<EnhancedTheme> {
        let started = Instant::now();
        let result = self.observe(self.build_theme(variant, overrides));
        self.check_budget("create_theme", variant, started.elapsed());
        result
    }

    /// [`Self::create_theme`] without overrides
    pub fn theme(&self, variant: &str) -> Result<EnhancedTheme> {
        self.create_theme(variant, &TokenOverrides::default())
    }

    /// Validation report for `variant`; never fails on rule violations
    pub fn validate(&self, variant: &str, overrides: &TokenOverrides) -> Result<ValidationReport> {
        let composed = self.compose(variant, overrides)?;
        Ok(self.validator.validate(&composed))
    }

    pub fn validator(&self) -> &ThemeValidator {
        &self.validator
    }

    fn compose_with_plugins(
        &self,
        variant: &str,
        overrides: &TokenOverrides,
    ) -> Result<Arc<ComposedTheme>> {
        let key = cache_key(variant, overrides).map_err(|e| ThemeError::composition(variant, e))?;
        let composed = match self.cache.get(&key) {
            Some(theme) => theme,
            None => {
                let theme = Arc::new(self.composer.compose(variant, overrides)?);
                self.cache.insert(key, Arc::clone(&theme));
                theme
            }
        };

        if self.plugins.is_empty() {
            return Ok(composed);
        }
        Ok(Arc::new(self.plugins.apply(&composed)))
    }

    fn build_theme(&self, variant: &str, overrides: &TokenOverrides) -> Result<EnhancedTheme> {
        let mut composed = self.compose_with_plugins(variant, overrides)?;

        if let Some(a11y) = self
            .composer
            .config(variant)
            .map(|config| config.accessibility)
            .filter(|a11y| a11y.enforce_contrast)
        {
            let report = contrast::audit(&composed.tokens.colors, a11y.min_level);
            if !report.compliant {
                let issues = report
                    .failures()
                    .map(|check| {
                        format!(
                            "{} on {}: {:.2}:1 ({})",
                            check.foreground, check.background, check.report.ratio, check.report.level
                        )
                    })
                    .collect();
                return Err(ThemeError::validation_with(
                    format!("theme '{variant}' does not meet WCAG {}", a11y.min_level),
                    issues,
                ));
            }
            Arc::make_mut(&mut composed).metadata.accessibility = Some(report);
        }

        let enhanced = self.enhancer.enhance(composed)?;

        let report = self.validator.validate(enhanced.composed());
        if !report.is_valid() {
            return Err(ThemeError::validation_with(
                format!("theme '{variant}' failed validation (score {})", report.score),
                report.errors.iter().map(ToString::to_string).collect(),
            ));
        }
        for warning in &report.warnings {
            debug!(theme = variant, "{warning}");
        }
        Ok(enhanced)
    }

    // ========== Plugins ==========

    pub async fn register_plugin<P>(&self, plugin: P) -> Result<()>
    where
        P: ThemePlugin<ComposedTheme> + 'static,
    {
        let result = self.plugins.register(plugin).await;
        self.observe(result)
    }

    pub async fn unregister_plugin(&self, id: &str) -> Result<()> {
        let result = self.plugins.unregister(id).await;
        self.observe(result)
    }

    pub fn enable_plugin(&self, id: &str) -> Result<()> {
        self.observe(self.plugins.enable(id))
    }

    pub fn disable_plugin(&self, id: &str) -> Result<()> {
        self.observe(self.plugins.disable(id))
    }

    pub fn plugin_statuses(&self) -> Vec<PluginStatus> {
        self.plugins.statuses()
    }

    pub fn plugins(&self) -> &PluginManager<ComposedTheme> {
        &self.plugins
    }

    // ========== Cache ==========

    pub fn cache_metrics(&self) -> CacheMetrics {
        self.cache.metrics()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("theme cache cleared");
    }

    /// Start the periodic purge on the current tokio runtime.
    ///
    /// Returns `None` when the sweep interval is disabled.
    pub fn spawn_cache_sweeper(&self) -> Option<JoinHandle<()>> {
        let interval = self.settings.sweep_interval?;
        Some(self.cache.spawn_sweeper(interval))
    }

    // ========== Health ==========

    pub fn health(&self) -> HealthReport {
        let cache = self.cache.metrics();
        let variants = self.composer.len();
        let plugin_failures = self.plugins.failure_count();
        let mut notes = Vec::new();

        let mut status = HealthStatus::Healthy;
        if variants == 0 {
            status = HealthStatus::Unhealthy;
            notes.push("no theme variants registered".to_string());
        }
        if plugin_failures >= PLUGIN_FAILURES_UNHEALTHY {
            status = HealthStatus::Unhealthy;
            notes.push(format!("{plugin_failures} plugin failures"));
        } else if plugin_failures > 0 {
            status = status.max(HealthStatus::Degraded);
            notes.push(format!("{plugin_failures} plugin failure(s)"));
        }
        if cache.lookups() >= HIT_RATE_MIN_LOOKUPS && cache.hit_rate < HIT_RATE_DEGRADED_BELOW {
            status = status.max(HealthStatus::Degraded);
            notes.push(format!("cache hit rate {:.0}%", cache.hit_rate * 100.0));
        }

        HealthReport {
            status,
            cache,
            variants,
            plugins: self.plugins.statuses(),
            plugin_failures,
            error_counts: self.error_counts(),
            notes,
        }
    }

    /// Errors surfaced so far, by code
    pub fn error_counts(&self) -> BTreeMap<&'static str, u64> {
        self.error_counts
            .guard()
            .iter()
            .map(|(code, count)| (*code, *count))
            .collect()
    }

    fn observe<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            err.report();
            self.count(err);
        }
        result
    }

    fn count(&self, err: &ThemeError) {
        *self.error_counts.guard().entry(err.code()).or_default() += 1;
    }

    fn check_budget(&self, operation: &str, variant: &str, elapsed: Duration) {
        let budget = self.settings.performance_budget;
        if elapsed <= budget {
            return;
        }
        let err = ThemeError::Performance {
            operation: format!("{operation}({variant})"),
            elapsed_ms: elapsed.as_millis() as u64,
            budget_ms: budget.as_millis() as u64,
        };
        warn!(code = err.code(), "{err}");
        self.count(&err);
    }
}
