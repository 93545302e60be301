//! Lumen configuration file handling

use crate::cache::CacheSettings;
use crate::engine::EngineSettings;
use crate::error::{Result, ThemeError};
use crate::plugin::PluginSettings;
use crate::theme::ThemeConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

/// File name looked up when a directory is given
pub const CONFIG_FILE: &str = "lumen.toml";

/// Top-level configuration (lumen.toml)
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LumenConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    /// Extra themes registered after the built-ins
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<ThemeConfig>,
}

/// Engine tuning
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cache_capacity: usize,
    pub cache_ttl_secs: u64,
    /// Background purge period; 0 disables the sweeper
    pub sweep_interval_secs: u64,
    pub plugin_init_timeout_ms: u64,
    pub allow_external_resources: bool,
    pub auto_enable_plugins: bool,
    /// Declared per-plugin memory ceiling; not measured
    pub max_plugin_memory_bytes: Option<usize>,
    /// `create_theme` calls slower than this are reported
    pub performance_budget_ms: u64,
    /// Register light, dark, high-contrast and dim
    pub builtin_themes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 50,
            cache_ttl_secs: 300,
            sweep_interval_secs: 60,
            plugin_init_timeout_ms: 5000,
            allow_external_resources: false,
            auto_enable_plugins: true,
            max_plugin_memory_bytes: None,
            performance_budget_ms: 50,
            builtin_themes: true,
        }
    }
}

impl EngineConfig {
    /// Convert to runtime settings, rejecting unusable values
    pub fn settings(&self) -> Result<EngineSettings> {
        let capacity = NonZeroUsize::new(self.cache_capacity)
            .ok_or_else(|| ThemeError::configuration("engine.cache_capacity must be at least 1"))?;
        if self.plugin_init_timeout_ms == 0 {
            return Err(ThemeError::configuration(
                "engine.plugin_init_timeout_ms must be at least 1",
            ));
        }

        Ok(EngineSettings {
            cache: CacheSettings {
                capacity,
                ttl: Duration::from_secs(self.cache_ttl_secs),
            },
            sweep_interval: (self.sweep_interval_secs > 0)
                .then(|| Duration::from_secs(self.sweep_interval_secs)),
            plugins: PluginSettings {
                init_timeout: Duration::from_millis(self.plugin_init_timeout_ms),
                allow_external_resources: self.allow_external_resources,
                max_memory_bytes: self.max_plugin_memory_bytes,
                auto_enable: self.auto_enable_plugins,
            },
            performance_budget: Duration::from_millis(self.performance_budget_ms),
            builtin_themes: self.builtin_themes,
        })
    }
}

impl LumenConfig {
    /// Load from a file, or from `lumen.toml` inside a directory
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            return Err(ThemeError::configuration(format!(
                "no {CONFIG_FILE} found at {}",
                config_path.display()
            )));
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            ThemeError::configuration_from(format!("failed to read {}", config_path.display()), e)
        })?;
        toml::from_str(&content).map_err(|e| {
            ThemeError::configuration_from(format!("failed to parse {}", config_path.display()), e)
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ThemeError::configuration_from("failed to parse config", e))
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ThemeError::configuration_from("failed to serialize config", e))
    }
}
