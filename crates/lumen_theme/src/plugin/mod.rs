//! Theme plugins
//!
//! A plugin transforms a theme payload after composition. Plugins go through
//! a small lifecycle:
//!
//! ```text
//! Registered ──initialize──▶ Initialized ──▶ Enabled ⇄ Disabled
//!      │                                         │
//!      └── init error / timeout ──▶ Failed       └── unregister ──▶ (removed)
//! ```
//!
//! Manifests declare permissions by name; they are parsed into
//! [`PluginPermission`] at registration. Permissions and memory limits are
//! declarative: nothing here isolates a plugin from the process.

pub mod builtin;
mod manager;

pub use manager::PluginManager;

use crate::error::ThemeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Capabilities a plugin may request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginPermission {
    ReadTheme,
    ModifyColors,
    ModifyTypography,
    ModifySpacing,
    ModifyMotion,
    /// Fetching fonts, images or remote token files
    ExternalResources,
}

impl PluginPermission {
    pub const ALL: &'static [PluginPermission] = &[
        PluginPermission::ReadTheme,
        PluginPermission::ModifyColors,
        PluginPermission::ModifyTypography,
        PluginPermission::ModifySpacing,
        PluginPermission::ModifyMotion,
        PluginPermission::ExternalResources,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PluginPermission::ReadTheme => "read-theme",
            PluginPermission::ModifyColors => "modify-colors",
            PluginPermission::ModifyTypography => "modify-typography",
            PluginPermission::ModifySpacing => "modify-spacing",
            PluginPermission::ModifyMotion => "modify-motion",
            PluginPermission::ExternalResources => "external-resources",
        }
    }
}

impl FromStr for PluginPermission {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                ThemeError::validation_with(
                    format!("unknown plugin permission '{s}'"),
                    Self::ALL.iter().map(|p| p.name().to_string()).collect(),
                )
            })
    }
}

impl fmt::Display for PluginPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Plugin identity and requested permissions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl PluginManifest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            permissions: Vec::new(),
        }
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }
}

/// What a plugin sees during initialization
#[derive(Clone, Debug)]
pub struct PluginContext {
    pub plugin_id: String,
    pub permissions: Vec<PluginPermission>,
    /// Declared memory ceiling; not measured
    pub max_memory_bytes: Option<usize>,
}

impl PluginContext {
    pub fn has(&self, permission: PluginPermission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// A theme transformation with an async lifecycle.
///
/// `T` is the payload the plugin rewrites, usually
/// [`ComposedTheme`](crate::ComposedTheme).
#[async_trait]
pub trait ThemePlugin<T>: Send + Sync {
    fn manifest(&self) -> &PluginManifest;

    /// Called once at registration, bounded by the manager's init timeout
    async fn initialize(&self, _ctx: &PluginContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Produce a transformed copy of `theme`
    fn apply(&self, theme: &T) -> anyhow::Result<T>;

    /// Called on unregister
    async fn cleanup(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Lifecycle state of a registered plugin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginState {
    Registered,
    Initialized,
    Enabled,
    Disabled,
    Failed,
}

impl fmt::Display for PluginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PluginState::Registered => "registered",
            PluginState::Initialized => "initialized",
            PluginState::Enabled => "enabled",
            PluginState::Disabled => "disabled",
            PluginState::Failed => "failed",
        })
    }
}

/// Snapshot of one plugin for listings and health reports
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PluginStatus {
    pub id: String,
    pub name: String,
    pub version: String,
    pub state: PluginState,
    pub permissions: Vec<PluginPermission>,
    pub apply_errors: u64,
    pub last_error: Option<String>,
}

/// Manager-wide plugin limits
#[derive(Clone, Debug, PartialEq)]
pub struct PluginSettings {
    pub init_timeout: Duration,
    pub allow_external_resources: bool,
    pub max_memory_bytes: Option<usize>,
    /// Enable plugins as soon as they initialize
    pub auto_enable: bool,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            init_timeout: Duration::from_secs(5),
            allow_external_resources: false,
            max_memory_bytes: None,
            auto_enable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissions_parse_by_name() {
        for permission in PluginPermission::ALL {
            assert_eq!(permission.name().parse::<PluginPermission>().unwrap(), *permission);
        }
        let err = "write-disk".parse::<PluginPermission>().unwrap_err();
        assert_eq!(err.code(), "THEME_002");
    }

    #[test]
    fn manifest_deserializes_without_permissions() {
        let manifest: PluginManifest =
            serde_json::from_str(r#"{"id":"x","name":"X","version":"0.1.0"}"#).unwrap();
        assert!(manifest.permissions.is_empty());
    }
}
