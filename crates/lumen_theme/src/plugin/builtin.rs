//! Plugins shipped with the engine

use super::{PluginContext, PluginManifest, PluginPermission, ThemePlugin};
use crate::contrast::{self, WcagLevel, CONTRAST_PAIRINGS};
use crate::theme::ComposedTheme;
use async_trait::async_trait;

/// Zeroes animation durations and flattens easings to `linear`
pub struct ReducedMotion {
    manifest: PluginManifest,
}

impl ReducedMotion {
    pub const ID: &'static str = "reduced-motion";

    pub fn new() -> Self {
        Self {
            manifest: PluginManifest::new(Self::ID, "Reduced Motion", env!("CARGO_PKG_VERSION"))
                .permission(PluginPermission::ReadTheme.name())
                .permission(PluginPermission::ModifyMotion.name()),
        }
    }
}

impl Default for ReducedMotion {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemePlugin<ComposedTheme> for ReducedMotion {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn apply(&self, theme: &ComposedTheme) -> anyhow::Result<ComposedTheme> {
        let mut theme = theme.clone();
        theme.tokens.reduce_motion();
        Ok(theme)
    }
}

/// Pushes text colors toward black or white until every checked pairing
/// reaches `level`
pub struct ContrastBoost {
    manifest: PluginManifest,
    level: WcagLevel,
}

impl ContrastBoost {
    pub const ID: &'static str = "contrast-boost";

    pub fn new(level: WcagLevel) -> Self {
        Self {
            manifest: PluginManifest::new(Self::ID, "Contrast Boost", env!("CARGO_PKG_VERSION"))
                .permission(PluginPermission::ReadTheme.name())
                .permission(PluginPermission::ModifyColors.name()),
            level,
        }
    }

    pub fn level(&self) -> WcagLevel {
        self.level
    }
}

#[async_trait]
impl ThemePlugin<ComposedTheme> for ContrastBoost {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    async fn initialize(&self, ctx: &PluginContext) -> anyhow::Result<()> {
        if self.level == WcagLevel::Fail {
            anyhow::bail!("target level must be AA-large or higher");
        }
        if !ctx.has(PluginPermission::ModifyColors) {
            anyhow::bail!("missing {} permission", PluginPermission::ModifyColors);
        }
        Ok(())
    }

    fn apply(&self, theme: &ComposedTheme) -> anyhow::Result<ComposedTheme> {
        let mut theme = theme.clone();
        let colors = &mut theme.tokens.colors;
        for &(foreground, background) in CONTRAST_PAIRINGS {
            let fixed =
                contrast::ensure_contrast(*colors.get(foreground), *colors.get(background), self.level);
            colors.set(foreground, fixed);
        }
        Ok(theme)
    }
}
