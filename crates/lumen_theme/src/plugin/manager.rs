use super::{
    PluginContext, PluginManifest, PluginPermission, PluginSettings, PluginState, PluginStatus,
    ThemePlugin,
};
use crate::error::{Result, ThemeError};
use crate::sync::RwLockExt;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

struct Slot<T> {
    plugin: Arc<dyn ThemePlugin<T>>,
    manifest: PluginManifest,
    permissions: Vec<PluginPermission>,
    state: PluginState,
    apply_errors: u64,
    last_error: Option<String>,
}

impl<T> Slot<T> {
    fn status(&self) -> PluginStatus {
        PluginStatus {
            id: self.manifest.id.clone(),
            name: self.manifest.name.clone(),
            version: self.manifest.version.clone(),
            state: self.state,
            permissions: self.permissions.clone(),
            apply_errors: self.apply_errors,
            last_error: self.last_error.clone(),
        }
    }
}

/// Registry and runner for [`ThemePlugin`]s over payload `T`.
///
/// Plugins run in registration order. Locks are released before any plugin
/// hook is awaited.
pub struct PluginManager<T> {
    slots: RwLock<IndexMap<String, Slot<T>>>,
    settings: PluginSettings,
    init_failures: AtomicU64,
}

impl<T> PluginManager<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(settings: PluginSettings) -> Self {
        Self {
            slots: RwLock::new(IndexMap::new()),
            settings,
            init_failures: AtomicU64::new(0),
        }
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Validate, initialize and (with `auto_enable`) enable a plugin
    pub async fn register<P>(&self, plugin: P) -> Result<()>
    where
        P: ThemePlugin<T> + 'static,
    {
        let plugin: Arc<dyn ThemePlugin<T>> = Arc::new(plugin);
        let manifest = plugin.manifest().clone();
        let id = manifest.id.trim().to_string();
        if id.is_empty() {
            return Err(ThemeError::validation("plugin id must not be empty"));
        }

        let permissions = manifest
            .permissions
            .iter()
            .map(|name| name.parse::<PluginPermission>())
            .collect::<Result<Vec<_>>>()?;
        if permissions.contains(&PluginPermission::ExternalResources)
            && !self.settings.allow_external_resources
        {
            return Err(ThemeError::validation(format!(
                "plugin '{id}' requests external-resources, which is not allowed"
            )));
        }

        {
            let mut slots = self.slots.write_guard();
            if slots.contains_key(&id) {
                return Err(ThemeError::validation(format!(
                    "plugin '{id}' is already registered"
                )));
            }
            slots.insert(
                id.clone(),
                Slot {
                    plugin: Arc::clone(&plugin),
                    manifest: manifest.clone(),
                    permissions: permissions.clone(),
                    state: PluginState::Registered,
                    apply_errors: 0,
                    last_error: None,
                },
            );
        }

        let ctx = PluginContext {
            plugin_id: id.clone(),
            permissions,
            max_memory_bytes: self.settings.max_memory_bytes,
        };
        let timeout = self.settings.init_timeout;
        let failure = match tokio::time::timeout(timeout, plugin.initialize(&ctx)).await {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(format!("initialization failed: {err:#}")),
            Err(_) => Some(format!(
                "initialization timed out after {}ms",
                timeout.as_millis()
            )),
        };

        let mut slots = self.slots.write_guard();
        if let Some(message) = failure {
            if let Some(mut slot) = slots.shift_remove(&id) {
                slot.state = PluginState::Failed;
                slot.last_error = Some(message.clone());
                warn!(plugin = %id, status = ?slot.status(), "plugin dropped");
            }
            self.init_failures.fetch_add(1, Ordering::Relaxed);
            return Err(ThemeError::Dependency {
                dependency: id,
                required_by: "plugin manager".to_string(),
                message,
            });
        }

        let Some(slot) = slots.get_mut(&id) else {
            return Err(ThemeError::Dependency {
                dependency: id,
                required_by: "plugin manager".to_string(),
                message: "plugin was removed during initialization".to_string(),
            });
        };
        slot.state = if self.settings.auto_enable {
            PluginState::Enabled
        } else {
            PluginState::Initialized
        };
        info!(
            plugin = %id,
            version = %manifest.version,
            state = %slot.state,
            "plugin registered"
        );
        Ok(())
    }

    /// Remove a plugin and run its cleanup.
    ///
    /// The plugin is gone even when cleanup fails; the failure is returned.
    /// A plugin still initializing cannot be unregistered.
    pub async fn unregister(&self, id: &str) -> Result<()> {
        let slot = {
            let mut slots = self.slots.write_guard();
            match slots.get(id).map(|slot| slot.state) {
                None => return Err(self.not_found(&slots, id)),
                Some(PluginState::Registered) => {
                    return Err(ThemeError::validation(format!(
                        "plugin '{id}' is still initializing"
                    )));
                }
                Some(_) => {}
            }
            match slots.shift_remove(id) {
                Some(slot) => slot,
                None => return Err(self.not_found(&slots, id)),
            }
        };
        info!(plugin = %id, "plugin unregistered");

        slot.plugin
            .cleanup()
            .await
            .map_err(|err| ThemeError::Dependency {
                dependency: id.to_string(),
                required_by: "plugin manager".to_string(),
                message: format!("cleanup failed: {err:#}"),
            })
    }

    pub fn enable(&self, id: &str) -> Result<()> {
        self.transition(id, PluginState::Enabled)
    }

    pub fn disable(&self, id: &str) -> Result<()> {
        self.transition(id, PluginState::Disabled)
    }

    fn transition(&self, id: &str, to: PluginState) -> Result<()> {
        let mut slots = self.slots.write_guard();
        let Some(slot) = slots.get_mut(id) else {
            return Err(self.not_found(&slots, id));
        };
        if slot.state == PluginState::Registered {
            return Err(ThemeError::validation(format!(
                "plugin '{id}' is still initializing"
            )));
        }
        if slot.state != to {
            debug!(plugin = %id, from = %slot.state, to = %to, "plugin state change");
            slot.state = to;
        }
        Ok(())
    }

    /// Run every enabled plugin in order, each on the previous output.
    ///
    /// A failing plugin is logged, recorded and skipped.
    pub fn apply(&self, theme: &T) -> T {
        let enabled: Vec<(String, Arc<dyn ThemePlugin<T>>)> = self
            .slots
            .read_guard()
            .iter()
            .filter(|(_, slot)| slot.state == PluginState::Enabled)
            .map(|(id, slot)| (id.clone(), Arc::clone(&slot.plugin)))
            .collect();

        let mut current = theme.clone();
        for (id, plugin) in enabled {
            match plugin.apply(&current) {
                Ok(next) => current = next,
                Err(err) => {
                    let message = format!("{err:#}");
                    warn!(plugin = %id, error = %message, "plugin apply failed; skipping");
                    if let Some(slot) = self.slots.write_guard().get_mut(&id) {
                        slot.apply_errors += 1;
                        slot.last_error = Some(message);
                    }
                }
            }
        }
        current
    }

    /// Statuses in registration order
    pub fn statuses(&self) -> Vec<PluginStatus> {
        self.slots.read_guard().values().map(Slot::status).collect()
    }

    pub fn status(&self, id: &str) -> Option<PluginStatus> {
        self.slots.read_guard().get(id).map(Slot::status)
    }

    /// Failed initializations plus apply errors across live plugins
    pub fn failure_count(&self) -> u64 {
        let apply_errors: u64 = self
            .slots
            .read_guard()
            .values()
            .map(|slot| slot.apply_errors)
            .sum();
        self.init_failures.load(Ordering::Relaxed) + apply_errors
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.slots
            .read_guard()
            .get(id)
            .is_some_and(|slot| slot.state == PluginState::Enabled)
    }

    pub fn ids(&self) -> Vec<String> {
        self.slots.read_guard().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.slots.read_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn not_found(&self, slots: &IndexMap<String, Slot<T>>, id: &str) -> ThemeError {
        ThemeError::not_found("plugin", id, slots.keys().cloned().collect())
    }
}

impl<T> Default for PluginManager<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(PluginSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    struct Add {
        manifest: PluginManifest,
        amount: i32,
    }

    impl Add {
        fn new(id: &str, amount: i32) -> Self {
            Self {
                manifest: PluginManifest::new(id, id, "0.1.0").permission("read-theme"),
                amount,
            }
        }
    }

    impl ThemePlugin<i32> for Add {
        fn manifest(&self) -> &PluginManifest {
            &self.manifest
        }

        fn apply(&self, theme: &i32) -> anyhow::Result<i32> {
            Ok(theme + self.amount)
        }
    }

    struct Broken(PluginManifest);

    #[async_trait]
    impl ThemePlugin<i32> for Broken {
        fn manifest(&self) -> &PluginManifest {
            &self.0
        }

        fn apply(&self, _theme: &i32) -> anyhow::Result<i32> {
            anyhow::bail!("cannot apply")
        }

        async fn cleanup(&self) -> anyhow::Result<()> {
            anyhow::bail!("cannot clean up")
        }
    }

    #[tokio::test]
    async fn plugins_chain_in_registration_order() {
        let manager = PluginManager::default();
        manager.register(Add::new("one", 1)).await.unwrap();
        manager.register(Add::new("ten", 10)).await.unwrap();
        assert_eq!(manager.apply(&0), 11);
        assert_eq!(manager.ids(), vec!["one", "ten"]);
    }

    #[tokio::test]
    async fn failing_apply_is_recorded_and_skipped() {
        let manager = PluginManager::default();
        manager
            .register(Broken(PluginManifest::new("broken", "Broken", "0.1.0")))
            .await
            .unwrap();
        manager.register(Add::new("one", 1)).await.unwrap();

        assert_eq!(manager.apply(&5), 6);
        let status = manager.status("broken").unwrap();
        assert_eq!(status.apply_errors, 1);
        assert_eq!(status.last_error.as_deref(), Some("cannot apply"));
        assert_eq!(manager.failure_count(), 1);
    }

    #[tokio::test]
    async fn unregister_removes_even_when_cleanup_fails() {
        let manager = PluginManager::default();
        manager
            .register(Broken(PluginManifest::new("broken", "Broken", "0.1.0")))
            .await
            .unwrap();

        let err = manager.unregister("broken").await.unwrap_err();
        assert!(err.to_string().contains("cannot clean up"));
        assert!(manager.is_empty());
    }

    #[tokio::test]
    async fn manual_enable_when_auto_enable_is_off() {
        let manager = PluginManager::new(PluginSettings {
            auto_enable: false,
            ..PluginSettings::default()
        });
        manager.register(Add::new("one", 1)).await.unwrap();
        assert_eq!(manager.status("one").unwrap().state, PluginState::Initialized);
        assert_eq!(manager.apply(&0), 0);

        manager.enable("one").unwrap();
        assert_eq!(manager.apply(&0), 1);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let manager = PluginManager::<i32>::default();
        assert_eq!(manager.enable("ghost").unwrap_err().code(), "THEME_001");
        assert_eq!(manager.unregister("ghost").await.unwrap_err().code(), "THEME_001");
    }

    #[tokio::test]
    async fn external_resources_need_opt_in() {
        let plugin = || Add {
            manifest: PluginManifest::new("fonts", "Fonts", "1.0.0").permission("external-resources"),
            amount: 0,
        };

        let strict = PluginManager::default();
        assert_eq!(strict.register(plugin()).await.unwrap_err().code(), "THEME_002");

        let open = PluginManager::new(PluginSettings {
            allow_external_resources: true,
            init_timeout: Duration::from_secs(1),
            ..PluginSettings::default()
        });
        open.register(plugin()).await.unwrap();
    }
}
