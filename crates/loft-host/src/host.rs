//! Micro-application host - registry and lifecycle state machine
//!
//! The MicroAppHost owns the registry of micro-app entries and drives their
//! lifecycle: register, load, mount, unmount. At most one app is mounted at
//! any time; mounting one app first tears the previous one down, fully
//! awaited, before the new one goes up.
//!
//! The host is an explicit instance: construct one and share it by `Arc`.
//! Overlapping calls from different tasks are not serialized against each
//! other; callers that need stronger ordering sequence their own calls.

use indexmap::IndexMap;
use loft_types::{HookStage, HostEvent, MicroAppConfig, Props};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{error, info, instrument, warn};

use crate::contract::MicroApp;
use crate::env::{AssetLoader, Container, ContainerHost, NavigationSource};
use crate::error::{HostError, Result};
use crate::events::EventBus;

/// Runtime state of one registered entry.
///
/// Lives behind its own lock so an in-flight operation keeps mutating the
/// state it captured even if the name is re-registered underneath it; the
/// replacement entry starts from a fresh state object.
#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) loaded: bool,
    pub(crate) mounted: bool,
    pub(crate) instance: Option<Arc<dyn MicroApp>>,
    pub(crate) container: Option<Arc<dyn Container>>,
}

/// One registered micro-app: immutable configuration plus shared runtime state.
#[derive(Clone)]
pub(crate) struct AppEntry {
    pub(crate) config: MicroAppConfig,
    pub(crate) state: Arc<RwLock<AppState>>,
}

impl AppEntry {
    fn new(config: MicroAppConfig) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(AppState::default())),
        }
    }
}

/// Serializable read-only view of a registered app.
#[derive(Debug, Clone, Serialize)]
pub struct AppSnapshot {
    pub name: String,
    pub entry: String,
    pub container_selector: String,
    pub loaded: bool,
    pub mounted: bool,
}

/// Registry and lifecycle state machine for micro-apps.
pub struct MicroAppHost {
    /// Registered entries, in registration order.
    pub(crate) apps: RwLock<IndexMap<String, AppEntry>>,

    /// Name of the currently mounted app, if any.
    pub(crate) current: RwLock<Option<String>>,

    /// Asset fetching capability.
    loader: Arc<dyn AssetLoader>,

    /// Container resolution capability.
    containers: Arc<dyn ContainerHost>,

    /// Navigation capability, consumed by the auto-route driver.
    pub(crate) navigation: Arc<dyn NavigationSource>,

    /// Event fan-out.
    pub(crate) events: EventBus,
}

impl MicroAppHost {
    /// Create a new host over the given environment capabilities.
    pub fn new(
        loader: Arc<dyn AssetLoader>,
        containers: Arc<dyn ContainerHost>,
        navigation: Arc<dyn NavigationSource>,
    ) -> Self {
        Self {
            apps: RwLock::new(IndexMap::new()),
            current: RwLock::new(None),
            loader,
            containers,
            navigation,
            events: EventBus::new(),
        }
    }

    /// Subscribe to the host's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<loft_types::HostEventEnvelope> {
        self.events.subscribe()
    }

    // ========== Registration ==========

    /// Register a micro-app.
    ///
    /// Re-registering a name replaces the previous entry unconditionally and
    /// drops its runtime state; the replacement starts unloaded and unmounted.
    #[instrument(skip(self, config), fields(app = %config.name))]
    pub async fn register(&self, config: MicroAppConfig) {
        let name = config.name.clone();
        let entry = AppEntry::new(config);

        let replaced = {
            let mut apps = self.apps.write().await;
            apps.insert(name.clone(), entry)
        };

        if let Some(old) = &replaced {
            let old_state = old.state.read().await;
            if old_state.loaded || old_state.mounted {
                warn!(
                    app = %name,
                    was_mounted = old_state.mounted,
                    "re-registration replaced an entry with live state"
                );
            }
        }

        self.events.emit(HostEvent::AppRegistered {
            name: name.clone(),
            replaced: replaced.is_some(),
        });
        info!(app = %name, "micro-app registered");
    }

    /// Register several micro-apps, in order.
    pub async fn register_apps(&self, configs: impl IntoIterator<Item = MicroAppConfig>) {
        for config in configs {
            self.register(config).await;
        }
    }

    // ========== Load ==========

    /// Load a micro-app's bundle and resolve its export and container.
    ///
    /// Idempotent: an already-loaded app returns its cached instance without
    /// re-running hooks or the fetch pipeline. On failure no state changes,
    /// so a later call retries from scratch.
    #[instrument(skip(self))]
    pub async fn load_app(&self, name: &str) -> Result<Arc<dyn MicroApp>> {
        let entry = self
            .entry(name)
            .await
            .ok_or_else(|| HostError::NotRegistered(name.to_string()))?;

        {
            let state = entry.state.read().await;
            if state.loaded {
                if let Some(instance) = &state.instance {
                    return Ok(instance.clone());
                }
            }
        }

        match self.load_entry(&entry).await {
            Ok(instance) => {
                self.events.emit(HostEvent::AppLoaded {
                    name: name.to_string(),
                });
                info!(app = %name, "micro-app loaded");
                Ok(instance)
            }
            Err(err) => {
                self.events.emit(HostEvent::AppLoadFailed {
                    name: name.to_string(),
                    reason: err.to_string(),
                });
                error!(app = %name, error = %err, "micro-app load failed");
                Err(err)
            }
        }
    }

    async fn load_entry(&self, entry: &AppEntry) -> Result<Arc<dyn MicroApp>> {
        let name = entry.config.name.clone();

        entry
            .config
            .hooks
            .before_load()
            .await
            .map_err(|source| HostError::Hook {
                name: name.clone(),
                stage: HookStage::BeforeLoad,
                source,
            })?;

        let selector = entry.config.container_selector.clone();
        let container = self
            .containers
            .resolve(&selector)
            .await
            .ok_or(HostError::ContainerNotFound(selector))?;

        let bundle = self
            .loader
            .fetch(&entry.config.entry)
            .await
            .map_err(|source| HostError::AssetLoad {
                entry: entry.config.entry.clone(),
                source,
            })?;

        let instance = bundle
            .export(&name)
            .ok_or(HostError::InvalidExport { name })?;

        let mut state = entry.state.write().await;
        state.instance = Some(instance.clone());
        state.container = Some(container);
        state.loaded = true;

        Ok(instance)
    }

    // ========== Mount ==========

    /// Mount a micro-app, tearing down any other mounted app first.
    ///
    /// `overrides` are shallow-merged over the registration-time props,
    /// call-time values winning. Mounting the already-mounted app is a no-op.
    /// If tearing down the previous app fails, the whole mount aborts and the
    /// new app is never mounted.
    #[instrument(skip(self, overrides))]
    pub async fn mount_app(&self, name: &str, overrides: Props) -> Result<()> {
        let entry = self
            .entry(name)
            .await
            .ok_or_else(|| HostError::NotRegistered(name.to_string()))?;

        let current = self.current.read().await.clone();
        if let Some(current) = current {
            if current != name {
                self.unmount_app(&current).await?;
            }
        }

        if !entry.state.read().await.loaded {
            self.load_app(name).await?;
        }

        if entry.state.read().await.mounted {
            return Ok(());
        }

        match self.mount_entry(&entry, overrides).await {
            Ok(()) => {
                self.events.emit(HostEvent::AppMounted {
                    name: name.to_string(),
                });
                info!(app = %name, "micro-app mounted");
                Ok(())
            }
            Err(err) => {
                self.events.emit(HostEvent::AppMountFailed {
                    name: name.to_string(),
                    reason: err.to_string(),
                });
                error!(app = %name, error = %err, "micro-app mount failed");
                Err(err)
            }
        }
    }

    async fn mount_entry(&self, entry: &AppEntry, overrides: Props) -> Result<()> {
        let name = entry.config.name.clone();

        let (instance, container) = {
            let state = entry.state.read().await;
            let instance = state.instance.clone().ok_or_else(|| {
                HostError::Internal(format!("{name} is loaded but has no instance"))
            })?;
            let container = state.container.clone().ok_or_else(|| {
                HostError::Internal(format!("{name} is loaded but has no container"))
            })?;
            (instance, container)
        };

        container.clear();

        let props = entry.config.props.merged(&overrides);
        instance
            .mount(container, props)
            .await
            .map_err(|source| HostError::App {
                name: name.clone(),
                source,
            })?;

        entry.state.write().await.mounted = true;
        *self.current.write().await = Some(name.clone());

        // The app is already mounted and current when after_mount runs; a
        // failing hook surfaces to the caller but does not roll that back.
        entry
            .config
            .hooks
            .after_mount()
            .await
            .map_err(|source| HostError::Hook {
                name,
                stage: HookStage::AfterMount,
                source,
            })?;

        Ok(())
    }

    // ========== Unmount ==========

    /// Unmount a micro-app.
    ///
    /// Tolerant: unknown names and apps that are not mounted are no-ops. A
    /// failing `before_unmount` hook aborts with container and state
    /// untouched (fail-stop).
    #[instrument(skip(self))]
    pub async fn unmount_app(&self, name: &str) -> Result<()> {
        let Some(entry) = self.entry(name).await else {
            return Ok(());
        };
        if !entry.state.read().await.mounted {
            return Ok(());
        }

        match self.unmount_entry(&entry).await {
            Ok(()) => {
                self.events.emit(HostEvent::AppUnmounted {
                    name: name.to_string(),
                });
                info!(app = %name, "micro-app unmounted");
                Ok(())
            }
            Err(err) => {
                self.events.emit(HostEvent::AppUnmountFailed {
                    name: name.to_string(),
                    reason: err.to_string(),
                });
                error!(app = %name, error = %err, "micro-app unmount failed");
                Err(err)
            }
        }
    }

    async fn unmount_entry(&self, entry: &AppEntry) -> Result<()> {
        let name = entry.config.name.clone();

        entry
            .config
            .hooks
            .before_unmount()
            .await
            .map_err(|source| HostError::Hook {
                name: name.clone(),
                stage: HookStage::BeforeUnmount,
                source,
            })?;

        let (instance, container) = {
            let state = entry.state.read().await;
            (state.instance.clone(), state.container.clone())
        };

        if let Some(instance) = instance {
            instance.unmount().await.map_err(|source| HostError::App {
                name: name.clone(),
                source,
            })?;
        }

        if let Some(container) = container {
            container.clear();
        }

        entry.state.write().await.mounted = false;

        let mut current = self.current.write().await;
        if current.as_deref() == Some(name.as_str()) {
            *current = None;
        }

        Ok(())
    }

    // ========== Introspection ==========

    /// Name of the currently mounted app, if any.
    pub async fn current_app(&self) -> Option<String> {
        self.current.read().await.clone()
    }

    /// Snapshot of one registered app.
    pub async fn app(&self, name: &str) -> Option<AppSnapshot> {
        let entry = self.entry(name).await?;
        Some(Self::snapshot(&entry).await)
    }

    /// Snapshots of all registered apps, in registration order.
    pub async fn apps(&self) -> Vec<AppSnapshot> {
        let apps = self.apps.read().await;
        let mut out = Vec::with_capacity(apps.len());
        for entry in apps.values() {
            out.push(Self::snapshot(entry).await);
        }
        out
    }

    async fn snapshot(entry: &AppEntry) -> AppSnapshot {
        let state = entry.state.read().await;
        AppSnapshot {
            name: entry.config.name.clone(),
            entry: entry.config.entry.clone(),
            container_selector: entry.config.container_selector.clone(),
            loaded: state.loaded,
            mounted: state.mounted,
        }
    }

    pub(crate) async fn entry(&self, name: &str) -> Option<AppEntry> {
        self.apps.read().await.get(name).cloned()
    }
}
