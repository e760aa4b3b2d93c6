//! Route-driven auto-activation
//!
//! Scans registered apps in registration order and mounts the first one whose
//! active rule matches the path; first match wins, not best match. When no
//! rule matches, whatever is mounted comes down, so no app stays up outside
//! its active zone.

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument, warn};

use loft_types::{HostEvent, Props};

use crate::error::Result;
use crate::host::MicroAppHost;

impl MicroAppHost {
    /// Evaluate active rules against a path and reconcile the mounted app.
    ///
    /// Returns the name of the app mounted for this path, or `None` when no
    /// rule matched (in which case the current app, if any, was unmounted).
    /// Mount and unmount errors propagate to the caller.
    #[instrument(skip(self))]
    pub async fn auto_route(&self, path: &str) -> Result<Option<String>> {
        let matched = {
            let apps = self.apps.read().await;
            apps.iter().find_map(|(name, entry)| {
                entry
                    .config
                    .active_rule
                    .as_ref()
                    .filter(|rule| rule.matches(path))
                    .map(|_| name.clone())
            })
        };

        match matched {
            Some(name) => {
                debug!(path, app = %name, "route matched");
                self.events.emit(HostEvent::RouteMatched {
                    path: path.to_string(),
                    name: name.clone(),
                });
                self.mount_app(&name, Props::new()).await?;
                Ok(Some(name))
            }
            None => {
                self.events.emit(HostEvent::RouteUnmatched {
                    path: path.to_string(),
                });
                let current = self.current.read().await.clone();
                if let Some(current) = current {
                    debug!(path, app = %current, "no rule matched; unmounting current app");
                    self.unmount_app(&current).await?;
                }
                Ok(None)
            }
        }
    }

    /// Drive auto-activation from the host's navigation source.
    ///
    /// Evaluates the current path once immediately, then re-evaluates on
    /// every navigation event until the source closes. Errors inside the
    /// driver are logged, not propagated. Call this once per host: a second
    /// driver would evaluate every navigation twice.
    pub fn start_auto_route(self: Arc<Self>) -> JoinHandle<()> {
        // Subscribe before the initial evaluation so navigations that land
        // during it are not missed.
        let mut rx = self.navigation.subscribe();

        tokio::spawn(async move {
            let initial = self.navigation.current_path();
            self.route_logged(&initial).await;

            loop {
                match rx.recv().await {
                    Ok(path) => self.route_logged(&path).await,
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "navigation events dropped; re-evaluating current path");
                        let path = self.navigation.current_path();
                        self.route_logged(&path).await;
                    }
                    Err(RecvError::Closed) => {
                        debug!("navigation source closed; stopping auto-route driver");
                        break;
                    }
                }
            }
        })
    }

    async fn route_logged(&self, path: &str) {
        if let Err(err) = self.auto_route(path).await {
            error!(path, error = %err, "route evaluation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{Bundle, MicroApp};
    use crate::memory::{InMemoryContainerHost, ManualNavigation, StaticAssetLoader};
    use async_trait::async_trait;
    use loft_types::MicroAppConfig;

    #[derive(Debug)]
    struct Inert;

    #[async_trait]
    impl MicroApp for Inert {}

    async fn routed_host() -> Arc<MicroAppHost> {
        let containers = Arc::new(InMemoryContainerHost::new());
        containers.add("#music");
        containers.add("#music-sub");
        let loader = StaticAssetLoader::new()
            .with_bundle(
                "http://localhost:3001",
                Bundle::new().with_export("music", Arc::new(Inert)),
            )
            .with_bundle(
                "http://localhost:3002",
                Bundle::new().with_export("music-sub", Arc::new(Inert)),
            );
        let nav = Arc::new(ManualNavigation::new("/"));

        let host = Arc::new(MicroAppHost::new(Arc::new(loader), containers, nav));
        host.register_apps([
            MicroAppConfig::new("music", "http://localhost:3001")
                .with_container("#music")
                .with_active_rule("/music"),
            MicroAppConfig::new("music-sub", "http://localhost:3002")
                .with_container("#music-sub")
                .with_active_rule("/music/sub"),
        ])
        .await;
        host
    }

    #[tokio::test]
    async fn first_matching_rule_wins_in_registration_order() {
        let host = routed_host().await;

        let mounted = host.auto_route("/music/sub/x").await.unwrap();

        // Both rules match; the one registered first is chosen.
        assert_eq!(mounted.as_deref(), Some("music"));
        assert_eq!(host.current_app().await.as_deref(), Some("music"));
    }

    #[tokio::test]
    async fn unmatched_path_tears_down_current_app() {
        let host = routed_host().await;

        host.auto_route("/music").await.unwrap();
        assert_eq!(host.current_app().await.as_deref(), Some("music"));

        let mounted = host.auto_route("/settings").await.unwrap();
        assert_eq!(mounted, None);
        assert_eq!(host.current_app().await, None);
        assert!(!host.app("music").await.unwrap().mounted);
    }

    #[tokio::test]
    async fn apps_without_rules_never_auto_activate() {
        let containers = Arc::new(InMemoryContainerHost::new());
        containers.add("#app");
        let loader = StaticAssetLoader::new().with_bundle(
            "http://localhost:3001",
            Bundle::new().with_export("manual-only", Arc::new(Inert)),
        );
        let nav = Arc::new(ManualNavigation::new("/"));
        let host = MicroAppHost::new(Arc::new(loader), containers, nav);

        host.register(
            MicroAppConfig::new("manual-only", "http://localhost:3001").with_container("#app"),
        )
        .await;

        assert_eq!(host.auto_route("/anything").await.unwrap(), None);
    }
}
