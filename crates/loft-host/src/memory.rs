//! In-memory implementations of the environment traits
//!
//! These are suitable for development and testing. Real hosts back the same
//! traits with DOM queries, script/module loading, and the page's router.

use async_trait::async_trait;
use dashmap::DashMap;
use loft_types::BoxError;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::broadcast;
use tracing::debug;

use crate::contract::Bundle;
use crate::env::{AssetLoader, Container, ContainerHost, NavigationSource};

/// Channel capacity for navigation events
const NAV_CHANNEL_CAPACITY: usize = 256;

/// An in-memory mount point: rendered content is a list of fragments.
pub struct InMemoryContainer {
    selector: String,
    content: Mutex<Vec<String>>,
}

impl InMemoryContainer {
    fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            content: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the rendered content.
    pub fn content(&self) -> Vec<String> {
        self.content.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.content.lock().unwrap().is_empty()
    }
}

impl Container for InMemoryContainer {
    fn selector(&self) -> &str {
        &self.selector
    }

    fn clear(&self) {
        self.content.lock().unwrap().clear();
    }

    fn render(&self, content: &str) {
        self.content.lock().unwrap().push(content.to_string());
    }
}

/// In-memory container host: a set of named mount points.
pub struct InMemoryContainerHost {
    containers: DashMap<String, Arc<InMemoryContainer>>,
}

impl InMemoryContainerHost {
    pub fn new() -> Self {
        Self {
            containers: DashMap::new(),
        }
    }

    /// Add a mount point, returning its handle for inspection.
    pub fn add(&self, selector: impl Into<String>) -> Arc<InMemoryContainer> {
        let selector = selector.into();
        let container = Arc::new(InMemoryContainer::new(selector.clone()));
        self.containers.insert(selector, container.clone());
        container
    }

    /// Remove a mount point; later resolutions of the selector fail.
    pub fn remove(&self, selector: &str) {
        self.containers.remove(selector);
    }

    /// Get a mount point's handle.
    pub fn get(&self, selector: &str) -> Option<Arc<InMemoryContainer>> {
        self.containers.get(selector).map(|c| c.clone())
    }
}

impl Default for InMemoryContainerHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerHost for InMemoryContainerHost {
    async fn resolve(&self, selector: &str) -> Option<Arc<dyn Container>> {
        self.containers
            .get(selector)
            .map(|c| c.clone() as Arc<dyn Container>)
    }
}

/// Asset loader serving a pre-staged set of bundles.
pub struct StaticAssetLoader {
    bundles: DashMap<String, Bundle>,
}

impl StaticAssetLoader {
    pub fn new() -> Self {
        Self {
            bundles: DashMap::new(),
        }
    }

    /// Builder-style staging.
    pub fn with_bundle(self, entry: impl Into<String>, bundle: Bundle) -> Self {
        self.bundles.insert(entry.into(), bundle);
        self
    }

    /// Stage a bundle behind an entry locator.
    pub fn insert(&self, entry: impl Into<String>, bundle: Bundle) {
        self.bundles.insert(entry.into(), bundle);
    }
}

impl Default for StaticAssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetLoader for StaticAssetLoader {
    async fn fetch(&self, entry: &str) -> std::result::Result<Bundle, BoxError> {
        self.bundles
            .get(entry)
            .map(|b| b.clone())
            .ok_or_else(|| format!("no bundle staged for entry {entry}").into())
    }
}

/// Navigation source driven by explicit calls.
///
/// Every `navigate` updates the current path and emits it to subscribers,
/// which covers both user-driven and programmatic navigation.
pub struct ManualNavigation {
    path: RwLock<String>,
    tx: broadcast::Sender<String>,
}

impl ManualNavigation {
    pub fn new(initial: impl Into<String>) -> Self {
        let (tx, _) = broadcast::channel(NAV_CHANNEL_CAPACITY);
        Self {
            path: RwLock::new(initial.into()),
            tx,
        }
    }

    /// Navigate to a new path and notify subscribers.
    pub fn navigate(&self, path: impl Into<String>) {
        let path = path.into();
        debug!(path = %path, "navigation");
        *self.path.write().unwrap() = path.clone();
        // No subscribers is fine
        let _ = self.tx.send(path);
    }
}

impl NavigationSource for ManualNavigation {
    fn current_path(&self) -> String {
        self.path.read().unwrap().clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn containers_resolve_and_clear() {
        let host = InMemoryContainerHost::new();
        let handle = host.add("#music-container");

        let resolved = host.resolve("#music-container").await.expect("resolves");
        resolved.render("<h1>Music</h1>");
        assert_eq!(handle.content(), vec!["<h1>Music</h1>".to_string()]);

        resolved.clear();
        assert!(handle.is_empty());

        assert!(host.resolve("#missing").await.is_none());
    }

    #[tokio::test]
    async fn static_loader_misses_are_errors() {
        let loader = StaticAssetLoader::new().with_bundle("http://localhost:3001", Bundle::new());
        assert!(loader.fetch("http://localhost:3001").await.is_ok());
        assert!(loader.fetch("http://localhost:9999").await.is_err());
    }

    #[tokio::test]
    async fn navigation_updates_path_and_notifies() {
        let nav = ManualNavigation::new("/");
        let mut rx = nav.subscribe();

        nav.navigate("/music/player");

        assert_eq!(nav.current_path(), "/music/player");
        assert_eq!(rx.recv().await.unwrap(), "/music/player");
    }
}
