//! Environment capability traits
//!
//! The host never touches the DOM, the network, or a history API directly.
//! It consumes three capabilities the embedding page implements: asset
//! fetching, container resolution, and navigation. In-memory implementations
//! for all three live in [`crate::memory`].

use async_trait::async_trait;
use loft_types::BoxError;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::contract::Bundle;

/// Fetches a micro-app's code asset and returns its export table.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    /// Fetch the bundle behind an entry locator. Transport failures surface
    /// as errors; the host does not retry.
    async fn fetch(&self, entry: &str) -> std::result::Result<Bundle, BoxError>;
}

/// Resolves mount-point selectors to container handles.
#[async_trait]
pub trait ContainerHost: Send + Sync {
    /// Resolve a selector. `None` means no such mount point exists right now;
    /// resolution is retried on the next load attempt.
    async fn resolve(&self, selector: &str) -> Option<Arc<dyn Container>>;
}

/// A resolved mount point, exclusively owned by whichever app holds it.
pub trait Container: Send + Sync {
    /// Selector this handle was resolved from.
    fn selector(&self) -> &str;

    /// Remove all rendered content.
    fn clear(&self);

    /// Append rendered content.
    fn render(&self, content: &str);
}

/// Source of navigation state and navigation events.
///
/// Implementations emit the new path on every navigation, programmatic or
/// user-driven, on a single channel; there is no separate interception of
/// push/replace entry points to wire up.
pub trait NavigationSource: Send + Sync {
    /// The path the host is currently at.
    fn current_path(&self) -> String;

    /// Subscribe to navigation events. Each message is the new path.
    fn subscribe(&self) -> broadcast::Receiver<String>;
}
