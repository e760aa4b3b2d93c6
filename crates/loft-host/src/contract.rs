//! Mounted-application contract
//!
//! A loaded bundle exposes named exports, each an object the host can mount
//! into a container and later unmount. Both entry points have provided
//! implementations that succeed without doing anything, so a bundle that only
//! needs one of them (or neither) still integrates; the no-op paths log a
//! warning because they usually indicate a wiring mistake on the bundle side.

use async_trait::async_trait;
use loft_types::{BoxError, Props};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::env::Container;

/// What the host expects from a loaded micro-app export.
#[async_trait]
pub trait MicroApp: Send + Sync + fmt::Debug {
    /// Render into the given container. The container has already been
    /// cleared by the host.
    async fn mount(
        &self,
        container: Arc<dyn Container>,
        props: Props,
    ) -> std::result::Result<(), BoxError> {
        let _ = (container, props);
        warn!("micro-app does not implement mount; treating as a no-op");
        Ok(())
    }

    /// Tear down. The host clears the container afterwards.
    async fn unmount(&self) -> std::result::Result<(), BoxError> {
        warn!("micro-app does not implement unmount; treating as a no-op");
        Ok(())
    }
}

/// A fetched bundle: named exports addressable by app name.
///
/// Replaces global-namespace lookup: the loader hands the export table to
/// the host directly instead of publishing into shared mutable scope.
#[derive(Clone, Default)]
pub struct Bundle {
    exports: HashMap<String, Arc<dyn MicroApp>>,
}

impl Bundle {
    pub fn new() -> Self {
        Self {
            exports: HashMap::new(),
        }
    }

    /// Builder-style export registration.
    pub fn with_export(mut self, name: impl Into<String>, app: Arc<dyn MicroApp>) -> Self {
        self.exports.insert(name.into(), app);
        self
    }

    /// Register an export.
    pub fn insert(&mut self, name: impl Into<String>, app: Arc<dyn MicroApp>) {
        self.exports.insert(name.into(), app);
    }

    /// Look up an export by app name.
    pub fn export(&self, name: &str) -> Option<Arc<dyn MicroApp>> {
        self.exports.get(name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle")
            .field("exports", &self.exports.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Inert;

    #[async_trait]
    impl MicroApp for Inert {}

    #[test]
    fn bundle_export_lookup() {
        let bundle = Bundle::new().with_export("music-player", Arc::new(Inert));
        assert!(bundle.export("music-player").is_some());
        assert!(bundle.export("user-center").is_none());
    }

    #[tokio::test]
    async fn default_entry_points_are_successful_noops() {
        let app = Inert;
        assert!(app.unmount().await.is_ok());
    }
}
