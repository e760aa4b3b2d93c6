//! Per-app lifecycle hooks
//!
//! Each registered micro-app may carry callbacks invoked around the lifecycle
//! transitions. All hooks default to resolved no-ops; a hook error aborts the
//! operation it guards and is surfaced to the caller unchanged.

use async_trait::async_trait;
use std::fmt;

/// Boxed error type for user-supplied callbacks (hooks and app entry points).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for lifecycle hooks.
pub type HookResult = std::result::Result<(), BoxError>;

/// The lifecycle transition a hook guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    BeforeLoad,
    AfterMount,
    BeforeUnmount,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookStage::BeforeLoad => f.write_str("before_load"),
            HookStage::AfterMount => f.write_str("after_mount"),
            HookStage::BeforeUnmount => f.write_str("before_unmount"),
        }
    }
}

/// Callbacks invoked around a micro-app's lifecycle transitions.
///
/// `before_load` runs before the app's asset is fetched, `after_mount` after
/// the app is mounted and recorded as current, `before_unmount` before any
/// teardown happens. Completion is the only contract; return values carry no
/// data.
#[async_trait]
pub trait LifecycleHooks: Send + Sync {
    async fn before_load(&self) -> HookResult {
        Ok(())
    }

    async fn after_mount(&self) -> HookResult {
        Ok(())
    }

    async fn before_unmount(&self) -> HookResult {
        Ok(())
    }
}

/// Hooks that do nothing; the default for apps registered without hooks.
pub struct NoopHooks;

#[async_trait]
impl LifecycleHooks for NoopHooks {}
