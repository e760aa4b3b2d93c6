//! Loft Types - Core types for the micro-application lifecycle host
//!
//! Loft manages independently deployed UI bundles ("micro-apps") inside a
//! host shell: registration, loading, mounting, unmounting, and route-driven
//! activation. This crate holds the types shared between the host and its
//! consumers:
//!
//! - **MicroAppConfig**: Registration input for one micro-app
//! - **ActiveRule**: Predicate deciding when an app auto-activates for a path
//! - **Props**: Opaque configuration bag passed to a mounted app
//! - **LifecycleHooks**: Per-app callbacks around load/mount/unmount
//! - **Events**: Unified observability stream for host activity

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod app;
pub mod events;
pub mod hooks;
pub mod props;

// Re-export main types
pub use app::{ActiveRule, MicroAppConfig};
pub use events::{EventSeverity, HostEvent, HostEventEnvelope};
pub use hooks::{BoxError, HookResult, HookStage, LifecycleHooks, NoopHooks};
pub use props::Props;
