//! Loft Host - Micro-application registry and lifecycle state machine
//!
//! This crate provides the lifecycle infrastructure for Loft:
//!
//! - **MicroAppHost**: Registry plus load/mount/unmount state machine,
//!   enforcing single-active-app semantics and hook ordering
//! - **Environment traits**: `AssetLoader`, `ContainerHost`, `Container`,
//!   `NavigationSource`, the capabilities a host page implements
//! - **MicroApp / Bundle**: The contract loaded bundles fulfil
//! - **Route activation**: First-match auto-mounting driven by navigation
//!
//! ## In-Memory vs Production
//!
//! The crate provides in-memory environment implementations suitable for
//! development and testing. Real hosts wire DOM- and network-backed
//! implementations behind the same traits.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod contract;
pub mod env;
pub mod error;
pub mod events;
pub mod host;
pub mod memory;
mod router;

// Re-exports
pub use contract::{Bundle, MicroApp};
pub use env::{AssetLoader, Container, ContainerHost, NavigationSource};
pub use error::{HostError, Result};
pub use events::EventBus;
pub use host::{AppSnapshot, MicroAppHost};
pub use memory::{InMemoryContainer, InMemoryContainerHost, ManualNavigation, StaticAssetLoader};
