//! Host error types

use loft_types::{BoxError, HookStage};
use thiserror::Error;

/// Lifecycle host errors
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Micro-app not registered: {0}")]
    NotRegistered(String),

    #[error("Container not found for selector: {0}")]
    ContainerNotFound(String),

    #[error("Failed to fetch asset from {entry}: {source}")]
    AssetLoad {
        entry: String,
        #[source]
        source: BoxError,
    },

    #[error("Bundle from {name}'s entry exposes no export named {name}")]
    InvalidExport { name: String },

    #[error("Lifecycle hook {stage} failed for {name}: {source}")]
    Hook {
        name: String,
        stage: HookStage,
        #[source]
        source: BoxError,
    },

    #[error("Micro-app {name} entry point failed: {source}")]
    App {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
