//! Event types for host observability
//!
//! Events provide a unified stream of lifecycle activity. They are
//! informational only and never part of the lifecycle contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope wrapping all host events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostEventEnvelope {
    /// Unique event ID
    pub id: Uuid,

    /// Event timestamp
    pub timestamp: DateTime<Utc>,

    /// Event severity
    pub severity: EventSeverity,

    /// The actual event
    pub event: HostEvent,
}

/// Event severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Debug-level event
    Debug,
    /// Informational event
    Info,
    /// Warning event
    Warning,
    /// Error event
    Error,
}

/// Host lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HostEvent {
    /// App registered (replaced is true when a previous entry was dropped)
    AppRegistered { name: String, replaced: bool },

    /// App bundle loaded and export resolved
    AppLoaded { name: String },

    /// App load pipeline failed
    AppLoadFailed { name: String, reason: String },

    /// App mounted and recorded as current
    AppMounted { name: String },

    /// App mount failed
    AppMountFailed { name: String, reason: String },

    /// App unmounted and container cleared
    AppUnmounted { name: String },

    /// App unmount failed
    AppUnmountFailed { name: String, reason: String },

    /// A navigation path matched an app's active rule
    RouteMatched { path: String, name: String },

    /// A navigation path matched no rule
    RouteUnmatched { path: String },
}

impl HostEventEnvelope {
    /// Create a new envelope with inferred severity.
    pub fn new(event: HostEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            severity: Self::infer_severity(&event),
            event,
        }
    }

    /// Infer severity from event type
    fn infer_severity(event: &HostEvent) -> EventSeverity {
        match event {
            HostEvent::AppLoadFailed { .. }
            | HostEvent::AppMountFailed { .. }
            | HostEvent::AppUnmountFailed { .. } => EventSeverity::Error,

            HostEvent::AppRegistered { replaced: true, .. } => EventSeverity::Warning,

            HostEvent::RouteUnmatched { .. } => EventSeverity::Debug,

            _ => EventSeverity::Info,
        }
    }
}
