//! Micro-app registration configuration
//!
//! A `MicroAppConfig` is everything the host needs to know about one app:
//! where its code lives, where it mounts, when it activates, and what it is
//! handed at mount time. Name and entry are the only required fields; the
//! rest have workable defaults.

use crate::hooks::{LifecycleHooks, NoopHooks};
use crate::props::Props;
use std::fmt;
use std::sync::Arc;

/// Decides whether a micro-app should be active for a navigation path.
#[derive(Clone)]
pub enum ActiveRule {
    /// Matches any path starting with the given prefix.
    Prefix(String),
    /// Arbitrary predicate over the path.
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl ActiveRule {
    /// Prefix rule: matches paths starting with `prefix`.
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Predicate rule: matches paths the closure accepts.
    pub fn predicate<F>(rule: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(rule))
    }

    /// Evaluate the rule against a path.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Prefix(prefix) => path.starts_with(prefix.as_str()),
            Self::Predicate(rule) => rule(path),
        }
    }
}

impl fmt::Debug for ActiveRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix(prefix) => f.debug_tuple("Prefix").field(prefix).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<&str> for ActiveRule {
    fn from(prefix: &str) -> Self {
        Self::Prefix(prefix.to_string())
    }
}

impl From<String> for ActiveRule {
    fn from(prefix: String) -> Self {
        Self::Prefix(prefix)
    }
}

/// Registration input for one micro-app.
#[derive(Clone)]
pub struct MicroAppConfig {
    /// Unique registry key. Re-registering a name overwrites the old entry.
    pub name: String,

    /// Locator handed to the asset loader (URL or module path).
    pub entry: String,

    /// Mount-point selector, resolved lazily at load time.
    pub container_selector: String,

    /// When to auto-activate. Apps without a rule are only mounted manually.
    pub active_rule: Option<ActiveRule>,

    /// Registration-time props, shallow-overridden by call-time props at mount.
    pub props: Props,

    /// Lifecycle callbacks.
    pub hooks: Arc<dyn LifecycleHooks>,
}

impl MicroAppConfig {
    /// Minimal configuration: everything else defaults.
    pub fn new(name: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry: entry.into(),
            container_selector: String::new(),
            active_rule: None,
            props: Props::new(),
            hooks: Arc::new(NoopHooks),
        }
    }

    /// Set the mount-point selector.
    pub fn with_container(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    /// Set the activation rule. Strings become prefix rules.
    pub fn with_active_rule(mut self, rule: impl Into<ActiveRule>) -> Self {
        self.active_rule = Some(rule.into());
        self
    }

    /// Set registration-time props.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Attach lifecycle hooks.
    pub fn with_hooks(mut self, hooks: Arc<dyn LifecycleHooks>) -> Self {
        self.hooks = hooks;
        self
    }
}

impl fmt::Debug for MicroAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MicroAppConfig")
            .field("name", &self.name)
            .field("entry", &self.entry)
            .field("container_selector", &self.container_selector)
            .field("active_rule", &self.active_rule)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}
