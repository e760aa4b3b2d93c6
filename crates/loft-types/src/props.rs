//! Props bag passed to mounted micro-apps
//!
//! Props are JSON-object shaped: string keys, arbitrary JSON values. The host
//! merges registration-time props with call-time overrides at mount, shallow,
//! with call-time values winning key-by-key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque configuration passed to a mounted micro-app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(Map<String, Value>);

impl Props {
    /// Create an empty props bag.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a value, returning the previous one if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Shallow merge: every key in `overrides` replaces the value here,
    /// untouched keys are kept.
    pub fn merged(&self, overrides: &Props) -> Props {
        let mut out = self.0.clone();
        for (key, value) in overrides.0.iter() {
            out.insert(key.clone(), value.clone());
        }
        Props(out)
    }
}

impl From<Map<String, Value>> for Props {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overrides_win_key_by_key() {
        let base = Props::new().with("theme", "light").with("locale", "en");
        let overrides = Props::new().with("theme", "dark");

        let merged = base.merged(&overrides);

        assert_eq!(merged.get("theme"), Some(&json!("dark")));
        assert_eq!(merged.get("locale"), Some(&json!("en")));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_is_shallow() {
        let base = Props::new().with("user", json!({"id": 1, "name": "Ada"}));
        let overrides = Props::new().with("user", json!({"id": 2}));

        let merged = base.merged(&overrides);

        // Nested objects are replaced wholesale, not merged.
        assert_eq!(merged.get("user"), Some(&json!({"id": 2})));
    }

    #[test]
    fn merge_with_empty_overrides_is_identity() {
        let base = Props::new().with("theme", "dark");
        assert_eq!(base.merged(&Props::new()), base);
    }
}
