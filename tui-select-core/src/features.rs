//! Runtime feature toggles
//!
//! Feature toggles switch component behaviour per instance at runtime without
//! touching the code that builds the props. A toggle that is present overrides
//! the value the caller passed directly; an absent toggle leaves it alone.
//!
//! # Quick Start
//!
//! ```
//! use tui_select_core::FeatureToggles;
//!
//! let toggles = FeatureToggles::new().with("use_portal", true);
//!
//! // Present: the toggle wins over the direct value
//! assert!(toggles.resolve("use_portal", false));
//! // Absent: the direct value is kept
//! assert!(!toggles.resolve("searchable", false));
//! ```
//!
//! # Loading from configuration
//!
//! The type serializes as a plain JSON object:
//!
//! ```
//! use tui_select_core::FeatureToggles;
//!
//! let toggles: FeatureToggles =
//!     serde_json::from_str(r#"{"multiple": true, "searchable": false}"#).unwrap();
//! assert_eq!(toggles.lookup("multiple"), Some(true));
//! assert_eq!(toggles.lookup("searchable"), Some(false));
//! assert_eq!(toggles.lookup("use_portal"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named set of boolean overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureToggles {
    flags: HashMap<String, bool>,
}

impl FeatureToggles {
    /// Create a new empty toggle set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.register(name, enabled);
        self
    }

    /// Register a toggle, replacing any existing value
    pub fn register(&mut self, name: impl Into<String>, enabled: bool) {
        self.flags.insert(name.into(), enabled);
    }

    /// Get a toggle's value, `false` if not registered
    pub fn get(&self, name: &str) -> bool {
        self.lookup(name).unwrap_or(false)
    }

    /// Get a toggle's value, `None` if not registered
    pub fn lookup(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    /// The toggle's value when present, otherwise `fallback`
    pub fn resolve(&self, name: &str, fallback: bool) -> bool {
        self.lookup(name).unwrap_or(fallback)
    }

    /// Check if a toggle is registered
    pub fn has(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Number of registered toggles
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no toggles are registered
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Get all registered toggle names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(|s| s.as_str())
    }

    /// Enable a registered toggle
    ///
    /// Returns `false` if the toggle doesn't exist.
    pub fn enable(&mut self, name: &str) -> bool {
        self.set_existing(name, true)
    }

    /// Disable a registered toggle
    ///
    /// Returns `false` if the toggle doesn't exist.
    pub fn disable(&mut self, name: &str) -> bool {
        self.set_existing(name, false)
    }

    /// Flip a registered toggle
    ///
    /// Returns the new state, or `None` if the toggle doesn't exist.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let v = self.flags.get_mut(name)?;
        *v = !*v;
        Some(*v)
    }

    /// Remove a toggle so the direct value applies again
    pub fn remove(&mut self, name: &str) -> Option<bool> {
        self.flags.remove(name)
    }

    /// Load toggles from a map, registering new ones if they don't exist
    pub fn load(&mut self, map: HashMap<String, bool>) {
        self.flags.extend(map);
    }

    /// Export all toggles as a map
    pub fn export(&self) -> HashMap<String, bool> {
        self.flags.clone()
    }

    fn set_existing(&mut self, name: &str, enabled: bool) -> bool {
        match self.flags.get_mut(name) {
            Some(v) => {
                *v = enabled;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_lookup() {
        let toggles = FeatureToggles::new()
            .with("searchable", true)
            .with("multiple", false);

        assert!(toggles.get("searchable"));
        assert!(!toggles.get("multiple"));
        assert!(!toggles.get("unknown")); // Returns false for unregistered

        assert_eq!(toggles.lookup("multiple"), Some(false));
        assert_eq!(toggles.lookup("unknown"), None);
    }

    #[test]
    fn test_resolve_prefers_present_toggle() {
        let toggles = FeatureToggles::new().with("use_portal", false);

        assert!(!toggles.resolve("use_portal", true));
        assert!(toggles.resolve("searchable", true));
        assert!(!toggles.resolve("searchable", false));
    }

    #[test]
    fn test_enable_disable_toggle() {
        let mut toggles = FeatureToggles::new().with("multiple", false);

        assert!(toggles.enable("multiple"));
        assert!(toggles.get("multiple"));

        assert!(toggles.disable("multiple"));
        assert!(!toggles.get("multiple"));

        assert_eq!(toggles.toggle("multiple"), Some(true));
        assert_eq!(toggles.toggle("unknown"), None);

        // Unknown names are not created implicitly
        assert!(!toggles.enable("unknown"));
        assert!(!toggles.has("unknown"));
    }

    #[test]
    fn test_remove_restores_fallback() {
        let mut toggles = FeatureToggles::new().with("searchable", false);
        assert!(!toggles.resolve("searchable", true));

        assert_eq!(toggles.remove("searchable"), Some(false));
        assert!(toggles.resolve("searchable", true));
        assert!(toggles.is_empty());
    }

    #[test]
    fn test_load_and_export() {
        let mut toggles = FeatureToggles::new().with("searchable", false);
        let mut map = HashMap::new();
        map.insert("searchable".to_string(), true);
        map.insert("use_portal".to_string(), true);

        toggles.load(map);

        assert_eq!(toggles.len(), 2);
        let exported = toggles.export();
        assert_eq!(exported.get("searchable"), Some(&true));
        assert_eq!(exported.get("use_portal"), Some(&true));
    }

    #[test]
    fn test_serde_round_trip_is_plain_object() {
        let toggles = FeatureToggles::new().with("multiple", true);
        let json = serde_json::to_string(&toggles).unwrap();
        assert_eq!(json, r#"{"multiple":true}"#);

        let back: FeatureToggles = serde_json::from_str(&json).unwrap();
        assert_eq!(back, toggles);
    }
}
