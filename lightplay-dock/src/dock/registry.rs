//! Tab-type registry
//!
//! This module provides the [`TabTypeRegistry`] which maps a stable tab label
//! to its render/cleanup behavior. Persisted layouts only carry labels; the
//! registry is how a resolved layout regains live behavior.

use std::collections::HashMap;

use super::tab::{MountArea, TabBehavior};

/// Maps tab labels to behaviors.
///
/// # Example
///
/// ```
/// use lightplay_dock::dock::TabTypeRegistry;
///
/// let mut registry = TabTypeRegistry::new();
/// registry.register("Scene", |area| area.set_text("scene"), None::<fn()>);
///
/// assert!(registry.contains("Scene"));
/// assert!(registry.get("Inspector").is_none());
/// ```
#[derive(Debug, Default, Clone)]
pub struct TabTypeRegistry {
    entries: HashMap<String, TabBehavior>,
}

impl TabTypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers a tab type. Re-registering a label replaces its entry.
    pub fn register<R, C>(&mut self, label: impl Into<String>, render: R, cleanup: Option<C>)
    where
        R: Fn(&mut MountArea) + 'static,
        C: Fn() + 'static,
    {
        let behavior = match cleanup {
            Some(cleanup) => TabBehavior::new(render).with_cleanup(cleanup),
            None => TabBehavior::new(render),
        };
        self.register_behavior(label, behavior);
    }

    /// Registers an already assembled behavior under a label.
    pub fn register_behavior(&mut self, label: impl Into<String>, behavior: TabBehavior) {
        let label = label.into();
        if self.entries.insert(label.clone(), behavior).is_some() {
            tracing::debug!(label = %label, "Tab type re-registered");
        }
    }

    /// Returns the behavior registered for a label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&TabBehavior> {
        self.entries.get(label)
    }

    /// Returns true if the label is registered.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Removes a registration.
    pub fn unregister(&mut self, label: &str) -> Option<TabBehavior> {
        self.entries.remove(label)
    }

    /// Returns all registered labels, sorted.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// Returns the number of registered tab types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
