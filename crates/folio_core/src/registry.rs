//! Element registry for O(1) ID-based lookups

use rustc_hash::FxHashMap;

use crate::tree::ElementId;

/// Registry mapping string IDs to element IDs
///
/// Owned by the [`ElementTree`](crate::ElementTree) and kept in sync as
/// elements are inserted and removed.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    ids: FxHashMap<String, ElementId>,
    reverse: FxHashMap<ElementId, String>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element ID
    ///
    /// If the ID already exists, the old mapping is replaced (last-wins) and a
    /// warning is logged.
    pub fn register(&mut self, id: impl Into<String>, element: ElementId) {
        let id = id.into();

        if let Some(previous) = self.ids.insert(id.clone(), element) {
            if previous != element {
                tracing::warn!("Duplicate element ID registered: {}", id);
                self.reverse.remove(&previous);
            }
        }
        self.reverse.insert(element, id);
    }

    /// Look up an element by string ID
    pub fn get(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied()
    }

    /// Look up the string ID of an element
    pub fn get_id(&self, element: ElementId) -> Option<&str> {
        self.reverse.get(&element).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Unregister a specific element (e.g., when it is removed from the tree)
    pub fn unregister(&mut self, element: ElementId) {
        if let Some(id) = self.reverse.remove(&element) {
            // Only drop the forward mapping if it still points at this element
            if self.ids.get(&id) == Some(&element) {
                self.ids.remove(&id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_last_registration_wins() {
        let mut keys: SlotMap<ElementId, ()> = SlotMap::with_key();
        let a = keys.insert(());
        let b = keys.insert(());

        let mut registry = ElementRegistry::new();
        registry.register("hero", a);
        registry.register("hero", b);

        assert_eq!(registry.get("hero"), Some(b));
        assert_eq!(registry.get_id(a), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_stale_element_keeps_new_mapping() {
        let mut keys: SlotMap<ElementId, ()> = SlotMap::with_key();
        let a = keys.insert(());
        let b = keys.insert(());

        let mut registry = ElementRegistry::new();
        registry.register("card", a);
        registry.register("card", b);
        registry.unregister(a);

        assert_eq!(registry.get("card"), Some(b));
        registry.unregister(b);
        assert!(registry.is_empty());
    }
}
