//! Element tree
//!
//! A retained tree of page elements. Each element carries its document-space
//! rect, an inline visual style written by animations, and a pointer-events
//! flag. Elements are addressed by slotmap keys so stale handles held by a
//! removed section resolve to `None` instead of aliasing a recycled element.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::geometry::Rect;
use crate::registry::ElementRegistry;
use crate::selector::Selector;
use crate::style::VisualProps;

new_key_type! {
    /// Handle to an element in an [`ElementTree`]
    pub struct ElementId;
}

/// A node in the element tree
#[derive(Clone, Debug, Default)]
pub struct Element {
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub rect: Rect,
    /// Inline style written by animations
    pub style: VisualProps,
    /// Whether the element receives pointer events
    pub interactive: bool,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Builder for inserting elements
#[derive(Clone, Debug, Default)]
pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new() -> Self {
        Self {
            element: Element {
                interactive: true,
                ..Default::default()
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.element.classes.push(class.into());
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.element.rect = rect;
        self
    }

    pub fn style(mut self, style: VisualProps) -> Self {
        self.element.style = style;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.element.interactive = interactive;
        self
    }
}

/// The page's element tree
#[derive(Debug, Default)]
pub struct ElementTree {
    elements: SlotMap<ElementId, Element>,
    roots: Vec<ElementId>,
    registry: ElementRegistry,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element under `parent` (or as a new root)
    ///
    /// Returns `None` if `parent` no longer exists.
    pub fn insert(
        &mut self,
        parent: Option<ElementId>,
        builder: ElementBuilder,
    ) -> Option<ElementId> {
        if let Some(parent) = parent {
            if !self.elements.contains_key(parent) {
                return None;
            }
        }

        let mut element = builder.element;
        element.parent = parent;
        let string_id = element.id.clone();
        let id = self.elements.insert(element);

        match parent {
            Some(parent) => {
                if let Some(p) = self.elements.get_mut(parent) {
                    p.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        if let Some(string_id) = string_id {
            self.registry.register(string_id, id);
        }
        Some(id)
    }

    /// Remove an element and its whole subtree
    pub fn remove(&mut self, id: ElementId) -> bool {
        let Some(element) = self.elements.get(id) else {
            return false;
        };

        match element.parent {
            Some(parent) => {
                if let Some(p) = self.elements.get_mut(parent) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }

        for node in self.descendants(id) {
            self.registry.unregister(node);
            self.elements.remove(node);
        }
        true
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Look up an element by its string ID anywhere in the tree
    pub fn by_id(&self, id: &str) -> Option<ElementId> {
        self.registry.get(id)
    }

    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(id).map(|e| e.rect)
    }

    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(element) = self.elements.get_mut(id) {
            element.rect = rect;
        }
    }

    pub fn style(&self, id: ElementId) -> Option<&VisualProps> {
        self.elements.get(id).map(|e| &e.style)
    }

    /// Replace an element's inline style
    pub fn set_style(&mut self, id: ElementId, style: VisualProps) {
        if let Some(element) = self.elements.get_mut(id) {
            element.style = style;
        }
    }

    /// Merge `props` into an element's inline style
    pub fn apply(&mut self, id: ElementId, props: &VisualProps) {
        if let Some(element) = self.elements.get_mut(id) {
            element.style.merge(props);
        }
    }

    pub fn is_interactive(&self, id: ElementId) -> bool {
        self.elements.get(id).is_some_and(|e| e.interactive)
    }

    pub fn set_interactive(&mut self, id: ElementId, interactive: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.interactive = interactive;
        }
    }

    /// `root` and every element below it, in document (pre-order) order
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if !self.elements.contains_key(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(element) = self.elements.get(id) {
                stack.extend(element.children.iter().rev().copied());
            }
        }
        out
    }

    /// Check if `id` is `root` or lies below it
    pub fn is_within(&self, root: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == root {
                return true;
            }
            current = self.elements.get(node).and_then(|e| e.parent);
        }
        false
    }

    /// Evaluate `selector` inside the subtree of `root`
    ///
    /// Matches come back in document order. Elements outside `root` never
    /// match, even when they carry the same class or ID.
    pub fn query_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        match selector {
            Selector::Id(id) => self
                .registry
                .get(id)
                .filter(|el| self.is_within(root, *el))
                .into_iter()
                .collect(),
            Selector::Element(el) => {
                if self.contains(*el) && self.is_within(root, *el) {
                    vec![*el]
                } else {
                    Vec::new()
                }
            }
            Selector::Class(class) => self
                .descendants(root)
                .into_iter()
                .filter(|el| self.elements.get(*el).is_some_and(|e| e.has_class(class)))
                .collect(),
        }
    }
}
