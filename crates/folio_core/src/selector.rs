//! Element selectors
//!
//! A deliberately small selector language: one `#id`, one `.class`, or a
//! direct element reference. Queries are always evaluated inside a root
//! element so a section can never reach into another section's subtree.

use crate::tree::ElementId;

/// Target of an element query
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// `#id` - match by registered string ID
    Id(String),
    /// `.class` - match every element carrying the class
    Class(String),
    /// A direct element reference
    Element(ElementId),
}

impl Selector {
    /// Parse `#id` or `.class`
    ///
    /// A bare word is treated as a class name. Returns `None` for empty input.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(id) = input.strip_prefix('#') {
            (!id.is_empty()).then(|| Selector::Id(id.to_string()))
        } else if let Some(class) = input.strip_prefix('.') {
            (!class.is_empty()).then(|| Selector::Class(class.to_string()))
        } else if input.is_empty() {
            None
        } else {
            Some(Selector::Class(input.to_string()))
        }
    }

    pub fn id(id: impl Into<String>) -> Self {
        Selector::Id(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Selector::Class(class.into())
    }
}

impl From<ElementId> for Selector {
    fn from(element: ElementId) -> Self {
        Selector::Element(element)
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Element(element) => write!(f, "{element:?}"),
        }
    }
}
