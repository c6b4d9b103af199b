//! Folio Core
//!
//! The document model every other folio crate works against.
//!
//! # Features
//!
//! - **Element Tree**: Slotmap-keyed elements with document-space rects
//! - **Element Registry**: O(1) lookup of elements by string ID
//! - **Scoped Selectors**: `#id` / `.class` queries restricted to a subtree
//! - **Visual Properties**: Ordered property maps applied as inline styles

pub mod geometry;
pub mod registry;
pub mod selector;
pub mod style;
pub mod tree;

pub use geometry::{Rect, Viewport};
pub use registry::ElementRegistry;
pub use selector::Selector;
pub use style::{Property, VisualProps};
pub use tree::{Element, ElementBuilder, ElementId, ElementTree};
