//! Page sections and their animation lifecycle
//!
//! Every section owns at most one [`AnimationScope`]. Mounting builds the
//! scope from the section's binding table; unmounting disposes it, which
//! releases every registration (scrubbed, timed, and repeating) no matter
//! how far along it is.

use std::fmt;

use folio_animation::{AnimationBinding, AnimationScope, SchedulerHandle};
use folio_core::{ElementId, ElementTree};
use serde::{Deserialize, Serialize};

use crate::choreography;
use crate::error::Result;

/// The fixed page sections, in document order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    About,
    Services,
    Projects,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Services,
        SectionId::Projects,
        SectionId::Contact,
    ];

    /// Element ID of the section root, also its URL fragment
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Services => "services",
            SectionId::Projects => "projects",
            SectionId::Contact => "contact",
        }
    }

    /// Parse an anchor, with or without the leading `#`
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        let anchor = anchor.strip_prefix('#').unwrap_or(anchor);
        Self::ALL.into_iter().find(|id| id.anchor() == anchor)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

/// Owns the animation scope of one section
#[derive(Debug)]
pub struct SectionAnimationController {
    section: SectionId,
    root: ElementId,
    bindings: Vec<AnimationBinding>,
    scope: Option<AnimationScope>,
}

impl SectionAnimationController {
    /// Controller using the section's standard choreography
    pub fn new(section: SectionId, root: ElementId) -> Self {
        Self::with_bindings(section, root, choreography::for_section(section))
    }

    pub fn with_bindings(
        section: SectionId,
        root: ElementId,
        bindings: Vec<AnimationBinding>,
    ) -> Self {
        Self {
            section,
            root,
            bindings,
            scope: None,
        }
    }

    pub fn section(&self) -> SectionId {
        self.section
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn bindings(&self) -> &[AnimationBinding] {
        &self.bindings
    }

    pub fn is_mounted(&self) -> bool {
        self.scope.is_some()
    }

    pub fn scope(&self) -> Option<&AnimationScope> {
        self.scope.as_ref()
    }

    /// Build the section's scope
    ///
    /// Mounting an already mounted section replaces its scope with a fresh
    /// one; the old scope is disposed first.
    pub fn mount(&mut self, handle: &SchedulerHandle, tree: &mut ElementTree) -> Result<()> {
        self.unmount(tree);
        let scope = AnimationScope::build(handle, tree, self.root, &self.bindings)?;
        tracing::debug!(section = %self.section, registrations = scope.len(), "section mounted");
        self.scope = Some(scope);
        Ok(())
    }

    /// Dispose the section's scope, if any
    pub fn unmount(&mut self, tree: &mut ElementTree) {
        if let Some(scope) = self.scope.take() {
            scope.dispose(tree);
            tracing::debug!(section = %self.section, "section unmounted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::{AnimationKind, AnimationScheduler};
    use folio_core::{ElementBuilder, Rect, Selector, Viewport, VisualProps};

    #[test]
    fn test_anchor_round_trip() {
        for id in SectionId::ALL {
            assert_eq!(SectionId::from_anchor(id.anchor()), Some(id));
        }
        assert_eq!(SectionId::from_anchor("#projects"), Some(SectionId::Projects));
        assert_eq!(SectionId::from_anchor("#blog"), None);
    }

    #[test]
    fn test_remount_replaces_scope() {
        let scheduler = AnimationScheduler::new(Viewport::default());
        let mut tree = ElementTree::new();
        let root = tree
            .insert(
                None,
                ElementBuilder::new()
                    .id("home")
                    .rect(Rect::new(0.0, 0.0, 1280.0, 800.0)),
            )
            .unwrap();
        tree.insert(Some(root), ElementBuilder::new().class("avatar-glow"));

        let glow = AnimationBinding::from_to(
            Selector::class("avatar-glow"),
            VisualProps::new().opacity(0.3),
            VisualProps::new().opacity(0.5),
        )
        .pulse();
        let mut controller =
            SectionAnimationController::with_bindings(SectionId::Home, root, vec![glow]);

        controller.mount(&scheduler.handle(), &mut tree).unwrap();
        controller.mount(&scheduler.handle(), &mut tree).unwrap();
        assert_eq!(scheduler.count_of(AnimationKind::Repeating), 1);

        controller.unmount(&mut tree);
        assert!(!controller.is_mounted());
        assert_eq!(scheduler.registration_count(), 0);
    }
}
