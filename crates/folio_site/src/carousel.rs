//! Project carousel
//!
//! A manual carousel over N stacked items. Navigation runs one transition at a
//! time: the outgoing item animates away while the incoming item animates in
//! from the mirrored pose. Requests that arrive mid-transition are dropped.
//!
//! # State Machine
//!
//! ```text
//! Idle --navigate--> Transitioning --transition complete--> Idle
//! ```
//!
//! Exactly one item is interactive at all times. The flag moves to the
//! incoming item as soon as a navigation is accepted.

use std::time::Duration;

use folio_animation::{Easing, Tween};
use folio_core::{ElementId, ElementTree, VisualProps};
use serde::Serialize;

use crate::error::CarouselError;

const ACCENT_DURATION: Duration = Duration::from_millis(1000);
const ACCENT_STAGGER: Duration = Duration::from_millis(200);

/// Direction of travel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// `+1.0` forward, `-1.0` backward
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Index one step from `index` in a ring of `len` items
    pub fn step(self, index: usize, len: usize) -> usize {
        match self {
            Direction::Forward => (index + 1) % len,
            Direction::Backward => (index + len - 1) % len,
        }
    }
}

/// Carousel phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum CarouselPhase {
    #[default]
    Idle,
    Transitioning,
}

/// Inputs to the carousel state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselEvent {
    Navigate,
    TransitionComplete,
}

impl CarouselPhase {
    /// Handle an event and return the new phase, or None if no transition
    pub fn on_event(&self, event: CarouselEvent) -> Option<Self> {
        match (self, event) {
            (CarouselPhase::Idle, CarouselEvent::Navigate) => Some(CarouselPhase::Transitioning),
            (CarouselPhase::Transitioning, CarouselEvent::TransitionComplete) => {
                Some(CarouselPhase::Idle)
            }
            _ => None,
        }
    }
}

/// Observable carousel state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CarouselState {
    pub active_index: usize,
    pub direction: Direction,
    pub is_transitioning: bool,
}

/// Pose an item leaves toward when travelling in `direction`
///
/// Forward travel shrinks and tips the item back; backward travel grows and
/// tips it forward. The incoming item starts from the opposite pose.
pub fn exit_pose(direction: Direction) -> VisualProps {
    let s = direction.sign();
    VisualProps::new()
        .scale(1.0 - 0.3 * s)
        .rotate(-10.0 * s)
        .opacity(0.0)
        .blur(10.0)
}

/// Pose an item enters from when travelling in `direction`
pub fn enter_pose(direction: Direction) -> VisualProps {
    exit_pose(direction.reversed())
}

#[derive(Debug)]
struct ItemTransition {
    element: ElementId,
    tween: Tween<VisualProps>,
}

impl ItemTransition {
    fn new(
        element: ElementId,
        from: VisualProps,
        to: VisualProps,
        duration: Duration,
        delay: Duration,
        easing: Easing,
    ) -> Self {
        let mut tween = Tween::new(from, to, duration).delay(delay).easing(easing);
        tween.start();
        Self { element, tween }
    }

    /// Step and apply; true while still running
    fn advance(&mut self, tree: &mut ElementTree, dt: Duration) -> bool {
        self.tween.tick(dt);
        tree.apply(self.element, &self.tween.value());
        self.tween.is_playing()
    }
}

/// Manual carousel controller
#[derive(Debug)]
pub struct CarouselController {
    items: Vec<ElementId>,
    accents: Vec<ElementId>,
    active: usize,
    direction: Direction,
    phase: CarouselPhase,
    duration: Duration,
    transition: Vec<ItemTransition>,
    accent_transition: Vec<ItemTransition>,
    /// Inline style and pointer flag of every item and accent before the
    /// carousel took over
    snapshot: Vec<(ElementId, VisualProps, bool)>,
}

impl CarouselController {
    /// Take control of `items`, showing the first one
    pub fn new(
        tree: &mut ElementTree,
        items: Vec<ElementId>,
        accents: Vec<ElementId>,
        duration: Duration,
    ) -> Result<Self, CarouselError> {
        if items.is_empty() {
            return Err(CarouselError::Empty);
        }

        let snapshot = items
            .iter()
            .chain(&accents)
            .map(|el| {
                let style = tree.style(*el).cloned().unwrap_or_default();
                (*el, style, tree.is_interactive(*el))
            })
            .collect();

        let resting = exit_pose(Direction::Forward).identity_of();
        for (index, item) in items.iter().copied().enumerate() {
            if index == 0 {
                tree.apply(item, &resting);
            } else {
                tree.apply(item, &VisualProps::new().opacity(0.0));
            }
            tree.set_interactive(item, index == 0);
        }

        Ok(Self {
            items,
            accents,
            active: 0,
            direction: Direction::Forward,
            phase: CarouselPhase::Idle,
            duration,
            transition: Vec::new(),
            accent_transition: Vec::new(),
            snapshot,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_item(&self) -> ElementId {
        self.items[self.active]
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase == CarouselPhase::Transitioning
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            active_index: self.active,
            direction: self.direction,
            is_transitioning: self.is_transitioning(),
        }
    }

    /// Start a transition one step in `direction`
    ///
    /// Returns `false` when the request is dropped: a transition is already
    /// running, or there is only one item.
    pub fn navigate(&mut self, tree: &mut ElementTree, direction: Direction) -> bool {
        let Some(next_phase) = self.phase.on_event(CarouselEvent::Navigate) else {
            tracing::trace!(?direction, active = self.active, "carousel busy, navigate dropped");
            return false;
        };
        if self.items.len() < 2 {
            tracing::trace!("single-item carousel, navigate dropped");
            return false;
        }

        let current = self.active;
        let next = direction.step(current, self.items.len());
        let outgoing = self.items[current];
        let incoming = self.items[next];

        let resting = exit_pose(direction).identity_of();
        self.transition = vec![
            ItemTransition::new(
                outgoing,
                resting.clone(),
                exit_pose(direction),
                self.duration,
                Duration::ZERO,
                Easing::Power2InOut,
            ),
            ItemTransition::new(
                incoming,
                enter_pose(direction),
                resting,
                self.duration,
                Duration::ZERO,
                Easing::Power2InOut,
            ),
        ];

        // Accents replay on every accepted navigation and never gate Idle
        self.accent_transition = self
            .accents
            .iter()
            .copied()
            .enumerate()
            .map(|(i, accent)| {
                ItemTransition::new(
                    accent,
                    VisualProps::new().scale(0.5).opacity(0.0),
                    VisualProps::new().scale(1.0).opacity(1.0),
                    ACCENT_DURATION,
                    ACCENT_STAGGER * i as u32,
                    Easing::Power1Out,
                )
            })
            .collect();

        for transition in self.transition.iter().chain(&self.accent_transition) {
            tree.apply(transition.element, &transition.tween.value());
        }
        tree.set_interactive(outgoing, false);
        tree.set_interactive(incoming, true);

        self.active = next;
        self.direction = direction;
        self.phase = next_phase;
        tracing::debug!(from = current, to = next, ?direction, "carousel transition started");
        true
    }

    /// Give the items back: in-flight transitions stop and every item and
    /// accent gets its original inline style and pointer flag
    pub fn release(self, tree: &mut ElementTree) {
        for (element, style, interactive) in self.snapshot {
            tree.set_style(element, style);
            tree.set_interactive(element, interactive);
        }
        tracing::debug!(items = self.items.len(), "carousel released");
    }

    /// Advance running transitions
    ///
    /// Returns true while anything, including accents, is still animating.
    pub fn tick(&mut self, tree: &mut ElementTree, dt: Duration) -> bool {
        let mut running = false;
        for transition in &mut self.transition {
            running |= transition.advance(tree, dt);
        }

        if self.is_transitioning() && !running {
            self.transition.clear();
            if let Some(next) = self.phase.on_event(CarouselEvent::TransitionComplete) {
                self.phase = next;
            }
        }

        let mut accents_running = false;
        for accent in &mut self.accent_transition {
            accents_running |= accent.advance(tree, dt);
        }
        if !accents_running {
            self.accent_transition.clear();
        }

        running || accents_running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{ElementBuilder, Property};

    fn carousel(n: usize) -> (ElementTree, CarouselController) {
        let mut tree = ElementTree::new();
        let root = tree.insert(None, ElementBuilder::new().id("projects")).unwrap();
        let items = (0..n)
            .map(|_| {
                tree.insert(Some(root), ElementBuilder::new().class("project-card"))
                    .unwrap()
            })
            .collect();
        let controller =
            CarouselController::new(&mut tree, items, Vec::new(), Duration::from_millis(800))
                .unwrap();
        (tree, controller)
    }

    fn interactive_count(tree: &ElementTree, carousel: &CarouselController) -> usize {
        carousel
            .items()
            .iter()
            .filter(|item| tree.is_interactive(**item))
            .count()
    }

    #[test]
    fn test_empty_carousel_rejected() {
        let mut tree = ElementTree::new();
        let duration = Duration::from_millis(800);
        let err = CarouselController::new(&mut tree, Vec::new(), Vec::new(), duration).unwrap_err();
        assert_eq!(err, CarouselError::Empty);
    }

    #[test]
    fn test_wraparound_both_directions() {
        assert_eq!(Direction::Backward.step(0, 5), 4);
        assert_eq!(Direction::Forward.step(4, 5), 0);
        assert_eq!(Direction::Forward.step(2, 5), 3);
    }

    #[test]
    fn test_rapid_navigation_moves_one_step() {
        let (mut tree, mut carousel) = carousel(5);
        carousel.navigate(&mut tree, Direction::Forward);
        carousel.tick(&mut tree, Duration::from_millis(800));
        carousel.navigate(&mut tree, Direction::Forward);
        assert_eq!(carousel.active_index(), 2);
        carousel.tick(&mut tree, Duration::from_millis(800));

        assert!(carousel.navigate(&mut tree, Direction::Forward));
        assert!(!carousel.navigate(&mut tree, Direction::Forward));
        assert!(!carousel.navigate(&mut tree, Direction::Backward));
        assert_eq!(carousel.active_index(), 3);

        carousel.tick(&mut tree, Duration::from_millis(800));
        assert!(!carousel.state().is_transitioning);
        assert_eq!(carousel.active_index(), 3);
    }

    #[test]
    fn test_transition_poses_mirror() {
        let forward_exit = exit_pose(Direction::Forward);
        assert!((forward_exit.resolved(Property::Scale) - 0.7).abs() < 1e-6);
        assert_eq!(forward_exit.get(Property::Rotate), Some(-10.0));
        let forward_enter = enter_pose(Direction::Forward);
        assert!((forward_enter.resolved(Property::Scale) - 1.3).abs() < 1e-6);
        assert_eq!(forward_enter.get(Property::Rotate), Some(10.0));
        assert_eq!(enter_pose(Direction::Backward), exit_pose(Direction::Forward));
    }

    #[test]
    fn test_single_interactive_item_throughout() {
        let (mut tree, mut carousel) = carousel(3);
        assert_eq!(interactive_count(&tree, &carousel), 1);

        carousel.navigate(&mut tree, Direction::Backward);
        assert_eq!(interactive_count(&tree, &carousel), 1);
        assert!(tree.is_interactive(carousel.items()[2]));

        carousel.tick(&mut tree, Duration::from_millis(400));
        assert_eq!(interactive_count(&tree, &carousel), 1);
        carousel.tick(&mut tree, Duration::from_millis(400));
        assert_eq!(interactive_count(&tree, &carousel), 1);
        assert!(!carousel.is_transitioning());

        // Incoming item lands at rest, outgoing item is hidden
        let incoming = tree.style(carousel.items()[2]).unwrap();
        assert!((incoming.resolved(Property::Opacity) - 1.0).abs() < 1e-6);
        assert!(incoming.resolved(Property::Blur).abs() < 1e-6);
        let outgoing = tree.style(carousel.items()[0]).unwrap();
        assert!(outgoing.resolved(Property::Opacity).abs() < 1e-6);
        assert!((outgoing.resolved(Property::Scale) - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_single_item_never_transitions() {
        let (mut tree, mut carousel) = carousel(1);
        assert!(!carousel.navigate(&mut tree, Direction::Forward));
        assert_eq!(carousel.active_index(), 0);
        assert!(!carousel.is_transitioning());
    }

    #[test]
    fn test_release_mid_transition_restores_items() {
        let (mut tree, mut carousel) = carousel(3);
        let items = carousel.items().to_vec();
        carousel.navigate(&mut tree, Direction::Forward);
        carousel.tick(&mut tree, Duration::from_millis(300));
        assert_eq!(interactive_count(&tree, &carousel), 1);

        carousel.release(&mut tree);
        for item in items {
            assert_eq!(tree.style(item), Some(&VisualProps::new()));
            assert!(tree.is_interactive(item));
        }
    }
}
