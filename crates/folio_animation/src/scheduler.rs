//! Animation scheduler
//!
//! Holds every live registration and drives them from two signals:
//! - `on_scroll` - the page scrolled; scrubbed bindings re-sample and scroll
//!   triggers may fire
//! - `tick` - time advanced; playing tweens step forward
//!
//! There is no global scheduler. The page owns one `AnimationScheduler` and
//! hands out weak [`SchedulerHandle`]s; each section's
//! [`AnimationScope`](crate::AnimationScope) registers through a handle and
//! removes exactly what it registered when it is disposed or dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_core::{ElementId, ElementTree, Viewport, VisualProps};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::trigger::{ScrollTrigger, TriggerMode};
use crate::tween::Tween;
use crate::values::Interpolate;

new_key_type! {
    /// Handle to a registered animation
    pub struct RegistrationId;
}

/// Broad category of a registration, used for accounting
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// Progress bound to scroll position
    Scrubbed,
    /// Runs to completion once started
    Triggered,
    /// Loops until released
    Repeating,
}

/// What starts a timed registration
#[derive(Clone, Copy, Debug)]
pub(crate) enum Arm {
    /// Started at registration
    Mount,
    /// Started when the scroll window opens
    Scroll {
        trigger: ScrollTrigger,
        trigger_element: ElementId,
        fired: bool,
    },
    /// Started when another registration completes
    After(RegistrationId),
}

#[derive(Clone, Debug)]
pub(crate) enum Driver {
    Scrub {
        trigger: ScrollTrigger,
        trigger_element: ElementId,
        easing: Easing,
        from: VisualProps,
        to: VisualProps,
    },
    Timed {
        tween: Tween<VisualProps>,
        arm: Arm,
    },
}

/// A single element animation as stored by the scheduler
#[derive(Clone, Debug)]
pub(crate) struct Registration {
    pub(crate) element: ElementId,
    pub(crate) kind: AnimationKind,
    pub(crate) driver: Driver,
}

impl Registration {
    /// Current pose for the given viewport
    fn sample(&self, tree: &ElementTree, viewport: &Viewport) -> Option<VisualProps> {
        match &self.driver {
            Driver::Scrub {
                trigger,
                trigger_element,
                easing,
                from,
                to,
            } => {
                let rect = tree.rect(*trigger_element)?;
                let window = trigger.resolve(rect, viewport.height).ok()?;
                let t = easing.apply(window.fraction(viewport.scroll_y));
                Some(from.lerp(to, t))
            }
            // A continuation has no pose until its predecessor hands over
            Driver::Timed {
                tween,
                arm: Arm::After(_),
            } if !tween.is_playing() && !tween.is_finished() => None,
            Driver::Timed { tween, .. } => Some(tween.value()),
        }
    }
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    registrations: SlotMap<RegistrationId, Registration>,
    /// Registration order; processing follows it so bindings sharing a
    /// trigger window fire in the order they were registered
    order: Vec<RegistrationId>,
    viewport: Viewport,
}

impl SchedulerInner {
    fn refresh(&mut self, tree: &mut ElementTree, ids: &[RegistrationId]) {
        let viewport = self.viewport;
        for id in ids {
            let Some(registration) = self.registrations.get_mut(*id) else {
                continue;
            };

            if let Driver::Timed {
                tween,
                arm:
                    Arm::Scroll {
                        trigger,
                        trigger_element,
                        fired,
                    },
            } = &mut registration.driver
            {
                let window = tree
                    .rect(*trigger_element)
                    .and_then(|rect| trigger.resolve(rect, viewport.height).ok());
                if let Some(window) = window {
                    let reached = window.has_started(viewport.scroll_y);
                    if reached && !*fired {
                        *fired = true;
                        tween.start();
                    } else if !reached && *fired && trigger.mode == TriggerMode::Replay {
                        *fired = false;
                        tween.reset();
                    }
                }
            }

            if let Some(props) = registration.sample(tree, &viewport) {
                tree.apply(registration.element, &props);
            }
        }
    }

    fn tick(&mut self, tree: &mut ElementTree, dt: Duration) -> bool {
        let mut completed: SmallVec<[RegistrationId; 4]> = SmallVec::new();

        for id in &self.order {
            let Some(registration) = self.registrations.get_mut(*id) else {
                continue;
            };
            if let Driver::Timed { tween, .. } = &mut registration.driver {
                if !tween.is_playing() {
                    continue;
                }
                if tween.tick(dt) {
                    completed.push(*id);
                }
                tree.apply(registration.element, &tween.value());
            }
        }

        // Continuations start on the tick their predecessor finished
        for done in completed {
            for id in &self.order {
                let Some(registration) = self.registrations.get_mut(*id) else {
                    continue;
                };
                if let Driver::Timed {
                    tween,
                    arm: Arm::After(after),
                } = &mut registration.driver
                {
                    if *after == done && !tween.is_playing() {
                        tween.start();
                        tree.apply(registration.element, &tween.value());
                    }
                }
            }
        }

        self.has_active()
    }

    fn has_active(&self) -> bool {
        self.registrations.values().any(|r| match &r.driver {
            Driver::Timed { tween, .. } => tween.is_playing(),
            Driver::Scrub { .. } => false,
        })
    }
}

/// The page's animation scheduler
///
/// Owned by the page; sections reach it through [`SchedulerHandle`]s.
pub struct AnimationScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                registrations: SlotMap::with_key(),
                order: Vec::new(),
                viewport,
            })),
        }
    }

    /// Get a weak handle for registering animations
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.inner.borrow().viewport
    }

    /// The page scrolled (or resized): re-sample every registration
    pub fn on_scroll(&self, tree: &mut ElementTree, viewport: Viewport) {
        let mut inner = self.inner.borrow_mut();
        inner.viewport = viewport;
        let order = inner.order.clone();
        inner.refresh(tree, &order);
    }

    /// Advance time-driven animations
    ///
    /// Returns true if any animations are still playing (need another tick).
    pub fn tick(&self, tree: &mut ElementTree, dt: Duration) -> bool {
        self.inner.borrow_mut().tick(tree, dt)
    }

    pub fn has_active_animations(&self) -> bool {
        self.inner.borrow().has_active()
    }

    /// Total number of live registrations
    pub fn registration_count(&self) -> usize {
        self.inner.borrow().registrations.len()
    }

    pub fn count_of(&self, kind: AnimationKind) -> usize {
        self.inner
            .borrow()
            .registrations
            .values()
            .filter(|r| r.kind == kind)
            .count()
    }
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("AnimationScheduler")
            .field("registrations", &inner.registrations.len())
            .field("viewport", &inner.viewport)
            .finish()
    }
}

/// A weak handle to the animation scheduler
///
/// It won't keep the scheduler alive; operations on a dead handle fail with
/// [`AnimationError::SchedulerDropped`] or no-op.
#[derive(Clone, Debug)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// The viewport as of the last scroll event
    pub fn viewport(&self) -> Result<Viewport> {
        let inner = self.inner.upgrade().ok_or(AnimationError::SchedulerDropped)?;
        let viewport = inner.borrow().viewport;
        Ok(viewport)
    }

    pub(crate) fn register(&self, registration: Registration) -> Result<RegistrationId> {
        let inner = self.inner.upgrade().ok_or(AnimationError::SchedulerDropped)?;
        let mut inner = inner.borrow_mut();
        let id = inner.registrations.insert(registration);
        inner.order.push(id);
        Ok(id)
    }

    /// Sync freshly registered animations with the current scroll position
    pub(crate) fn refresh(&self, tree: &mut ElementTree, ids: &[RegistrationId]) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().refresh(tree, ids);
        }
    }

    /// Remove a batch of registrations
    pub fn remove_all(&self, ids: &[RegistrationId]) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.borrow_mut();
            for id in ids {
                inner.registrations.remove(*id);
            }
            inner.order.retain(|id| !ids.contains(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::Anchor;
    use folio_core::{ElementBuilder, Property, Rect};

    fn tree_with_element(top: f32) -> (ElementTree, ElementId) {
        let mut tree = ElementTree::new();
        let el = tree
            .insert(
                None,
                ElementBuilder::new().rect(Rect::new(0.0, top, 100.0, 400.0)),
            )
            .unwrap();
        (tree, el)
    }

    #[test]
    fn test_scrub_follows_scroll() {
        let scheduler = AnimationScheduler::new(Viewport::new(1000.0, 800.0));
        let handle = scheduler.handle();
        let (mut tree, el) = tree_with_element(2000.0);

        handle
            .register(Registration {
                element: el,
                kind: AnimationKind::Scrubbed,
                driver: Driver::Scrub {
                    trigger: ScrollTrigger::scrub(Anchor::top(80.0), Anchor::top(40.0)),
                    trigger_element: el,
                    easing: Easing::Linear,
                    from: VisualProps::new().opacity(0.0),
                    to: VisualProps::new().opacity(1.0),
                },
            })
            .unwrap();

        // Window is [1360, 1680]
        scheduler.on_scroll(&mut tree, Viewport::new(1000.0, 800.0).scrolled_to(1520.0));
        let opacity = tree.style(el).unwrap().get(Property::Opacity).unwrap();
        assert!((opacity - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_scroll_armed_tween_fires_once() {
        let scheduler = AnimationScheduler::new(Viewport::new(1000.0, 800.0));
        let handle = scheduler.handle();
        let (mut tree, el) = tree_with_element(2000.0);

        handle
            .register(Registration {
                element: el,
                kind: AnimationKind::Triggered,
                driver: Driver::Timed {
                    tween: Tween::new(
                        VisualProps::new().opacity(0.0),
                        VisualProps::new().opacity(1.0),
                        Duration::from_secs(1),
                    ),
                    arm: Arm::Scroll {
                        trigger: ScrollTrigger::once(Anchor::top(80.0), Anchor::top(50.0)),
                        trigger_element: el,
                        fired: false,
                    },
                },
            })
            .unwrap();

        let vp = Viewport::new(1000.0, 800.0);
        scheduler.on_scroll(&mut tree, vp.scrolled_to(0.0));
        assert!(!scheduler.tick(&mut tree, Duration::from_millis(100)));

        scheduler.on_scroll(&mut tree, vp.scrolled_to(1400.0));
        assert!(scheduler.has_active_animations());

        // Scrolling away does not interrupt a fired tween
        scheduler.on_scroll(&mut tree, vp.scrolled_to(0.0));
        scheduler.tick(&mut tree, Duration::from_secs(2));
        let opacity = tree.style(el).unwrap().get(Property::Opacity).unwrap();
        assert_eq!(opacity, 1.0);
    }

    fn replay_fade(el: ElementId) -> Registration {
        Registration {
            element: el,
            kind: AnimationKind::Triggered,
            driver: Driver::Timed {
                tween: Tween::new(
                    VisualProps::new().opacity(0.0),
                    VisualProps::new().opacity(1.0),
                    Duration::from_secs(1),
                ),
                arm: Arm::Scroll {
                    trigger: ScrollTrigger::new(
                        Anchor::top(80.0),
                        Anchor::top(50.0),
                        TriggerMode::Replay,
                    ),
                    trigger_element: el,
                    fired: false,
                },
            },
        }
    }

    #[test]
    fn test_replay_rearms_above_start() {
        let scheduler = AnimationScheduler::new(Viewport::new(1000.0, 800.0));
        let (mut tree, el) = tree_with_element(2000.0);
        scheduler.handle().register(replay_fade(el)).unwrap();
        let vp = Viewport::new(1000.0, 800.0);
        let opacity = |tree: &ElementTree| tree.style(el).unwrap().get(Property::Opacity).unwrap();

        // Window opens at 1360
        scheduler.on_scroll(&mut tree, vp.scrolled_to(1400.0));
        scheduler.tick(&mut tree, Duration::from_secs(2));
        assert_eq!(opacity(&tree), 1.0);

        // Back above the start: reset to the initial pose and idle
        scheduler.on_scroll(&mut tree, vp.scrolled_to(1000.0));
        assert_eq!(opacity(&tree), 0.0);
        assert!(!scheduler.has_active_animations());

        scheduler.on_scroll(&mut tree, vp.scrolled_to(1400.0));
        assert!(scheduler.has_active_animations());
        scheduler.tick(&mut tree, Duration::from_millis(500));
        assert!((opacity(&tree) - 0.5).abs() < 1e-4);
        scheduler.tick(&mut tree, Duration::from_secs(1));
        assert_eq!(opacity(&tree), 1.0);
    }

    #[test]
    fn test_same_window_applies_in_registration_order() {
        let scheduler = AnimationScheduler::new(Viewport::new(1000.0, 800.0));
        let handle = scheduler.handle();
        let (mut tree, el) = tree_with_element(2000.0);
        let scrub = |from: f32, to: f32| Registration {
            element: el,
            kind: AnimationKind::Scrubbed,
            driver: Driver::Scrub {
                trigger: ScrollTrigger::scrub(Anchor::top(80.0), Anchor::top(40.0)),
                trigger_element: el,
                easing: Easing::Linear,
                from: VisualProps::new().opacity(from),
                to: VisualProps::new().opacity(to),
            },
        };

        handle.register(scrub(0.0, 1.0)).unwrap();
        handle.register(scrub(0.2, 0.4)).unwrap();

        scheduler.on_scroll(&mut tree, Viewport::new(1000.0, 800.0).scrolled_to(1520.0));
        let opacity = tree.style(el).unwrap().get(Property::Opacity).unwrap();
        assert!((opacity - 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_dead_handle() {
        let handle = {
            let scheduler = AnimationScheduler::new(Viewport::default());
            scheduler.handle()
        };
        assert!(!handle.is_alive());
        assert_eq!(handle.viewport(), Err(AnimationError::SchedulerDropped));
    }
}
