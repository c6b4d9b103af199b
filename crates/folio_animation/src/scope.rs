//! Scoped animation ownership
//!
//! An [`AnimationScope`] is built from a list of bindings against one root
//! element. Every selector is evaluated inside that root only, and every
//! registration the scope makes is released when the scope is disposed or
//! dropped, whether or not the animations have finished.

use folio_core::{ElementId, ElementTree, VisualProps};
use smallvec::SmallVec;

use crate::binding::{Activation, AnimationBinding, TriggerElement};
use crate::error::Result;
use crate::scheduler::{Arm, Driver, Registration, RegistrationId, SchedulerHandle};
use crate::trigger::TriggerMode;
use crate::tween::Tween;

/// The set of animations owned by one mounted section
#[derive(Debug)]
pub struct AnimationScope {
    handle: SchedulerHandle,
    root: ElementId,
    registrations: Vec<RegistrationId>,
    /// Inline styles as they were before the scope touched them
    snapshot: Vec<(ElementId, VisualProps)>,
    skipped: usize,
}

impl AnimationScope {
    /// Resolve and register `bindings` inside `root`
    ///
    /// Bindings whose selector matches nothing, or whose trigger window is
    /// inverted, are skipped; they never fail the build. The only error is a
    /// dead scheduler handle.
    pub fn build(
        handle: &SchedulerHandle,
        tree: &mut ElementTree,
        root: ElementId,
        bindings: &[AnimationBinding],
    ) -> Result<Self> {
        let mut scope = Self {
            handle: handle.clone(),
            root,
            registrations: Vec::new(),
            snapshot: Vec::new(),
            skipped: 0,
        };

        for binding in bindings {
            scope.register_binding(tree, binding, None)?;
        }

        handle.refresh(tree, &scope.registrations);

        tracing::debug!(
            registered = scope.registrations.len(),
            skipped = scope.skipped,
            "animation scope built"
        );
        Ok(scope)
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Bindings (or continuation targets) skipped during build
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn registrations(&self) -> &[RegistrationId] {
        &self.registrations
    }

    /// Release every registration and restore the inline styles captured
    /// at build time
    pub fn dispose(mut self, tree: &mut ElementTree) {
        self.release();
        for (element, style) in self.snapshot.drain(..) {
            tree.set_style(element, style);
        }
    }

    fn release(&mut self) {
        if self.registrations.is_empty() {
            return;
        }
        self.handle.remove_all(&self.registrations);
        tracing::debug!(released = self.registrations.len(), "animation scope released");
        self.registrations.clear();
    }

    fn register_binding(
        &mut self,
        tree: &mut ElementTree,
        binding: &AnimationBinding,
        after: Option<&[RegistrationId]>,
    ) -> Result<()> {
        let targets = tree.query_within(self.root, &binding.target);
        if targets.is_empty() {
            tracing::debug!(selector = %binding.target, "animation target missing, skipping");
            self.skipped += 1;
            return Ok(());
        }

        let viewport = self.handle.viewport()?;
        let mut ids: SmallVec<[RegistrationId; 8]> = SmallVec::new();

        for (index, element) in targets.iter().copied().enumerate() {
            let from = binding.from.for_index(index).clone();
            let to = binding.to.for_index(index).clone();

            let driver = match binding.activation {
                Activation::Scroll(trigger) => {
                    let Some(trigger_element) = self.trigger_element(tree, binding, element)
                    else {
                        tracing::debug!(
                            selector = %binding.target,
                            "trigger element missing, skipping"
                        );
                        self.skipped += 1;
                        continue;
                    };
                    let rect = tree.rect(trigger_element).unwrap_or_default();
                    if let Err(err) = trigger.resolve(rect, viewport.height) {
                        tracing::warn!(
                            selector = %binding.target,
                            %err,
                            "invalid trigger window, skipping"
                        );
                        self.skipped += 1;
                        continue;
                    }

                    if trigger.mode == TriggerMode::Scrub {
                        Driver::Scrub {
                            trigger,
                            trigger_element,
                            easing: binding.timing.easing,
                            from,
                            to,
                        }
                    } else {
                        Driver::Timed {
                            tween: self.tween(binding, index, from, to),
                            arm: Arm::Scroll {
                                trigger,
                                trigger_element,
                                fired: false,
                            },
                        }
                    }
                }
                Activation::Mount => {
                    let mut tween = self.tween(binding, index, from, to);
                    let arm = match after {
                        Some(parents) if !parents.is_empty() => {
                            Arm::After(parents[index.min(parents.len() - 1)])
                        }
                        _ => {
                            tween.start();
                            Arm::Mount
                        }
                    };
                    Driver::Timed { tween, arm }
                }
            };

            if !self.snapshot.iter().any(|(el, _)| *el == element) {
                let original = tree.style(element).cloned().unwrap_or_default();
                self.snapshot.push((element, original));
            }

            let id = self.handle.register(Registration {
                element,
                kind: binding.kind(),
                driver,
            })?;
            self.registrations.push(id);
            ids.push(id);
        }

        if let Some(next) = &binding.then {
            self.register_binding(tree, next, Some(&ids))?;
        }
        Ok(())
    }

    fn trigger_element(
        &self,
        tree: &ElementTree,
        binding: &AnimationBinding,
        target: ElementId,
    ) -> Option<ElementId> {
        match &binding.trigger_element {
            TriggerElement::Root => Some(self.root),
            TriggerElement::Target => Some(target),
            TriggerElement::Selector(selector) => {
                tree.query_within(self.root, selector).first().copied()
            }
        }
    }

    fn tween(
        &self,
        binding: &AnimationBinding,
        index: usize,
        from: VisualProps,
        to: VisualProps,
    ) -> Tween<VisualProps> {
        let timing = &binding.timing;
        Tween::new(from, to, timing.duration)
            .easing(timing.easing)
            .delay(timing.delay + timing.stagger * index as u32)
            .repeat(timing.repeat)
            .yoyo(timing.yoyo)
    }
}

impl Drop for AnimationScope {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::scheduler::{AnimationKind, AnimationScheduler};
    use crate::trigger::{Anchor, ScrollTrigger};
    use folio_core::{ElementBuilder, Property, Rect, Selector, Viewport};
    use std::time::Duration;

    struct Fixture {
        scheduler: AnimationScheduler,
        tree: ElementTree,
        section: ElementId,
        other: ElementId,
    }

    fn fixture() -> Fixture {
        let scheduler = AnimationScheduler::new(Viewport::new(1280.0, 800.0));
        let mut tree = ElementTree::new();
        let section = tree
            .insert(
                None,
                ElementBuilder::new()
                    .id("about")
                    .rect(Rect::new(0.0, 800.0, 1280.0, 1600.0)),
            )
            .unwrap();
        let other = tree
            .insert(
                None,
                ElementBuilder::new()
                    .id("projects")
                    .rect(Rect::new(0.0, 2400.0, 1280.0, 1600.0)),
            )
            .unwrap();
        for (parent, top) in [(section, 800.0), (other, 2400.0)] {
            tree.insert(
                Some(parent),
                ElementBuilder::new()
                    .class("parallax-bg")
                    .rect(Rect::new(0.0, top, 1280.0, 1600.0)),
            );
        }
        for (i, top) in [1000.0, 1300.0, 1600.0].into_iter().enumerate() {
            tree.insert(
                Some(section),
                ElementBuilder::new()
                    .id(format!("card-{i}"))
                    .class("card")
                    .rect(Rect::new(0.0, top, 400.0, 200.0)),
            );
        }
        tree.insert(
            Some(section),
            ElementBuilder::new()
                .class("glow")
                .style(VisualProps::new().opacity(0.3)),
        );
        Fixture {
            scheduler,
            tree,
            section,
            other,
        }
    }

    impl Fixture {
        fn build(&mut self, bindings: &[AnimationBinding]) -> AnimationScope {
            AnimationScope::build(&self.scheduler.handle(), &mut self.tree, self.section, bindings)
                .unwrap()
        }
    }

    fn scrubbed_cards() -> AnimationBinding {
        AnimationBinding::from(
            Selector::class("card"),
            VisualProps::new().x(-100.0).opacity(0.0),
        )
        .scroll(ScrollTrigger::scrub(Anchor::top(80.0), Anchor::top(50.0)))
    }

    fn glow() -> AnimationBinding {
        AnimationBinding::from_to(
            Selector::class("glow"),
            VisualProps::new().opacity(0.3),
            VisualProps::new().opacity(0.5),
        )
        .duration(1.5)
        .easing(Easing::SineInOut)
        .pulse()
    }

    fn style(tree: &ElementTree, id: ElementId) -> VisualProps {
        tree.style(id).cloned().unwrap_or_default()
    }

    #[test]
    fn test_selectors_stay_inside_root() {
        let mut f = fixture();
        let parallax = AnimationBinding::to(
            Selector::class("parallax-bg"),
            VisualProps::new().y_percent(30.0),
        )
        .scroll(ScrollTrigger::full_pass())
        .trigger_on(TriggerElement::Root);

        let scope = f.build(&[parallax]);
        assert_eq!(scope.len(), 1);

        f.scheduler
            .on_scroll(&mut f.tree, Viewport::new(1280.0, 800.0).scrolled_to(1800.0));
        let other_bg = f.tree.query_within(f.other, &Selector::class("parallax-bg"))[0];
        assert!(f.tree.style(other_bg).unwrap().is_empty());
    }

    #[test]
    fn test_missing_target_is_skipped() {
        let mut f = fixture();
        let missing =
            AnimationBinding::from(Selector::class("nope"), VisualProps::new().opacity(0.0));

        let scope = f.build(&[missing, glow()]);
        assert_eq!(scope.skipped(), 1);
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn test_scrub_round_trip_is_exact() {
        let mut f = fixture();
        let scope = f.build(&[scrubbed_cards()]);
        let card = f.tree.by_id("card-1").unwrap();
        let vp = Viewport::new(1280.0, 800.0);

        // card-1 window: [1300 - 640, 1300 - 400] = [660, 900]
        for scroll in [660.0, 700.5, 777.7, 812.25, 899.9, 900.0] {
            f.scheduler.on_scroll(&mut f.tree, vp.scrolled_to(scroll));
            let first = style(&f.tree, card);
            f.scheduler.on_scroll(&mut f.tree, vp.scrolled_to(0.0));
            f.scheduler.on_scroll(&mut f.tree, vp.scrolled_to(scroll));
            assert_eq!(style(&f.tree, card), first);
        }
        drop(scope);
    }

    #[test]
    fn test_initial_pose_applied_on_build() {
        let mut f = fixture();
        let _scope = f.build(&[scrubbed_cards()]);
        let card = f.tree.by_id("card-2").unwrap();
        assert_eq!(style(&f.tree, card).get(Property::Opacity), Some(0.0));
    }

    #[test]
    fn test_dispose_releases_everything_and_stops_mutation() {
        let mut f = fixture();
        let scope = f.build(&[scrubbed_cards(), glow()]);

        assert_eq!(f.scheduler.count_of(AnimationKind::Scrubbed), 3);
        assert_eq!(f.scheduler.count_of(AnimationKind::Repeating), 1);

        // Mid-animation
        f.scheduler.tick(&mut f.tree, Duration::from_millis(700));
        scope.dispose(&mut f.tree);
        assert_eq!(f.scheduler.registration_count(), 0);

        let before: Vec<_> = f
            .tree
            .descendants(f.section)
            .into_iter()
            .map(|id| style(&f.tree, id))
            .collect();
        f.scheduler
            .on_scroll(&mut f.tree, Viewport::new(1280.0, 800.0).scrolled_to(1200.0));
        assert!(!f.scheduler.tick(&mut f.tree, Duration::from_secs(3)));
        let after: Vec<_> = f
            .tree
            .descendants(f.section)
            .into_iter()
            .map(|id| style(&f.tree, id))
            .collect();
        assert_eq!(before, after);

        // Inline styles restored to their pre-build values
        let glow_el = f.tree.query_within(f.section, &Selector::class("glow"))[0];
        assert_eq!(style(&f.tree, glow_el), VisualProps::new().opacity(0.3));
    }

    #[test]
    fn test_drop_releases_registrations() {
        let mut f = fixture();
        {
            let _scope = f.build(&[glow()]);
            assert_eq!(f.scheduler.registration_count(), 1);
        }
        assert_eq!(f.scheduler.registration_count(), 0);
    }

    #[test]
    fn test_continuation_starts_after_completion() {
        let mut f = fixture();
        let arrow = AnimationBinding::from_to(
            Selector::id("card-0"),
            VisualProps::new().opacity(0.0),
            VisualProps::new().opacity(1.0),
        )
        .duration(1.0)
        .then(
            AnimationBinding::from_to(
                Selector::id("card-0"),
                VisualProps::new().y(0.0),
                VisualProps::new().y(10.0),
            )
            .duration(1.5)
            .pulse(),
        );

        let scope = f.build(&[arrow]);
        assert_eq!(scope.len(), 2);

        let card = f.tree.by_id("card-0").unwrap();
        f.scheduler.tick(&mut f.tree, Duration::from_millis(500));
        assert_eq!(style(&f.tree, card).get(Property::TranslateY), None);

        f.scheduler.tick(&mut f.tree, Duration::from_millis(500));
        f.scheduler.tick(&mut f.tree, Duration::from_millis(750));
        let y = style(&f.tree, card).get(Property::TranslateY).unwrap();
        assert!((y - 5.0).abs() < 1e-3);
        assert!(f.scheduler.has_active_animations());
    }

    #[test]
    fn test_dead_scheduler_fails_build() {
        let mut f = fixture();
        let handle = {
            let scheduler = AnimationScheduler::new(Viewport::default());
            scheduler.handle()
        };
        assert!(AnimationScope::build(&handle, &mut f.tree, f.section, &[glow()]).is_err());
    }
}
