//! Declarative animation bindings
//!
//! An [`AnimationBinding`] is a plain value describing one visual effect:
//! which elements to animate, between which poses, and what drives the
//! progress (scroll position or elapsed time). Sections describe their
//! choreography as a list of bindings; [`AnimationScope`](crate::AnimationScope)
//! interprets the list uniformly.
//!
//! # Example
//!
//! ```ignore
//! use folio_animation::{AnimationBinding, Anchor, ScrollTrigger};
//! use folio_core::{Selector, VisualProps};
//!
//! // Fade the title up while it scrolls from 80% to 40% of the viewport
//! let title = AnimationBinding::from(
//!     Selector::class("about-title"),
//!     VisualProps::new().y(100.0).opacity(0.0),
//! )
//! .scroll(ScrollTrigger::scrub(Anchor::top(80.0), Anchor::top(40.0)));
//! ```

use std::time::Duration;

use folio_core::{Selector, VisualProps};

use crate::easing::Easing;
use crate::scheduler::AnimationKind;
use crate::trigger::{ScrollTrigger, TriggerMode};
use crate::tween::Repeat;

/// Per-element pose source
#[derive(Clone, Debug, PartialEq)]
pub enum PropsSource {
    /// Every matched element gets the same pose
    Uniform(VisualProps),
    /// Even-indexed matches get the first pose, odd-indexed the second
    Alternating(VisualProps, VisualProps),
}

impl PropsSource {
    pub fn for_index(&self, index: usize) -> &VisualProps {
        match self {
            PropsSource::Uniform(props) => props,
            PropsSource::Alternating(even, odd) => {
                if index % 2 == 0 {
                    even
                } else {
                    odd
                }
            }
        }
    }

    /// Resting values for every property either pose touches
    fn identity_of(&self) -> VisualProps {
        match self {
            PropsSource::Uniform(props) => props.identity_of(),
            PropsSource::Alternating(even, odd) => {
                let mut out = even.identity_of();
                out.merge(&odd.identity_of());
                out
            }
        }
    }
}

impl From<VisualProps> for PropsSource {
    fn from(props: VisualProps) -> Self {
        PropsSource::Uniform(props)
    }
}

/// What starts a binding
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Activation {
    /// Plays as soon as the scope is built
    Mount,
    /// Driven by a scroll trigger window
    Scroll(ScrollTrigger),
}

/// Which element's rect a scroll trigger is resolved against
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TriggerElement {
    /// The scope's root (the section itself)
    Root,
    /// Each animated element triggers itself
    #[default]
    Target,
    /// First match of a selector inside the scope
    Selector(Selector),
}

/// Time-domain settings; ignored by scrubbed bindings except `easing`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
    /// Extra delay added per matched element
    pub stagger: Duration,
    pub repeat: Repeat,
    pub yoyo: bool,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(500),
            delay: Duration::ZERO,
            easing: Easing::Linear,
            stagger: Duration::ZERO,
            repeat: Repeat::ONCE,
            yoyo: false,
        }
    }
}

/// A declarative animation
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationBinding {
    pub target: Selector,
    pub from: PropsSource,
    pub to: PropsSource,
    pub activation: Activation,
    pub trigger_element: TriggerElement,
    pub timing: Timing,
    /// Binding started when this one completes
    pub then: Option<Box<AnimationBinding>>,
}

impl AnimationBinding {
    /// Animate from `from` to `to`
    pub fn from_to(
        target: Selector,
        from: impl Into<PropsSource>,
        to: impl Into<PropsSource>,
    ) -> Self {
        Self {
            target,
            from: from.into(),
            to: to.into(),
            activation: Activation::Mount,
            trigger_element: TriggerElement::default(),
            timing: Timing::default(),
            then: None,
        }
    }

    /// Animate from `from` to the resting pose
    pub fn from(target: Selector, from: impl Into<PropsSource>) -> Self {
        let from = from.into();
        let to = from.identity_of();
        Self::from_to(target, from, to)
    }

    /// Animate from the resting pose to `to`
    pub fn to(target: Selector, to: impl Into<PropsSource>) -> Self {
        let to = to.into();
        let from = to.identity_of();
        Self::from_to(target, from, to)
    }

    pub fn scroll(mut self, trigger: ScrollTrigger) -> Self {
        self.activation = Activation::Scroll(trigger);
        self
    }

    pub fn on_mount(mut self) -> Self {
        self.activation = Activation::Mount;
        self
    }

    pub fn trigger_on(mut self, element: TriggerElement) -> Self {
        self.trigger_element = element;
        self
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.timing.duration = Duration::from_secs_f32(seconds);
        self
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.timing.delay = Duration::from_secs_f32(seconds);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.timing.easing = easing;
        self
    }

    pub fn stagger(mut self, seconds: f32) -> Self {
        self.timing.stagger = Duration::from_secs_f32(seconds);
        self
    }

    /// Loop forever, reversing direction on every other cycle
    pub fn pulse(mut self) -> Self {
        self.timing.repeat = Repeat::Infinite;
        self.timing.yoyo = true;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.timing.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.timing.yoyo = yoyo;
        self
    }

    /// Chain a binding that starts once this one completes
    pub fn then(mut self, next: AnimationBinding) -> Self {
        self.then = Some(Box::new(next));
        self
    }

    pub fn kind(&self) -> AnimationKind {
        match self.activation {
            Activation::Scroll(ScrollTrigger {
                mode: TriggerMode::Scrub,
                ..
            }) => AnimationKind::Scrubbed,
            _ if self.timing.repeat == Repeat::Infinite => AnimationKind::Repeating,
            _ => AnimationKind::Triggered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::Anchor;
    use folio_core::Property;

    #[test]
    fn test_from_fills_resting_pose() {
        let binding = AnimationBinding::from(
            Selector::class("about-title"),
            VisualProps::new().y(100.0).opacity(0.0),
        );
        let to = binding.to.for_index(0);
        assert_eq!(to.get(Property::TranslateY), Some(0.0));
        assert_eq!(to.get(Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_alternating_source() {
        let source =
            PropsSource::Alternating(VisualProps::new().x(-50.0), VisualProps::new().x(50.0));
        assert_eq!(source.for_index(0).get(Property::TranslateX), Some(-50.0));
        assert_eq!(source.for_index(3).get(Property::TranslateX), Some(50.0));
    }

    #[test]
    fn test_kind_classification() {
        let base = AnimationBinding::to(Selector::class("glow"), VisualProps::new().opacity(0.5));
        assert_eq!(base.clone().pulse().kind(), AnimationKind::Repeating);
        assert_eq!(base.clone().kind(), AnimationKind::Triggered);
        assert_eq!(
            base.clone()
                .scroll(ScrollTrigger::scrub(Anchor::top(80.0), Anchor::top(40.0)))
                .kind(),
            AnimationKind::Scrubbed
        );
        assert_eq!(
            base.scroll(ScrollTrigger::once(Anchor::top(80.0), Anchor::top(50.0)))
                .kind(),
            AnimationKind::Triggered
        );
    }
}
