//! Per-section animation tables
//!
//! Each section's visual effects are plain [`AnimationBinding`] lists. The
//! selectors are resolved inside the section root when the section mounts,
//! so class names like `parallax-bg` can repeat across sections without
//! cross-talk.

use folio_animation::{AnimationBinding, Anchor, Easing, PropsSource, ScrollTrigger, TriggerElement};
use folio_core::{Selector, VisualProps};

use crate::section::SectionId;

/// The standard binding table for `section`
pub fn for_section(section: SectionId) -> Vec<AnimationBinding> {
    match section {
        SectionId::Home => hero(),
        SectionId::About => about(),
        SectionId::Services => services(),
        SectionId::Projects => projects(),
        SectionId::Contact => contact(),
    }
}

/// Slide-in of the fixed navigation bar and its links
pub fn navbar() -> Vec<AnimationBinding> {
    vec![
        AnimationBinding::from(Selector::class("navbar"), VisualProps::new().y(-100.0).opacity(0.0))
            .duration(0.8)
            .easing(Easing::Power1Out),
        AnimationBinding::from(
            Selector::class("nav-link"),
            VisualProps::new().y(-20.0).opacity(0.0),
        )
        .duration(0.5)
        .stagger(0.1)
        .easing(Easing::Power1Out),
    ]
}

/// Pop-in of the contact form's success checkmark, then a fade back out
/// once it has been on screen for a second
pub fn success_checkmark() -> Vec<AnimationBinding> {
    let hidden = VisualProps::new().scale(0.0).opacity(0.0);
    let shown = VisualProps::new().scale(1.0).opacity(1.0);
    let checkmark = Selector::class("success-checkmark");
    let hide = AnimationBinding::from_to(checkmark.clone(), shown.clone(), hidden.clone())
        .duration(0.3)
        .delay(1.0);
    vec![
        AnimationBinding::from_to(checkmark, hidden, shown)
            .duration(0.5)
            .easing(Easing::BackOut)
            .then(hide),
    ]
}

/// Background drift across the whole time the section is on screen
fn parallax(class: &str) -> AnimationBinding {
    AnimationBinding::to(Selector::class(class), VisualProps::new().y_percent(30.0))
        .scroll(ScrollTrigger::full_pass())
        .trigger_on(TriggerElement::Root)
}

fn scrub(start_percent: f32, end_percent: f32) -> ScrollTrigger {
    ScrollTrigger::scrub(Anchor::top(start_percent), Anchor::top(end_percent))
}

fn once(start_percent: f32, end_percent: f32) -> ScrollTrigger {
    ScrollTrigger::once(Anchor::top(start_percent), Anchor::top(end_percent))
}

fn hero() -> Vec<AnimationBinding> {
    // Intro timeline; each entry overlaps the tail of the previous one
    let intro = vec![
        AnimationBinding::from(
            Selector::class("hero-heading"),
            VisualProps::new().y(50.0).opacity(0.0),
        )
        .duration(1.0)
        .easing(Easing::Power3Out),
        AnimationBinding::from(
            Selector::class("hero-subheading"),
            VisualProps::new().y(30.0).opacity(0.0),
        )
        .duration(1.0)
        .delay(0.5)
        .easing(Easing::Power3Out),
        AnimationBinding::from(
            Selector::class("role-text"),
            VisualProps::new().y(20.0).opacity(0.0),
        )
        .duration(0.8)
        .delay(0.8)
        .easing(Easing::Power3Out),
        AnimationBinding::from_to(
            Selector::class("cta-button"),
            VisualProps::new().opacity(0.0).scale(0.8).y(20.0),
            VisualProps::new().opacity(1.0).scale(1.0).y(0.0),
        )
        .duration(1.0)
        .delay(1.1)
        .easing(Easing::ElasticOut {
            amplitude: 1.0,
            period: 0.8,
        }),
        AnimationBinding::from_to(
            Selector::class("avatar-container"),
            VisualProps::new().opacity(0.0).scale(0.5).rotate(-10.0),
            VisualProps::new().opacity(1.0).scale(1.0).rotate(0.0),
        )
        .duration(1.2)
        .delay(1.3)
        .easing(Easing::Power4Out),
    ];

    let glow = AnimationBinding::from_to(
        Selector::class("avatar-glow"),
        VisualProps::new().opacity(0.3),
        VisualProps::new().opacity(0.5),
    )
    .duration(1.5)
    .easing(Easing::SineInOut)
    .pulse();

    let bob = AnimationBinding::from_to(
        Selector::class("scroll-arrow"),
        VisualProps::new().y(0.0),
        VisualProps::new().y(10.0),
    )
    .duration(1.5)
    .easing(Easing::SineInOut)
    .pulse();

    let arrow = AnimationBinding::from_to(
        Selector::class("scroll-arrow"),
        VisualProps::new().opacity(0.0).y(-20.0),
        VisualProps::new().opacity(1.0).y(0.0),
    )
    .duration(1.0)
    .delay(2.5)
    .easing(Easing::Power2Out)
    .then(bob);

    let mut bindings = intro;
    bindings.push(glow);
    bindings.push(arrow);
    bindings
}

fn about() -> Vec<AnimationBinding> {
    vec![
        parallax("parallax-bg"),
        AnimationBinding::from(
            Selector::class("about-title"),
            VisualProps::new().y(100.0).opacity(0.0),
        )
        .scroll(scrub(80.0, 40.0)),
        AnimationBinding::from(
            Selector::class("about-content"),
            VisualProps::new().y(50.0).opacity(0.0),
        )
        .scroll(scrub(70.0, 50.0)),
        // Cards slide in from alternating sides, each on its own window
        AnimationBinding::from(
            Selector::class("skill-card"),
            PropsSource::Alternating(
                VisualProps::new().x(-100.0).opacity(0.0),
                VisualProps::new().x(100.0).opacity(0.0),
            ),
        )
        .scroll(scrub(80.0, 50.0)),
    ]
}

fn services() -> Vec<AnimationBinding> {
    vec![
        parallax("services-parallax-bg"),
        AnimationBinding::from(
            Selector::class("services-heading"),
            VisualProps::new().opacity(0.0).y(50.0),
        )
        .duration(1.0)
        .easing(Easing::Power3Out)
        .scroll(once(80.0, 50.0))
        .trigger_on(TriggerElement::Root),
        AnimationBinding::from(
            Selector::class("service-card"),
            PropsSource::Alternating(
                VisualProps::new().opacity(0.0).x(-50.0),
                VisualProps::new().opacity(0.0).x(50.0),
            ),
        )
        .duration(0.8)
        .stagger(0.2)
        .easing(Easing::Power3Out)
        .scroll(once(80.0, 50.0))
        .trigger_on(TriggerElement::Selector(Selector::class("services-grid"))),
    ]
}

fn projects() -> Vec<AnimationBinding> {
    vec![
        parallax("parallax-bg"),
        AnimationBinding::from(
            Selector::class("projects-title"),
            VisualProps::new().y(100.0).opacity(0.0),
        )
        .scroll(scrub(80.0, 40.0)),
        AnimationBinding::from(
            Selector::class("projects-container"),
            VisualProps::new().y(200.0).opacity(0.0).scale(0.8),
        )
        .scroll(scrub(70.0, 30.0)),
    ]
}

fn contact() -> Vec<AnimationBinding> {
    vec![
        parallax("contact-parallax-bg"),
        AnimationBinding::from(
            Selector::class("contact-section"),
            VisualProps::new().opacity(0.0).y(50.0),
        )
        .duration(1.0)
        .easing(Easing::Power1Out)
        .scroll(once(80.0, 50.0))
        .trigger_on(TriggerElement::Root),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::AnimationKind;

    #[test]
    fn test_every_section_has_parallax_or_intro() {
        for section in SectionId::ALL {
            assert!(!for_section(section).is_empty(), "{section} has no bindings");
        }
    }

    #[test]
    fn test_kinds_per_section() {
        let kinds = |section| -> Vec<AnimationKind> {
            for_section(section).iter().map(|b| b.kind()).collect()
        };
        assert!(kinds(SectionId::About)
            .iter()
            .all(|k| *k == AnimationKind::Scrubbed));
        assert_eq!(
            kinds(SectionId::Services),
            vec![
                AnimationKind::Scrubbed,
                AnimationKind::Triggered,
                AnimationKind::Triggered
            ]
        );
        assert!(kinds(SectionId::Home).contains(&AnimationKind::Repeating));
    }

    #[test]
    fn test_scroll_arrow_continues_with_bob() {
        let arrow = for_section(SectionId::Home)
            .into_iter()
            .find(|b| b.target == Selector::class("scroll-arrow"))
            .unwrap();
        let bob = arrow.then.unwrap();
        assert_eq!(bob.kind(), AnimationKind::Repeating);
    }

    #[test]
    fn test_checkmark_pops_in_then_out() {
        let bindings = success_checkmark();
        assert_eq!(bindings.len(), 1);
        let show = &bindings[0];
        assert_eq!(show.timing.easing, Easing::BackOut);
        assert_eq!(show.timing.duration, std::time::Duration::from_millis(500));

        let hide = show.then.as_deref().unwrap();
        assert_eq!(hide.timing.delay, std::time::Duration::from_secs(1));
        assert_eq!(hide.to.for_index(0), &VisualProps::new().scale(0.0).opacity(0.0));
    }
}
