//! Folio Animation System
//!
//! Scroll-linked and time-based animation of element visual properties.
//!
//! # Features
//!
//! - **Declarative Bindings**: `AnimationBinding` value objects describe what to animate
//! - **Scroll Triggers**: Windows like "top 80%" to "top 40%", scrubbed or fire-once
//! - **Tweens**: Timed interpolation with delay, repeat, and yoyo
//! - **Spring Physics**: RK4-integrated springs for smooth scrolling
//! - **Scoped Ownership**: `AnimationScope` releases every registration on dispose or drop

pub mod binding;
pub mod easing;
pub mod error;
pub mod scheduler;
pub mod scope;
pub mod spring;
pub mod trigger;
pub mod tween;
pub mod values;

pub use binding::{Activation, AnimationBinding, PropsSource, Timing, TriggerElement};
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use scheduler::{AnimationKind, AnimationScheduler, RegistrationId, SchedulerHandle};
pub use scope::AnimationScope;
pub use spring::{Spring, SpringConfig};
pub use trigger::{Anchor, ScrollTrigger, ScrollWindow, TriggerMode};
pub use tween::{Repeat, Tween};
pub use values::Interpolate;
