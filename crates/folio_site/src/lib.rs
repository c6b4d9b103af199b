//! Folio Site
//!
//! The single-page portfolio built on `folio_core` and `folio_animation`.
//!
//! # Features
//!
//! - **Section Choreography**: Per-section animation bindings mounted as scopes
//! - **Project Carousel**: Wrapping, transition-gated carousel with mirrored poses
//! - **Contact Form**: Validation, single-flight delivery, and a timed success indicator
//! - **Navigation**: Scrolled state, active-section tracking, and smooth scrolling
//! - **Page Composition**: Builds the element tree and routes scroll and time events

pub mod carousel;
pub mod choreography;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod navigation;
pub mod page;
pub mod particles;
pub mod section;

pub use carousel::{CarouselController, CarouselPhase, CarouselState, Direction};
pub use config::{
    CarouselConfig, ContactConfig, EmailConfig, NavigationConfig, SiteConfig, ViewportConfig,
};
pub use contact::{
    ContactFormController, DeliveryError, DeliveryRequest, EmailJsTransport, EmailTransport, Field,
    FieldError, FieldErrors, Submission, SubmitRejected,
};
pub use error::{CarouselError, ConfigError, Result, SiteError};
pub use navigation::{NavState, NavigationController, ScrollRequest, SmoothScroll};
pub use page::{Page, PageSnapshot};
pub use particles::{ParticleBackdrop, ParticleConfig};
pub use section::{SectionAnimationController, SectionId};
