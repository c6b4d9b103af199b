//! Error types for folio_animation

use thiserror::Error;

/// Errors raised while resolving or registering animations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A trigger window that opens at or after the offset where it closes
    #[error("trigger window must start before it ends (start {start}, end {end})")]
    InvalidTrigger { start: f32, end: f32 },

    /// The scheduler behind a handle has been dropped
    #[error("animation scheduler has been dropped")]
    SchedulerDropped,
}

/// Result type for folio_animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
