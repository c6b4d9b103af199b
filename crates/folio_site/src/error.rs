//! Error types for folio_site

use std::path::PathBuf;

use folio_animation::AnimationError;
use thiserror::Error;

use crate::section::SectionId;

/// Errors raised while loading [`SiteConfig`](crate::SiteConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised when constructing a carousel
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselError {
    #[error("a carousel needs at least one item")]
    Empty,
}

/// Errors that can occur while composing or driving the page
#[derive(Error, Debug)]
pub enum SiteError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error(transparent)]
    Carousel(#[from] CarouselError),

    /// A section root is missing from the element tree
    #[error("section `{0}` is not part of the page")]
    MissingSection(SectionId),
}

/// Result type for folio_site operations
pub type Result<T> = std::result::Result<T, SiteError>;
