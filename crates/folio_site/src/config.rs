//! Site configuration
//!
//! Loaded from a `folio.toml` file. Every table is optional, so an empty file
//! yields [`SiteConfig::default()`]:
//!
//! ```toml
//! [email]
//! service_id = "service_abc"
//! template_id = "template_xyz"
//! public_key = "pk_123"
//!
//! [navigation]
//! scroll_threshold = 20.0
//! nav_height = 80.0
//!
//! [viewport]
//! width = 1440.0
//! height = 900.0
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use folio_core::Viewport;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Top-level site configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub email: EmailConfig,
    pub navigation: NavigationConfig,
    pub contact: ContactConfig,
    pub carousel: CarouselConfig,
    pub viewport: ViewportConfig,
}

impl SiteConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded site config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// EmailJS delivery settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub endpoint: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            service_id: "YOUR_SERVICE_ID".to_string(),
            template_id: "YOUR_TEMPLATE_ID".to_string(),
            public_key: "YOUR_PUBLIC_KEY".to_string(),
            endpoint: DEFAULT_EMAILJS_ENDPOINT.to_string(),
        }
    }
}

/// Navigation bar settings
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Scroll offset past which the bar switches to its scrolled style
    pub scroll_threshold: f32,
    /// Height of the fixed bar; anchor targets land just below it
    pub nav_height: f32,
    /// Distance below the scroll position used to pick the active section
    pub active_probe_offset: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 20.0,
            nav_height: 80.0,
            active_probe_offset: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactConfig {
    pub success_display_ms: u64,
}

impl ContactConfig {
    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            success_display_ms: 2000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub transition_ms: u64,
}

impl CarouselConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { transition_ms: 800 }
    }
}

/// Size of the headless viewport
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl ViewportConfig {
    pub fn to_viewport(self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.email.endpoint, DEFAULT_EMAILJS_ENDPOINT);
        assert_eq!(config.contact.success_display(), Duration::from_secs(2));
        assert_eq!(config.carousel.transition(), Duration::from_millis(800));
    }

    #[test]
    fn test_partial_tables_keep_defaults() {
        let config = SiteConfig::from_toml_str(
            r#"
            [email]
            service_id = "service_abc"

            [navigation]
            nav_height = 64.0
            "#,
        )
        .unwrap();
        assert_eq!(config.email.service_id, "service_abc");
        assert_eq!(config.email.template_id, "YOUR_TEMPLATE_ID");
        assert_eq!(config.navigation.nav_height, 64.0);
        assert_eq!(config.navigation.scroll_threshold, 20.0);
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        assert!(matches!(
            SiteConfig::from_toml_str("[navigation]\nnav_height = \"tall\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            SiteConfig::load("/definitely/not/here/folio.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
