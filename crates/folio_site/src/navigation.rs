//! Navigation bar state
//!
//! Tracks whether the page has scrolled past the threshold, which section is
//! currently active, and the mobile menu. Clicking a link produces a
//! [`ScrollRequest`]; the page plays it back through a [`SmoothScroll`].

use std::time::Duration;

use folio_animation::{Spring, SpringConfig};
use folio_core::{Rect, Viewport};
use serde::Serialize;

use crate::config::NavigationConfig;
use crate::section::SectionId;

/// Navigation state derived from scroll position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NavState {
    pub scrolled: bool,
    pub active_section: SectionId,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            scrolled: false,
            active_section: SectionId::Home,
        }
    }
}

/// A request to scroll the document to `target`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    pub section: SectionId,
    pub target: f32,
}

#[derive(Debug)]
pub struct NavigationController {
    config: NavigationConfig,
    /// Section rects in document order
    sections: Vec<(SectionId, Rect)>,
    state: NavState,
    menu_open: bool,
}

impl NavigationController {
    pub fn new(config: NavigationConfig, sections: Vec<(SectionId, Rect)>) -> Self {
        Self {
            config,
            sections,
            state: NavState::default(),
            menu_open: false,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_scrolled(&self) -> bool {
        self.state.scrolled
    }

    pub fn active_section(&self) -> SectionId {
        self.state.active_section
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Replace the section rects (after a relayout)
    pub fn set_sections(&mut self, sections: Vec<(SectionId, Rect)>) {
        self.sections = sections;
    }

    /// Recompute state for a new scroll position
    ///
    /// Every section is tested in document order against the probe point
    /// `scroll_y + active_probe_offset`; the last match wins. With no match
    /// the previous active section is kept.
    pub fn on_scroll(&mut self, scroll_y: f32) -> NavState {
        self.state.scrolled = scroll_y > self.config.scroll_threshold;

        let probe = scroll_y + self.config.active_probe_offset;
        for (section, rect) in &self.sections {
            if rect.contains_y(probe) {
                self.state.active_section = *section;
            }
        }
        self.state
    }

    /// Handle a click on the link for `section`
    ///
    /// The target lands the section just below the fixed bar. The active
    /// section is set right away, before any scroll event confirms it. The
    /// mobile menu always closes, even for an unknown section.
    pub fn navigate_to(
        &mut self,
        section: SectionId,
        viewport: &Viewport,
    ) -> Option<ScrollRequest> {
        self.menu_open = false;

        let (_, rect) = self.sections.iter().find(|(id, _)| *id == section)?;
        let element_top = viewport.to_viewport_y(rect.top);
        let target = (element_top + viewport.scroll_y - self.config.nav_height).max(0.0);

        self.state.active_section = section;
        tracing::debug!(%section, target, "navigate");
        Some(ScrollRequest { section, target })
    }

    /// [`navigate_to`](Self::navigate_to) by anchor (`"#about"` or `"about"`)
    pub fn navigate_to_anchor(
        &mut self,
        anchor: &str,
        viewport: &Viewport,
    ) -> Option<ScrollRequest> {
        match SectionId::from_anchor(anchor) {
            Some(section) => self.navigate_to(section, viewport),
            None => {
                self.menu_open = false;
                tracing::debug!(anchor, "navigate to unknown anchor");
                None
            }
        }
    }
}

/// Spring-driven scroll toward a target offset
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    spring: Spring,
}

impl SmoothScroll {
    pub fn new(from: f32, to: f32) -> Self {
        Self::with_config(SpringConfig::smooth_scroll(), from, to)
    }

    pub fn with_config(config: SpringConfig, from: f32, to: f32) -> Self {
        let mut spring = Spring::new(config, from);
        spring.set_target(to);
        Self { spring }
    }

    pub fn position(&self) -> f32 {
        self.spring.value()
    }

    pub fn target(&self) -> f32 {
        self.spring.target()
    }

    pub fn is_settled(&self) -> bool {
        self.spring.is_settled()
    }

    /// Step and return the new scroll position
    pub fn step(&mut self, dt: Duration) -> f32 {
        self.spring.step(dt.as_secs_f32());
        self.spring.value()
    }
}
