//! Scroll triggers
//!
//! A trigger window is described by two anchors, each pairing a point on the
//! trigger element with a point on the viewport: `"top 80%"` means "when the
//! element's top edge reaches 80% of the way down the viewport". Resolving
//! the anchors against the element's document rect yields the scroll offsets
//! at which the window opens and closes.

use folio_core::Rect;

use crate::error::{AnimationError, Result};

/// A point on the trigger element matched to a point on the viewport
///
/// Both fields are fractions: `0.0` is the top edge, `1.0` the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub element: f32,
    pub viewport: f32,
}

impl Anchor {
    /// `"top bottom"`: the element's top enters at the viewport's bottom
    pub const TOP_BOTTOM: Anchor = Anchor::new(0.0, 1.0);
    /// `"bottom top"`: the element's bottom leaves at the viewport's top
    pub const BOTTOM_TOP: Anchor = Anchor::new(1.0, 0.0);

    pub const fn new(element: f32, viewport: f32) -> Self {
        Self { element, viewport }
    }

    /// The element's top edge at `viewport_percent` of the viewport height
    pub fn top(viewport_percent: f32) -> Self {
        Self::new(0.0, viewport_percent / 100.0)
    }

    /// Parse `"<element> <viewport>"` where each side is `top`, `center`,
    /// `bottom`, or a percentage like `80%`
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.split_whitespace();
        let element = parse_edge(parts.next()?)?;
        let viewport = parse_edge(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(element, viewport))
    }

    /// The scroll offset at which this anchor is satisfied
    pub fn scroll_offset(&self, rect: Rect, viewport_height: f32) -> f32 {
        rect.y_at(self.element) - viewport_height * self.viewport
    }
}

fn parse_edge(word: &str) -> Option<f32> {
    match word {
        "top" => Some(0.0),
        "center" => Some(0.5),
        "bottom" => Some(1.0),
        _ => {
            let percent: f32 = word.strip_suffix('%')?.parse().ok()?;
            Some(percent / 100.0)
        }
    }
}

/// How a binding reacts to its trigger window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerMode {
    /// Progress tracks the scroll fraction directly
    #[default]
    Scrub,
    /// Plays once when the window opens, then ignores scrolling
    Once,
    /// Like `Once`, but re-arms (and resets) when scrolled back above the start
    Replay,
}

/// A scroll-linked trigger window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTrigger {
    pub start: Anchor,
    pub end: Anchor,
    pub mode: TriggerMode,
}

impl ScrollTrigger {
    pub fn new(start: Anchor, end: Anchor, mode: TriggerMode) -> Self {
        Self { start, end, mode }
    }

    pub fn scrub(start: Anchor, end: Anchor) -> Self {
        Self::new(start, end, TriggerMode::Scrub)
    }

    pub fn once(start: Anchor, end: Anchor) -> Self {
        Self::new(start, end, TriggerMode::Once)
    }

    /// Scrub across the whole time the element is on screen
    pub fn full_pass() -> Self {
        Self::scrub(Anchor::TOP_BOTTOM, Anchor::BOTTOM_TOP)
    }

    /// Resolve against the trigger element's rect
    ///
    /// Fails if the window would open at or after the offset where it closes.
    pub fn resolve(&self, rect: Rect, viewport_height: f32) -> Result<ScrollWindow> {
        let start = self.start.scroll_offset(rect, viewport_height);
        let end = self.end.scroll_offset(rect, viewport_height);
        if start < end {
            Ok(ScrollWindow { start, end })
        } else {
            Err(AnimationError::InvalidTrigger { start, end })
        }
    }
}

/// Resolved scroll offsets of a trigger window; `start < end` always holds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollWindow {
    start: f32,
    end: f32,
}

impl ScrollWindow {
    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    /// Normalised position of `scroll_y` in the window, clamped to `[0, 1]`
    pub fn fraction(&self, scroll_y: f32) -> f32 {
        ((scroll_y - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    /// Check if the window has been reached
    pub fn has_started(&self, scroll_y: f32) -> bool {
        scroll_y >= self.start
    }
}
