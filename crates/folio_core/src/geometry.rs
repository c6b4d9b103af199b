//! Document-space geometry
//!
//! All rects are expressed in document coordinates (y grows downward from the
//! top of the page), so they stay valid regardless of the current scroll.

/// An axis-aligned rectangle in document coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Check if a document-space y coordinate falls inside `[top, bottom)`
    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom()
    }

    /// The document y coordinate at `fraction` of this rect's height
    ///
    /// `0.0` is the top edge, `1.0` the bottom edge.
    pub fn y_at(&self, fraction: f32) -> f32 {
        self.top + self.height * fraction
    }
}

/// The visible window onto the document
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Current vertical scroll offset
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Copy of this viewport scrolled to `scroll_y`
    pub fn scrolled_to(self, scroll_y: f32) -> Self {
        Self { scroll_y, ..self }
    }

    /// Translate a document-space y coordinate into viewport space
    pub fn to_viewport_y(&self, document_y: f32) -> f32 {
        document_y - self.scroll_y
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}
