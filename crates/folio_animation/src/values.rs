//! Animatable value types
//!
//! Linear interpolation for scalars and for whole [`VisualProps`] maps.

use folio_core::VisualProps;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// VisualProps Implementation
// ============================================================================

impl Interpolate for VisualProps {
    /// Interpolate every property present on either side
    ///
    /// A property missing on one side is read as its identity value. The result
    /// is a pure function of `(self, other, t)`, which is what makes scrubbed
    /// bindings exactly reversible.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let mut out = VisualProps::new();
        for property in self.properties().chain(other.properties()) {
            if out.get(property).is_some() {
                continue;
            }
            let a = self.resolved(property);
            let b = other.resolved(property);
            out.set(property, a.lerp(&b, t));
        }
        out
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.properties()
            .chain(other.properties())
            .all(|p| self.resolved(p).approx_eq(&other.resolved(p), epsilon))
    }
}
