//! Visual properties
//!
//! The small set of inline style properties the page animates. Values are
//! plain `f32`s in the unit the property implies (pixels, degrees, percent).

use indexmap::IndexMap;

/// An animatable visual property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// 0.0 (transparent) to 1.0 (opaque)
    Opacity,
    /// Horizontal offset in pixels
    TranslateX,
    /// Vertical offset in pixels
    TranslateY,
    /// Vertical offset as a percentage of the element's own height
    YPercent,
    /// Uniform scale factor
    Scale,
    /// Z rotation in degrees
    Rotate,
    /// Blur radius in pixels
    Blur,
}

impl Property {
    /// The resting value of this property on an unstyled element
    pub fn identity(self) -> f32 {
        match self {
            Property::Opacity | Property::Scale => 1.0,
            Property::TranslateX
            | Property::TranslateY
            | Property::YPercent
            | Property::Rotate
            | Property::Blur => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::TranslateX => "x",
            Property::TranslateY => "y",
            Property::YPercent => "yPercent",
            Property::Scale => "scale",
            Property::Rotate => "rotate",
            Property::Blur => "blur",
        }
    }
}

/// An ordered mapping of properties to values
///
/// Insertion order is preserved so that applying a set of props and printing
/// it are both deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualProps {
    values: IndexMap<Property, f32>,
}

impl VisualProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a property
    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.values.insert(property, value);
        self
    }

    pub fn opacity(self, value: f32) -> Self {
        self.with(Property::Opacity, value)
    }

    pub fn x(self, value: f32) -> Self {
        self.with(Property::TranslateX, value)
    }

    pub fn y(self, value: f32) -> Self {
        self.with(Property::TranslateY, value)
    }

    pub fn y_percent(self, value: f32) -> Self {
        self.with(Property::YPercent, value)
    }

    pub fn scale(self, value: f32) -> Self {
        self.with(Property::Scale, value)
    }

    pub fn rotate(self, value: f32) -> Self {
        self.with(Property::Rotate, value)
    }

    pub fn blur(self, value: f32) -> Self {
        self.with(Property::Blur, value)
    }

    /// Resting values for the same set of properties
    pub fn identity_of(&self) -> Self {
        Self {
            values: self.values.keys().map(|p| (*p, p.identity())).collect(),
        }
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        self.values.get(&property).copied()
    }

    /// The value of `property`, falling back to its identity
    pub fn resolved(&self, property: Property) -> f32 {
        self.get(property).unwrap_or_else(|| property.identity())
    }

    pub fn set(&mut self, property: Property, value: f32) {
        self.values.insert(property, value);
    }

    /// Overwrite every property present in `other`
    pub fn merge(&mut self, other: &VisualProps) {
        for (property, value) in other.iter() {
            self.values.insert(property, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        self.values.iter().map(|(p, v)| (*p, *v))
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Display for VisualProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (property, value) in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}={:.3}", property.name(), value)?;
            first = false;
        }
        Ok(())
    }
}
