//! Easing curves
//!
//! Maps linear progress `t` in `[0, 1]` onto eased progress. Every curve is
//! pinned so that `apply(0.0) == 0.0` and `apply(1.0) == 1.0` exactly.

use std::f32::consts::PI;

/// An easing curve
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// No easing (`ease: "none"`), used by every scrubbed binding
    #[default]
    Linear,
    Power1In,
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
    Power4In,
    Power4Out,
    Power4InOut,
    SineInOut,
    /// Overshoots the target slightly before settling
    BackOut,
    /// Oscillates around the target with decaying amplitude
    ElasticOut { amplitude: f32, period: f32 },
}

impl Easing {
    /// The default elastic curve (`elastic.out(1, 0.3)`)
    pub fn elastic_out() -> Self {
        Easing::ElasticOut {
            amplitude: 1.0,
            period: 0.3,
        }
    }

    pub fn apply(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Easing::Linear => t,
            Easing::Power1In => power_in(t, 2),
            Easing::Power1Out => power_out(t, 2),
            Easing::Power1InOut => power_in_out(t, 2),
            Easing::Power2In => power_in(t, 3),
            Easing::Power2Out => power_out(t, 3),
            Easing::Power2InOut => power_in_out(t, 3),
            Easing::Power3In => power_in(t, 4),
            Easing::Power3Out => power_out(t, 4),
            Easing::Power3InOut => power_in_out(t, 4),
            Easing::Power4In => power_in(t, 5),
            Easing::Power4Out => power_out(t, 5),
            Easing::Power4InOut => power_in_out(t, 5),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                let u = t - 1.0;
                1.0 + C3 * u * u * u + C1 * u * u
            }
            Easing::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }
}

fn power_in(t: f32, exp: i32) -> f32 {
    t.powi(exp)
}

fn power_out(t: f32, exp: i32) -> f32 {
    1.0 - (1.0 - t).powi(exp)
}

fn power_in_out(t: f32, exp: i32) -> f32 {
    if t < 0.5 {
        (2.0 * t).powi(exp) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
    }
}

fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    let amplitude = amplitude.max(1.0);
    let period = if period > 0.0 { period } else { 0.3 };
    let phase = period / (2.0 * PI) * (1.0 / amplitude).asin();
    amplitude * 2f32.powf(-10.0 * t) * ((t - phase) * (2.0 * PI / period)).sin() + 1.0
}
