//! Spring physics animation
//!
//! RK4-integrated spring used to animate smooth scrolling toward an anchor.

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Critically damped scroll spring: no overshoot past the anchor
    pub fn smooth_scroll() -> Self {
        let stiffness = 170.0;
        let mass = 1.0;
        Self {
            stiffness,
            damping: 2.0 * (stiffness * mass).sqrt(),
            mass,
        }
    }

    /// A gentle, slow spring
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Check if the spring will oscillate around its target
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping() - 0.01
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::smooth_scroll()
    }
}

/// A spring-based animator for a single scalar
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Within half a pixel and under 5px/s is imperceptible for scrolling
    const EPSILON: f32 = 0.5;
    const VELOCITY_EPSILON: f32 = 5.0;
    /// Longest single integration step, in seconds
    pub const MAX_STEP: f32 = 1.0 / 60.0;

    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget the spring, keeping its current velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < Self::EPSILON
            && self.velocity.abs() < Self::VELOCITY_EPSILON
    }

    /// Advance the simulation by `dt` seconds; snaps onto the target once settled
    ///
    /// Long frames are integrated in sub-steps of at most [`Self::MAX_STEP`]
    /// so a stalled frame cannot push RK4 out of its stable range.
    pub fn step(&mut self, dt: f32) {
        let mut remaining = dt.max(0.0);
        loop {
            if self.is_settled() {
                self.value = self.target;
                self.velocity = 0.0;
                return;
            }
            if remaining <= 0.0 {
                return;
            }
            let h = remaining.min(Self::MAX_STEP);
            self.integrate(h);
            remaining -= h;
        }
    }

    fn integrate(&mut self, dt: f32) {
        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}
