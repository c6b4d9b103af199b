//! Time-based tweens
//!
//! A tween interpolates between two values over a duration, optionally after
//! a delay, and optionally repeating (with yoyo reversal on odd cycles).
//! Fire-once bindings, repeating decorative loops, and carousel transitions
//! are all tweens over [`VisualProps`](folio_core::VisualProps).

use std::time::Duration;

use crate::easing::Easing;
use crate::values::Interpolate;

/// How many extra cycles a tween plays after the first
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    /// Play `n` additional cycles (`Count(0)` plays once)
    Count(u32),
    /// Loop until released
    Infinite,
}

impl Repeat {
    pub const ONCE: Repeat = Repeat::Count(0);
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::ONCE
    }
}

/// A timed interpolation between two values
#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    duration: Duration,
    delay: Duration,
    easing: Easing,
    repeat: Repeat,
    yoyo: bool,
    elapsed: Duration,
    playing: bool,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(from: T, to: T, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            delay: Duration::ZERO,
            easing: Easing::Linear,
            repeat: Repeat::ONCE,
            yoyo: false,
            elapsed: Duration::ZERO,
            playing: false,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Reverse direction on every other cycle
    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Start (or restart) from the beginning, including the delay
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.playing = true;
    }

    /// Return to the unplayed state
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if a finite tween has played all of its cycles
    pub fn is_finished(&self) -> bool {
        match self.total_active() {
            Some(total) => self.elapsed >= self.delay + total,
            None => false,
        }
    }

    /// Advance by `dt`; returns `true` when this tick completed the tween
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.playing {
            return false;
        }

        self.elapsed += dt;

        if self.is_finished() {
            self.playing = false;
            return true;
        }
        false
    }

    /// Linear progress through the current cycle, after yoyo reversal
    pub fn progress(&self) -> f32 {
        if self.elapsed <= self.delay {
            return 0.0;
        }
        if self.duration.is_zero() {
            return self.final_progress();
        }

        let active = self.elapsed - self.delay;
        let cycle_len = self.duration.as_secs_f64();
        let cycles = active.as_secs_f64() / cycle_len;

        if let Some(total) = self.total_cycles() {
            if cycles >= total as f64 {
                return self.final_progress();
            }
        }

        let cycle = cycles.floor() as u64;
        let within = (cycles - cycles.floor()) as f32;
        if self.yoyo && cycle % 2 == 1 {
            1.0 - within
        } else {
            within
        }
    }

    /// Current interpolated value
    pub fn value(&self) -> T {
        let eased = self.easing.apply(self.progress());
        self.from.lerp(&self.to, eased)
    }

    fn total_cycles(&self) -> Option<u64> {
        match self.repeat {
            Repeat::Count(n) => Some(n as u64 + 1),
            Repeat::Infinite => None,
        }
    }

    fn total_active(&self) -> Option<Duration> {
        let cycles = self.total_cycles()?;
        Some(self.duration * cycles.min(u32::MAX as u64) as u32)
    }

    fn final_progress(&self) -> f32 {
        match self.total_cycles() {
            // An even number of yoyo cycles ends back at the start
            Some(total) if self.yoyo && total % 2 == 0 => 0.0,
            _ => 1.0,
        }
    }
}
