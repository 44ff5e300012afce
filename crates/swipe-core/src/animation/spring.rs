#![forbid(unsafe_code)]

//! Damped spring in pixel space.
//!
//! Classical damped oscillator:
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! integrated with semi-implicit Euler. Positions and velocities are in
//! pixels and pixels per second.
//!
//! # Invariants
//!
//! 1. Stiffness is always positive (clamped on construction).
//! 2. [`Spring::critical`] damping is `2√k`, the fastest convergence without
//!    oscillation.
//! 3. A spring at rest stays at rest until [`Spring::impulse`] is called.
//!
//! # Failure Modes
//!
//! - Large `dt` is split into 4ms sub-steps, so a stalled frame cannot blow
//!   up the integration.

use std::time::Duration;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta (px) below which the spring may rest.
const REST_THRESHOLD: f64 = 0.01;

/// Velocity (px/s) below which the spring may rest.
const VELOCITY_THRESHOLD: f64 = 0.1;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    at_rest: bool,
}

impl Spring {
    /// A critically damped spring from `from` to `to`.
    #[must_use]
    pub fn critical(from: f64, to: f64, stiffness: f64) -> Self {
        let stiffness = stiffness.max(MIN_STIFFNESS);
        Self {
            position: from,
            velocity: 0.0,
            target: to,
            stiffness,
            damping: 2.0 * stiffness.sqrt(),
            at_rest: (from - to).abs() < REST_THRESHOLD,
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Add to velocity. Wakes the spring.
    pub fn impulse(&mut self, velocity_delta: f64) {
        self.velocity += velocity_delta;
        self.at_rest = false;
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`, subdividing into 4ms steps.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }
        if (self.position - self.target).abs() < REST_THRESHOLD
            && self.velocity.abs() < VELOCITY_THRESHOLD
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}
