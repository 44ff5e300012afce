#![forbid(unsafe_code)]

//! Single-axis settle from the current surface position to an extreme.
//!
//! Wraps a critically damped [`Spring`] and quantises its output to whole
//! pixels clamped between the rest and fully-open positions. The settle is
//! done the first tick its quantised output equals the target, so the
//! terminal lifecycle event fires once and the surface never bounces.

use std::time::Duration;

use super::spring::Spring;
use crate::release::SettleTarget;

/// One quantised settle sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleStep {
    /// Surface coordinate on the edge axis.
    pub position: i32,
    pub done: bool,
}

/// An in-flight settle.
#[derive(Debug, Clone, PartialEq)]
pub struct Settle {
    spring: Spring,
    target: SettleTarget,
    to: i32,
    lo: i32,
    hi: i32,
    last: i32,
}

impl Settle {
    /// Start settling from `from` toward `to`, never leaving `[lo, hi]`.
    ///
    /// `fling` is the release velocity on the edge axis in px/s; it seeds
    /// the spring so a fast flick keeps its momentum.
    #[must_use]
    pub fn new(
        from: i32,
        to: i32,
        bounds: (i32, i32),
        target: SettleTarget,
        stiffness: f64,
        fling: f32,
    ) -> Self {
        let (a, b) = bounds;
        let mut spring = Spring::critical(f64::from(from), f64::from(to), stiffness);
        if fling != 0.0 && from != to {
            spring.impulse(f64::from(fling));
        }
        Self {
            spring,
            target,
            to,
            lo: a.min(b),
            hi: a.max(b),
            last: from,
        }
    }

    #[must_use]
    pub const fn target(&self) -> SettleTarget {
        self.target
    }

    /// Advance by `dt` and return the new quantised position.
    pub fn tick(&mut self, dt: Duration) -> SettleStep {
        self.spring.advance(dt);
        let raw = self.spring.position().round();
        let mut position = (raw as i32).clamp(self.lo, self.hi);
        if self.spring.is_at_rest() || self.overshot(position) {
            position = self.to;
        }
        self.last = position;
        SettleStep {
            position,
            done: position == self.to,
        }
    }

    fn overshot(&self, position: i32) -> bool {
        let start_side = self.last.cmp(&self.to);
        start_side != std::cmp::Ordering::Equal && position.cmp(&self.to) == start_side.reverse()
    }
}
