#![forbid(unsafe_code)]

//! Drag classification and tap tracking.
//!
//! The pieces of the drag controller that do not touch layout state:
//! choosing an edge from the first movement, deciding whether that movement
//! is a swipe at all, and the tap/double-tap/long-press detector that runs
//! alongside.
//!
//! # State Machine
//!
//! ```text
//! Idle ──down──▶ Classifying ──move (accepted)──▶ Dragging ──up──▶ Settling ──done──▶ Idle
//!                 │  ▲                               ▲                 │
//!                 │  └──move (rejected)              └──down (Middle)──┘
//!                 └──up──▶ Idle (tap)
//! ```
//!
//! A pointer-down on a half-open panel skips classification: the stream
//! resumes dragging toward the edge already locked.
//!
//! # Invariants
//!
//! 1. The edge is only re-chosen while the panel is closed.
//! 2. Horizontal edges accept angles up to 30°, vertical edges from 60°; the
//!    45° split between the two candidate families favours horizontal.
//! 3. A tap and a drag never both complete for the same down → up stream.

use std::time::Duration;

use web_time::Instant;

use crate::edge::{Axis, DragEdge};
use crate::geometry::Status;

/// Drag controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Classifying,
    Dragging,
    Settling,
}

/// Which view the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapturedView {
    Surface,
    Panel,
}

/// Per-gesture state, dropped when the stream ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeSession {
    pub pointer_id: u32,
    /// Raw position at pointer-down.
    pub start: (f32, f32),
    /// Raw position already applied to the surface.
    pub last: (f32, f32),
    pub captured: CapturedView,
    /// Status was `Close` when the stream began.
    pub was_closed: bool,
}

impl SwipeSession {
    /// Accumulated raw movement since pointer-down.
    #[must_use]
    pub fn total_delta(&self, raw: (f32, f32)) -> (f32, f32) {
        (raw.0 - self.start.0, raw.1 - self.start.1)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Angle of the movement from horizontal, in degrees within `[0, 90]`.
///
/// Returns `None` while there is no movement.
#[must_use]
pub fn drag_angle(dx: f32, dy: f32) -> Option<f32> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    Some((dy / dx).abs().atan().to_degrees())
}

/// Candidate edge for a movement out of `Close`.
///
/// Below 45° the horizontal pair is considered, otherwise the vertical
/// pair; `available` reports whether an edge is registered and enabled.
#[must_use]
pub fn candidate_edge(
    dx: f32,
    dy: f32,
    angle: f32,
    available: impl Fn(DragEdge) -> bool,
) -> Option<DragEdge> {
    let edge = if angle < 45.0 {
        if dx > 0.0 {
            DragEdge::Left
        } else if dx < 0.0 {
            DragEdge::Right
        } else {
            return None;
        }
    } else if dy > 0.0 {
        DragEdge::Top
    } else if dy < 0.0 {
        DragEdge::Bottom
    } else {
        return None;
    };
    available(edge).then_some(edge)
}

/// Angle band plus direction test for `edge` given the current status.
///
/// From `Close` the movement must open the edge by more than `slop`; from
/// `Open` it must close it by more than `slop`; `Middle` always passes the
/// direction test.
#[must_use]
pub fn is_suitable(edge: DragEdge, status: Status, dx: f32, dy: f32, angle: f32, slop: f32) -> bool {
    let (along, in_band) = match edge.axis() {
        Axis::Horizontal => (dx, angle <= 30.0),
        Axis::Vertical => (dy, angle >= 60.0),
    };
    if !in_band {
        return false;
    }
    let opening = along * edge.sign() as f32;
    match status {
        Status::Middle => true,
        Status::Close => opening > slop,
        Status::Open => opening < -slop,
    }
}

// ---------------------------------------------------------------------------
// Taps
// ---------------------------------------------------------------------------

/// What a pointer-up without a drag amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapOutcome {
    pub double: bool,
}

#[derive(Debug, Clone, Copy)]
struct TapState {
    pos: (f32, f32),
    time: Instant,
}

/// Tap, double-tap and long-press detection.
#[derive(Debug, Clone)]
pub struct TapTracker {
    multi_tap_timeout: Duration,
    long_press_threshold: Duration,
    tolerance: f32,
    down: Option<TapState>,
    last_tap: Option<TapState>,
    long_press_armed: bool,
    long_press_fired: bool,
}

impl TapTracker {
    #[must_use]
    pub fn new(multi_tap_timeout: Duration, long_press_threshold: Duration, tolerance: f32) -> Self {
        Self {
            multi_tap_timeout,
            long_press_threshold,
            tolerance,
            down: None,
            last_tap: None,
            long_press_armed: false,
            long_press_fired: false,
        }
    }

    /// A new stream started. Long presses are only armed on closed panels.
    pub fn on_down(&mut self, pos: (f32, f32), time: Instant, arm_long_press: bool) {
        self.down = Some(TapState { pos, time });
        self.long_press_armed = arm_long_press;
        self.long_press_fired = false;
    }

    /// Movement beyond the tolerance turns the stream into a non-tap.
    pub fn on_move(&mut self, pos: (f32, f32)) {
        if let Some(down) = self.down
            && manhattan(down.pos, pos) > self.tolerance
        {
            self.cancel();
        }
    }

    /// The stream became a drag.
    pub fn cancel(&mut self) {
        self.down = None;
        self.long_press_armed = false;
    }

    /// Pointer lifted. Returns `None` if the stream was not a tap or a long
    /// press already consumed it.
    pub fn on_up(&mut self, pos: (f32, f32), time: Instant) -> Option<TapOutcome> {
        let down = self.down.take();
        self.long_press_armed = false;
        if self.long_press_fired {
            self.long_press_fired = false;
            return None;
        }
        down?;
        let double = self.last_tap.is_some_and(|last| {
            manhattan(last.pos, pos) <= self.tolerance
                && time.duration_since(last.time) <= self.multi_tap_timeout
        });
        self.last_tap = if double {
            None
        } else {
            Some(TapState { pos, time })
        };
        Some(TapOutcome { double })
    }

    /// Whether the held pointer just crossed the long-press threshold.
    /// Fires at most once per stream.
    pub fn check_long_press(&mut self, now: Instant) -> bool {
        if !self.long_press_armed || self.long_press_fired {
            return false;
        }
        match self.down {
            Some(down) if now.duration_since(down.time) >= self.long_press_threshold => {
                self.long_press_fired = true;
                true
            }
            _ => false,
        }
    }
}

fn manhattan(a: (f32, f32), b: (f32, f32)) -> f32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}
