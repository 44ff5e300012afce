#![forbid(unsafe_code)]

//! Pointer input delivered by the host.
//!
//! One pointer stream at a time: events carrying a different `pointer_id`
//! than the captured one are ignored until the stream ends.
//!
//! # Design Notes
//!
//! - `x`/`y` are local to the container and drive hit-testing.
//! - `raw_x`/`raw_y` are screen coordinates and drive drag deltas, so a
//!   container that moves under the finger does not distort the gesture.
//! - Release velocity is estimated by the host and attached to `Up`.

use web_time::Instant;

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: u32,
    pub kind: PointerKind,
    /// Container-local position.
    pub x: f32,
    pub y: f32,
    /// Screen position.
    pub raw_x: f32,
    pub raw_y: f32,
    pub time: Instant,
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerKind {
    Down,
    Move,
    /// Pointer lifted, with the host's velocity estimate in px/s.
    Up { velocity_x: f32, velocity_y: f32 },
    /// Stream taken away by the host (treated as a zero-velocity release).
    Cancel,
}

impl PointerEvent {
    /// An event whose local and raw coordinates coincide.
    #[must_use]
    pub fn new(kind: PointerKind, x: f32, y: f32, time: Instant) -> Self {
        Self {
            pointer_id: 0,
            kind,
            x,
            y,
            raw_x: x,
            raw_y: y,
            time,
        }
    }

    #[must_use]
    pub fn down(x: f32, y: f32, time: Instant) -> Self {
        Self::new(PointerKind::Down, x, y, time)
    }

    #[must_use]
    pub fn moved(x: f32, y: f32, time: Instant) -> Self {
        Self::new(PointerKind::Move, x, y, time)
    }

    #[must_use]
    pub fn up(x: f32, y: f32, velocity_x: f32, velocity_y: f32, time: Instant) -> Self {
        Self::new(
            PointerKind::Up {
                velocity_x,
                velocity_y,
            },
            x,
            y,
            time,
        )
    }

    #[must_use]
    pub fn cancel(x: f32, y: f32, time: Instant) -> Self {
        Self::new(PointerKind::Cancel, x, y, time)
    }

    /// Set the pointer id (builder pattern).
    #[must_use]
    pub fn with_pointer(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Set the screen position separately from the local one.
    #[must_use]
    pub fn with_raw(mut self, raw_x: f32, raw_y: f32) -> Self {
        self.raw_x = raw_x;
        self.raw_y = raw_y;
        self
    }

    /// Release velocity, zero for every kind except `Up`.
    #[must_use]
    pub fn velocity(&self) -> (f32, f32) {
        match self.kind {
            PointerKind::Up {
                velocity_x,
                velocity_y,
            } => (velocity_x, velocity_y),
            _ => (0.0, 0.0),
        }
    }

    /// Whether this event ends the stream.
    #[must_use]
    pub const fn is_release(&self) -> bool {
        matches!(self.kind, PointerKind::Up { .. } | PointerKind::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_only_on_up() {
        let now = Instant::now();
        assert_eq!(PointerEvent::up(0.0, 0.0, -300.0, 5.0, now).velocity(), (-300.0, 5.0));
        assert_eq!(PointerEvent::moved(1.0, 1.0, now).velocity(), (0.0, 0.0));
        assert!(PointerEvent::cancel(0.0, 0.0, now).is_release());
        assert!(!PointerEvent::down(0.0, 0.0, now).is_release());
    }

    #[test]
    fn raw_defaults_to_local() {
        let ev = PointerEvent::down(3.0, 4.0, Instant::now()).with_raw(103.0, 204.0);
        assert_eq!((ev.x, ev.y), (3.0, 4.0));
        assert_eq!((ev.raw_x, ev.raw_y), (103.0, 204.0));
    }
}
