#![forbid(unsafe_code)]

//! Lifecycle event sequencing.
//!
//! One position change of the surface produces, in order: an optional
//! `StartOpen`/`StartClose` (first change of a cycle only), an `Update`
//! with the offset from rest, and a terminal `Open`/`Close` when the status
//! reached one. The counter resets on every terminal status so the next
//! cycle starts fresh.

use crate::edge::DragEdge;
use crate::geometry::Status;
use crate::swipe_event::SwipeEvent;
use crate::trace;

/// Position-change event counter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleDispatcher {
    counter: u32,
}

impl LifecycleDispatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Position changes seen in the current cycle.
    #[must_use]
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Forget the current cycle without emitting anything.
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Record one position change.
    ///
    /// `offset` is the surface offset from rest, `delta` the movement that
    /// produced it (its sign on the edge axis picks start-open vs
    /// start-close). Returns `true` when the panel just reached `Open`.
    pub fn dispatch(
        &mut self,
        edge: DragEdge,
        status: Status,
        offset: (i32, i32),
        delta: (i32, i32),
        out: &mut Vec<SwipeEvent>,
    ) -> bool {
        self.counter += 1;
        if self.counter == 1 {
            if edge.is_opening(delta.0, delta.1) {
                out.push(SwipeEvent::StartOpen);
            } else {
                out.push(SwipeEvent::StartClose);
            }
        }
        out.push(SwipeEvent::Update {
            left: offset.0,
            top: offset.1,
        });
        match status {
            Status::Close => {
                trace!(edge = ?edge, "panel closed");
                out.push(SwipeEvent::Close);
                self.counter = 0;
                false
            }
            Status::Open => {
                trace!(edge = ?edge, "panel opened");
                out.push(SwipeEvent::Open);
                self.counter = 0;
                true
            }
            Status::Middle => false,
        }
    }
}
