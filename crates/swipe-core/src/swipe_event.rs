#![forbid(unsafe_code)]

//! Events emitted by a swipe panel.
//!
//! [`SwipeEvent`] collapses the lifecycle, reveal and tap notifications of a
//! panel into one ordered stream. Every call into the layout that can change
//! state returns the events it produced, in the order they happened.
//!
//! # Design
//!
//! ## Invariants
//! 1. Every open or close cycle is well-formed: at most one `StartOpen` or
//!    `StartClose`, then one or more `Update`, then exactly one `Open` or
//!    `Close` once the terminal status is reached.
//! 2. `HandRelease` is emitted once per captured pointer release, whatever
//!    the status.
//! 3. `Reveal::fraction` is always within `[0.0, 1.0]`.
//!
//! ## Failure Modes
//! - A settle interrupted by a new pointer-down emits no terminal event; the
//!   cycle continues with the resumed drag and terminates when it does.
//! - Non-notifying programmatic opens and closes emit nothing at all.

use crate::edge::DragEdge;
use crate::tree::ChildId;

/// Handle returned when a reveal listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// A notification from a swipe panel.
#[derive(Debug, Clone, PartialEq)]
pub enum SwipeEvent {
    /// The surface started moving toward open.
    StartOpen,
    /// The surface started moving toward closed.
    StartClose,
    /// The surface moved; offsets are relative to its resting position.
    Update { left: i32, top: i32 },
    /// The panel reached fully open.
    Open,
    /// The panel reached fully closed.
    Close,
    /// The captured pointer was released with this velocity (px/s).
    HandRelease { velocity_x: f32, velocity_y: f32 },
    /// A registered child is being revealed.
    Reveal {
        listener: ListenerId,
        child: ChildId,
        edge: DragEdge,
        /// Revealed share of the child along the edge axis.
        fraction: f32,
        /// Signed pixel gap between the reveal boundary and the child edge.
        distance: i32,
    },
    /// Two taps landed within the multi-tap window.
    DoubleTap { on_surface: bool },
}

impl SwipeEvent {
    /// Whether this event ends an open or close cycle.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Open | Self::Close)
    }

    /// Whether this event starts an open or close cycle.
    #[must_use]
    pub const fn is_start(&self) -> bool {
        matches!(self, Self::StartOpen | Self::StartClose)
    }
}
