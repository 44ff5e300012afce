#![forbid(unsafe_code)]

//! Reveal dispatch: how much of each registered child is exposed.
//!
//! Every position change of the surface is mapped, per registered child, to
//! a signed pixel `distance` and a `fraction` in `[0, 1]` of the child's
//! extent along the active edge axis.
//!
//! # Invariants
//!
//! - A child reports a fraction only while it is inside the showing window
//!   for the active edge and show mode.
//! - The show-entirely latch fires one synthetic `fraction == 1.0` event per
//!   reveal cycle. It is cleared when the child re-enters the showing
//!   window, never on close.
//! - Children with zero extent along the edge axis are skipped.
//!
//! # Failure Modes
//!
//! - A child that no longer resolves in the view tree is skipped silently;
//!   the binding stays so it resumes once the child is back.

use crate::edge::{DragEdge, ShowMode};
use crate::geometry::Rect;
use crate::swipe_event::{ListenerId, SwipeEvent};
use crate::tree::ChildId;

/// Listeners attached to one child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealBinding {
    pub child: ChildId,
    pub listeners: Vec<ListenerId>,
    /// Latch: true once the child was reported fully shown.
    pub shown_entirely: bool,
}

/// Everything the predicates read about the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealFrame {
    pub edge: DragEdge,
    pub show_mode: ShowMode,
    /// Container content box.
    pub content: Rect,
    /// Current surface rectangle.
    pub surface: Rect,
}

impl RevealFrame {
    /// Whether `child` is partially inside the showing window.
    #[must_use]
    pub fn is_showing(&self, child: Rect) -> bool {
        let s = self.surface;
        let c = self.content;
        match (self.show_mode, self.edge) {
            (ShowMode::LayDown, DragEdge::Right) => {
                s.right() > child.left() && s.right() <= child.right()
            }
            (ShowMode::LayDown, DragEdge::Left) => {
                s.left() < child.right() && s.left() >= child.left()
            }
            (ShowMode::LayDown, DragEdge::Top) => {
                s.top() >= child.top() && s.top() < child.bottom()
            }
            (ShowMode::LayDown, DragEdge::Bottom) => {
                s.bottom() > child.top() && s.bottom() <= child.bottom()
            }
            (ShowMode::PullOut, DragEdge::Right) => {
                child.left() <= c.right() && child.right() > c.right()
            }
            (ShowMode::PullOut, DragEdge::Left) => {
                child.right() >= c.left() && child.left() < c.left()
            }
            (ShowMode::PullOut, DragEdge::Top) => {
                child.top() < c.top() && child.bottom() >= c.top()
            }
            (ShowMode::PullOut, DragEdge::Bottom) => {
                child.top() < c.bottom() && child.top() >= c.top()
            }
        }
    }

    /// Signed gap between the reveal boundary and the child's leading edge.
    #[must_use]
    pub fn distance(&self, child: Rect) -> i32 {
        let s = self.surface;
        let c = self.content;
        match (self.show_mode, self.edge) {
            (ShowMode::LayDown, DragEdge::Left) => child.left() - s.left(),
            (ShowMode::LayDown, DragEdge::Right) => child.right() - s.right(),
            (ShowMode::LayDown, DragEdge::Top) => child.top() - s.top(),
            (ShowMode::LayDown, DragEdge::Bottom) => child.bottom() - s.bottom(),
            (ShowMode::PullOut, DragEdge::Left) => child.right() - c.left(),
            (ShowMode::PullOut, DragEdge::Right) => child.left() - c.right(),
            (ShowMode::PullOut, DragEdge::Top) => child.bottom() - c.top(),
            (ShowMode::PullOut, DragEdge::Bottom) => child.top() - c.bottom(),
        }
    }

    /// Whether `child` has crossed into complete visibility.
    #[must_use]
    pub fn is_fully_shown(&self, child: Rect) -> bool {
        let s = self.surface;
        let c = self.content;
        match (self.show_mode, self.edge) {
            (ShowMode::LayDown, DragEdge::Right) => s.right() <= child.left(),
            (ShowMode::LayDown, DragEdge::Left) => s.left() >= child.right(),
            (ShowMode::LayDown, DragEdge::Top) => s.top() >= child.bottom(),
            (ShowMode::LayDown, DragEdge::Bottom) => s.bottom() <= child.top(),
            (ShowMode::PullOut, DragEdge::Right) => child.right() <= c.right(),
            (ShowMode::PullOut, DragEdge::Left) => child.left() >= c.left(),
            (ShowMode::PullOut, DragEdge::Top) => child.top() >= c.top(),
            (ShowMode::PullOut, DragEdge::Bottom) => child.bottom() <= c.bottom(),
        }
    }

    fn extent(&self, child: Rect) -> i32 {
        child.size().extent(self.edge.axis())
    }
}

/// Registered reveal bindings, in registration order.
#[derive(Debug, Default, Clone)]
pub struct RevealDispatcher {
    bindings: Vec<RevealBinding>,
    next_listener: u32,
}

impl RevealDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a new listener to `child`, creating its binding on first use.
    pub fn add_listener(&mut self, child: ChildId) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.attach(child, id);
        id
    }

    /// Attach one listener to several children.
    pub fn add_listener_to_many(&mut self, children: &[ChildId]) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        for child in children {
            self.attach(*child, id);
        }
        id
    }

    fn attach(&mut self, child: ChildId, id: ListenerId) {
        match self.bindings.iter_mut().find(|b| b.child == child) {
            Some(binding) => {
                if !binding.listeners.contains(&id) {
                    binding.listeners.push(id);
                }
            }
            None => self.bindings.push(RevealBinding {
                child,
                listeners: vec![id],
                shown_entirely: false,
            }),
        }
    }

    /// Detach `listener` from `child`. Returns whether it was attached.
    pub fn remove_listener(&mut self, child: ChildId, listener: ListenerId) -> bool {
        let Some(pos) = self.bindings.iter().position(|b| b.child == child) else {
            return false;
        };
        let binding = &mut self.bindings[pos];
        let before = binding.listeners.len();
        binding.listeners.retain(|l| *l != listener);
        let removed = binding.listeners.len() != before;
        if binding.listeners.is_empty() {
            self.bindings.remove(pos);
        }
        removed
    }

    /// Drop every listener of `child`. Returns how many were removed.
    pub fn remove_all(&mut self, child: ChildId) -> usize {
        let Some(pos) = self.bindings.iter().position(|b| b.child == child) else {
            return 0;
        };
        self.bindings.remove(pos).listeners.len()
    }

    #[must_use]
    pub fn bindings(&self) -> &[RevealBinding] {
        &self.bindings
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Emit reveal events for the current frame.
    ///
    /// `resolve` maps a child to its rectangle in container coordinates.
    pub fn dispatch(
        &mut self,
        frame: &RevealFrame,
        resolve: impl Fn(ChildId) -> Option<Rect>,
        out: &mut Vec<SwipeEvent>,
    ) {
        for binding in &mut self.bindings {
            let Some(rect) = resolve(binding.child) else {
                continue;
            };
            let extent = frame.extent(rect);
            if extent <= 0 {
                continue;
            }

            if frame.is_showing(rect) {
                binding.shown_entirely = false;
                let distance = frame.distance(rect);
                let fraction = (distance as f32 / extent as f32).abs();
                for listener in &binding.listeners {
                    out.push(SwipeEvent::Reveal {
                        listener: *listener,
                        child: binding.child,
                        edge: frame.edge,
                        fraction,
                        distance,
                    });
                }
                if fraction == 1.0 {
                    binding.shown_entirely = true;
                }
            }

            if !binding.shown_entirely && frame.is_fully_shown(rect) {
                binding.shown_entirely = true;
                for listener in &binding.listeners {
                    out.push(SwipeEvent::Reveal {
                        listener: *listener,
                        child: binding.child,
                        edge: frame.edge,
                        fraction: 1.0,
                        distance: extent,
                    });
                }
            }
        }
    }
}
