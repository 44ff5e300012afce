#![forbid(unsafe_code)]

//! Child views nested inside the surface or a panel.
//!
//! The layout does not own a real view hierarchy. Callers describe the
//! children they want reveal notifications for: each child has a parent
//! (the surface, a panel, or another child) and a frame relative to that
//! parent. Resolving a child into container coordinates walks the parent
//! chain and finishes at the root view's current rectangle.
//!
//! # Invariants
//!
//! - Parents are registered before their children, so chains are acyclic.
//! - Child ids are unique within one tree.

use std::fmt;

use ahash::AHashMap;

use crate::edge::DragEdge;
use crate::error::SwipeError;
use crate::geometry::{Point, Rect};

/// Caller-chosen identifier of a child view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildId(pub u32);

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a child hangs in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentRef {
    Surface,
    Panel(DragEdge),
    Child(ChildId),
}

/// Root view a chain ends at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootView {
    Surface,
    Panel(DragEdge),
}

#[derive(Debug, Clone, Copy)]
struct Node {
    parent: ParentRef,
    frame: Rect,
}

/// Registered child views.
#[derive(Debug, Default, Clone)]
pub struct ViewTree {
    nodes: AHashMap<ChildId, Node>,
}

impl ViewTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` under `parent` with `frame` relative to the parent.
    pub fn insert(&mut self, id: ChildId, parent: ParentRef, frame: Rect) -> Result<(), SwipeError> {
        if self.nodes.contains_key(&id) {
            return Err(SwipeError::DuplicateChild(id));
        }
        if let ParentRef::Child(parent_id) = parent
            && !self.nodes.contains_key(&parent_id)
        {
            return Err(SwipeError::UnknownParent(parent_id));
        }
        self.nodes.insert(id, Node { parent, frame });
        Ok(())
    }

    /// Move or resize an existing child.
    pub fn set_frame(&mut self, id: ChildId, frame: Rect) -> Result<(), SwipeError> {
        let node = self.nodes.get_mut(&id).ok_or(SwipeError::UnknownChild(id))?;
        node.frame = frame;
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, id: ChildId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root view and the child's rectangle relative to that root.
    #[must_use]
    pub fn resolve(&self, id: ChildId) -> Option<(RootView, Rect)> {
        let start = self.nodes.get(&id)?;
        let mut origin = start.frame.origin();
        let mut parent = start.parent;
        // Bounded by the node count: parents always predate their children.
        for _ in 0..=self.nodes.len() {
            match parent {
                ParentRef::Surface => {
                    return Some((RootView::Surface, Rect::from_origin(origin, start.frame.size())));
                }
                ParentRef::Panel(edge) => {
                    return Some((
                        RootView::Panel(edge),
                        Rect::from_origin(origin, start.frame.size()),
                    ));
                }
                ParentRef::Child(pid) => {
                    let node = self.nodes.get(&pid)?;
                    origin = Point::new(origin.x + node.frame.x, origin.y + node.frame.y);
                    parent = node.parent;
                }
            }
        }
        None
    }

    /// Child rectangle in container coordinates, given the current root
    /// rectangles. `panel_rect` returns `None` for panels that are not laid
    /// out.
    #[must_use]
    pub fn rect_in_container(
        &self,
        id: ChildId,
        surface: Rect,
        panel_rect: impl Fn(DragEdge) -> Option<Rect>,
    ) -> Option<Rect> {
        let (root, local) = self.resolve(id)?;
        let root_rect = match root {
            RootView::Surface => surface,
            RootView::Panel(edge) => panel_rect(edge)?,
        };
        Some(local.offset(root_rect.x, root_rect.y))
    }
}
