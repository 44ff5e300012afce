#![forbid(unsafe_code)]

//! Drag edges, edge sets and show modes.

use bitflags::bitflags;

/// Axis of travel for an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The side of the container a panel is revealed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragEdge {
    Left,
    Top,
    Right,
    Bottom,
}

impl DragEdge {
    /// All edges in registration order.
    pub const ALL: [DragEdge; 4] = [
        DragEdge::Left,
        DragEdge::Right,
        DragEdge::Top,
        DragEdge::Bottom,
    ];

    /// Axis along which the surface travels for this edge.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// Returns true for `Left` and `Right`.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self.axis(), Axis::Horizontal)
    }

    /// Direction of opening travel: `+1` for Left/Top, `-1` for Right/Bottom.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Left | Self::Top => 1,
            Self::Right | Self::Bottom => -1,
        }
    }

    /// The single-edge flag for this edge.
    #[must_use]
    pub const fn flag(self) -> EdgeSet {
        match self {
            Self::Left => EdgeSet::LEFT,
            Self::Right => EdgeSet::RIGHT,
            Self::Top => EdgeSet::TOP,
            Self::Bottom => EdgeSet::BOTTOM,
        }
    }

    /// Stable slot index used by per-edge tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Top => 2,
            Self::Bottom => 3,
        }
    }

    /// Whether a pointer delta moves the surface toward opening this edge.
    ///
    /// Only the component on the edge's axis counts; a zero delta counts as
    /// opening.
    #[must_use]
    pub const fn is_opening(self, dx: i32, dy: i32) -> bool {
        match self {
            Self::Left => dx >= 0,
            Self::Right => dx <= 0,
            Self::Top => dy >= 0,
            Self::Bottom => dy <= 0,
        }
    }
}

bitflags! {
    /// A set of drag edges.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EdgeSet: u8 {
        const LEFT   = 0b0001;
        const RIGHT  = 0b0010;
        const TOP    = 0b0100;
        const BOTTOM = 0b1000;
    }
}

impl EdgeSet {
    /// Whether `edge` is in the set.
    #[must_use]
    pub const fn has(self, edge: DragEdge) -> bool {
        self.contains(edge.flag())
    }

    /// Edges in the set, in registration order.
    pub fn edges(self) -> impl Iterator<Item = DragEdge> {
        DragEdge::ALL.into_iter().filter(move |e| self.has(*e))
    }

    /// Number of edges in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits().count_ones() as usize
    }
}

impl From<DragEdge> for EdgeSet {
    fn from(edge: DragEdge) -> Self {
        edge.flag()
    }
}

/// How the panel appears relative to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShowMode {
    /// Panel slides in from outside the bounds together with the surface.
    #[default]
    PullOut,
    /// Panel is fixed behind the surface; only the surface moves.
    LayDown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_set_iterates_in_registration_order() {
        let set = EdgeSet::BOTTOM | EdgeSet::LEFT | EdgeSet::RIGHT;
        let edges: Vec<_> = set.edges().collect();
        assert_eq!(edges, vec![DragEdge::Left, DragEdge::Right, DragEdge::Bottom]);
        assert_eq!(set.len(), 3);
        assert!(EdgeSet::empty().edges().next().is_none());
    }

    #[test]
    fn opening_direction_per_edge() {
        assert!(DragEdge::Right.is_opening(-3, 0));
        assert!(!DragEdge::Right.is_opening(3, 0));
        assert!(DragEdge::Left.is_opening(3, 0));
        assert!(!DragEdge::Top.is_opening(0, -1));
        assert!(!DragEdge::Bottom.is_opening(0, 1));
    }

    #[test]
    fn sign_and_axis() {
        assert_eq!(DragEdge::Left.sign(), 1);
        assert_eq!(DragEdge::Bottom.sign(), -1);
        assert!(DragEdge::Right.is_horizontal());
        assert_eq!(DragEdge::Top.axis(), Axis::Vertical);
    }
}
