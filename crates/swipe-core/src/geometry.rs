#![forbid(unsafe_code)]

//! Geometric primitives and the edge/show-mode aware geometry model.
//!
//! Coordinates are integer pixels in the container's coordinate space
//! (origin at the top-left of the panel container). Offsets may be negative
//! because the surface slides outside the container while a panel is open.

use crate::edge::{Axis, DragEdge, ShowMode};

/// A point in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component along `axis`.
    #[inline]
    #[must_use]
    pub const fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// A measured size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Extent along `axis` (width for horizontal, height for vertical).
    #[inline]
    #[must_use]
    pub const fn extent(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// An axis-aligned rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at `origin` with the given size.
    #[inline]
    pub const fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// The same rectangle moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// The same rectangle with its origin replaced.
    #[inline]
    #[must_use]
    pub const fn with_origin(&self, origin: Point) -> Rect {
        Rect::new(origin.x, origin.y, self.width, self.height)
    }

    /// Create a new rectangle inside the current one with the given margin.
    pub fn inner(&self, margin: Sides) -> Rect {
        Rect {
            x: self.x + margin.left,
            y: self.y + margin.top,
            width: (self.width - margin.horizontal_sum()).max(0),
            height: (self.height - margin.vertical_sum()).max(0),
        }
    }
}

/// Sides for padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sides {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Sides {
    /// Create new sides with equal values.
    pub const fn all(val: i32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with specific values.
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal_sum(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical_sum(&self) -> i32 {
        self.top + self.bottom
    }
}

impl From<i32> for Sides {
    fn from(val: i32) -> Self {
        Self::all(val)
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Open state of a panel, derived from the surface offset alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Close,
    Open,
    Middle,
}

impl Status {
    /// Classify a surface offset `(dx, dy)` from its resting position.
    ///
    /// Zero offset is `Close`; an offset of exactly `drag_distance` on
    /// either axis is `Open`; everything else is `Middle`.
    #[must_use]
    pub fn from_offset(dx: i32, dy: i32, drag_distance: i32) -> Self {
        if dx == 0 && dy == 0 {
            Status::Close
        } else if drag_distance > 0 && (dx.abs() == drag_distance || dy.abs() == drag_distance) {
            Status::Open
        } else {
            Status::Middle
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry model
// ---------------------------------------------------------------------------

/// Allowed rectangles for the surface and the active panel.
///
/// Pure value: every method is a function of the fields, which the layout
/// refreshes whenever the container, the active edge, the panel size or the
/// drag distance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Container content box (bounds minus padding). The surface rests here.
    pub content: Rect,
    pub show_mode: ShowMode,
    pub edge: DragEdge,
    /// Measured size of the active panel.
    pub panel_size: Size,
    /// Maximum single-axis travel of the surface.
    pub drag_distance: i32,
}

impl Geometry {
    /// Surface rectangle at rest (`open == false`) or fully open.
    #[must_use]
    pub fn surface_rect(&self, open: bool) -> Rect {
        if !open {
            return self.content;
        }
        let travel = self.edge.sign() * self.drag_distance;
        match self.edge.axis() {
            Axis::Horizontal => self.content.offset(travel, 0),
            Axis::Vertical => self.content.offset(0, travel),
        }
    }

    /// Panel rectangle for the given surface rectangle.
    ///
    /// In `PullOut` the panel hugs the surface's leading edge and moves with
    /// it. In `LayDown` the panel is a fixed band of `drag_distance` pinned to
    /// the content edge.
    #[must_use]
    pub fn panel_rect(&self, surface: Rect) -> Rect {
        match self.show_mode {
            ShowMode::PullOut => self.pull_out_panel(surface),
            ShowMode::LayDown => self.lay_down_panel(),
        }
    }

    fn pull_out_panel(&self, s: Rect) -> Rect {
        let dd = self.drag_distance;
        match self.edge {
            DragEdge::Left => Rect::new(s.left() - dd, s.top(), self.panel_size.width, s.height),
            DragEdge::Right => Rect::new(s.right(), s.top(), self.panel_size.width, s.height),
            DragEdge::Top => Rect::new(s.left(), s.top() - dd, s.width, self.panel_size.height),
            DragEdge::Bottom => Rect::new(s.left(), s.bottom(), s.width, self.panel_size.height),
        }
    }

    fn lay_down_panel(&self) -> Rect {
        let c = self.content;
        let dd = self.drag_distance;
        match self.edge {
            DragEdge::Left => Rect::new(c.left(), c.top(), dd, c.height),
            DragEdge::Right => Rect::new(c.right() - dd, c.top(), dd, c.height),
            DragEdge::Top => Rect::new(c.left(), c.top(), c.width, dd),
            DragEdge::Bottom => Rect::new(c.left(), c.bottom() - dd, c.width, dd),
        }
    }

    /// Clamp a candidate surface origin into the allowed travel band and pin
    /// the orthogonal axis to its resting value.
    #[must_use]
    pub fn clamp_surface(&self, candidate: Point) -> Point {
        let rest = self.surface_rect(false).origin();
        let open = self.surface_rect(true).origin();
        clamp_between(candidate, rest, open, self.edge.axis())
    }

    /// Clamp a candidate `PullOut` panel origin between its closed and open
    /// positions. `LayDown` panels never move, so their fixed origin is
    /// returned.
    #[must_use]
    pub fn clamp_panel(&self, candidate: Point) -> Point {
        let closed = self.panel_rect(self.surface_rect(false)).origin();
        match self.show_mode {
            ShowMode::LayDown => closed,
            ShowMode::PullOut => {
                let open = self.panel_rect(self.surface_rect(true)).origin();
                clamp_between(candidate, closed, open, self.edge.axis())
            }
        }
    }

    /// Surface offset from rest for the given surface rectangle.
    #[must_use]
    pub fn offset_of(&self, surface: Rect) -> (i32, i32) {
        (surface.x - self.content.x, surface.y - self.content.y)
    }

    /// Status for the given surface rectangle.
    #[must_use]
    pub fn status_of(&self, surface: Rect) -> Status {
        let (dx, dy) = self.offset_of(surface);
        Status::from_offset(dx, dy, self.drag_distance)
    }

    /// Fraction of `drag_distance` travelled toward open, sign-normalised so
    /// that 0.0 is closed and 1.0 is fully open for every edge.
    #[must_use]
    pub fn open_fraction(&self, surface: Rect) -> f32 {
        if self.drag_distance <= 0 {
            return 0.0;
        }
        let (dx, dy) = self.offset_of(surface);
        let along = match self.edge.axis() {
            Axis::Horizontal => dx,
            Axis::Vertical => dy,
        };
        (along * self.edge.sign()) as f32 / self.drag_distance as f32
    }
}

fn clamp_between(candidate: Point, a: Point, b: Point, axis: Axis) -> Point {
    match axis {
        Axis::Horizontal => Point::new(candidate.x.clamp(a.x.min(b.x), a.x.max(b.x)), a.y),
        Axis::Vertical => Point::new(a.x, candidate.y.clamp(a.y.min(b.y), a.y.max(b.y))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(edge: DragEdge, show_mode: ShowMode) -> Geometry {
        Geometry {
            content: Rect::new(0, 0, 300, 60),
            show_mode,
            edge,
            panel_size: Size::new(100, 60),
            drag_distance: 100,
        }
    }

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
        assert!(Rect::new(-10, 0, 20, 5).contains(-10, 0));
    }

    #[test]
    fn rect_inner_reduces() {
        let rect = Rect::new(0, 0, 10, 10);
        assert_eq!(rect.inner(Sides::new(1, 2, 3, 4)), Rect::new(4, 1, 4, 6));
        assert_eq!(rect.inner(Sides::all(8)), Rect::new(8, 8, 0, 0));
    }

    #[test]
    fn status_from_offset() {
        assert_eq!(Status::from_offset(0, 0, 100), Status::Close);
        assert_eq!(Status::from_offset(-100, 0, 100), Status::Open);
        assert_eq!(Status::from_offset(0, 100, 100), Status::Open);
        assert_eq!(Status::from_offset(-40, 0, 100), Status::Middle);
    }

    #[test]
    fn surface_rect_open_sign_per_edge() {
        let g = geometry(DragEdge::Left, ShowMode::PullOut);
        assert_eq!(g.surface_rect(true).x, 100);
        let g = geometry(DragEdge::Right, ShowMode::PullOut);
        assert_eq!(g.surface_rect(true).x, -100);
        let g = geometry(DragEdge::Top, ShowMode::PullOut);
        assert_eq!(g.surface_rect(true).y, 100);
        let g = geometry(DragEdge::Bottom, ShowMode::PullOut);
        assert_eq!(g.surface_rect(true).y, -100);
    }

    #[test]
    fn pull_out_panel_tracks_surface() {
        let g = geometry(DragEdge::Right, ShowMode::PullOut);
        let closed = g.panel_rect(g.surface_rect(false));
        assert_eq!(closed, Rect::new(300, 0, 100, 60));
        let open = g.panel_rect(g.surface_rect(true));
        assert_eq!(open, Rect::new(200, 0, 100, 60));

        let g = geometry(DragEdge::Left, ShowMode::PullOut);
        assert_eq!(g.panel_rect(g.surface_rect(false)).x, -100);
        assert_eq!(g.panel_rect(g.surface_rect(true)).x, 0);
    }

    #[test]
    fn lay_down_panel_is_fixed() {
        let g = geometry(DragEdge::Right, ShowMode::LayDown);
        let expected = Rect::new(200, 0, 100, 60);
        assert_eq!(g.panel_rect(g.surface_rect(false)), expected);
        assert_eq!(g.panel_rect(g.surface_rect(true)), expected);

        let g = Geometry {
            content: Rect::new(0, 0, 300, 200),
            ..geometry(DragEdge::Bottom, ShowMode::LayDown)
        };
        assert_eq!(g.panel_rect(g.content), Rect::new(0, 100, 300, 100));
    }

    #[test]
    fn clamp_surface_pins_orthogonal_axis() {
        let g = geometry(DragEdge::Right, ShowMode::PullOut);
        assert_eq!(g.clamp_surface(Point::new(-30, 12)), Point::new(-30, 0));
        assert_eq!(g.clamp_surface(Point::new(25, 0)), Point::new(0, 0));
        assert_eq!(g.clamp_surface(Point::new(-250, 0)), Point::new(-100, 0));

        let g = geometry(DragEdge::Top, ShowMode::PullOut);
        assert_eq!(g.clamp_surface(Point::new(7, 40)), Point::new(0, 40));
        assert_eq!(g.clamp_surface(Point::new(0, -5)), Point::new(0, 0));
    }

    #[test]
    fn clamp_panel_pull_out_band() {
        let g = geometry(DragEdge::Right, ShowMode::PullOut);
        assert_eq!(g.clamp_panel(Point::new(150, 0)), Point::new(200, 0));
        assert_eq!(g.clamp_panel(Point::new(350, 9)), Point::new(300, 0));
        let g = geometry(DragEdge::Right, ShowMode::LayDown);
        assert_eq!(g.clamp_panel(Point::new(150, 0)), Point::new(200, 0));
    }

    #[test]
    fn open_fraction_is_sign_normalised() {
        let g = geometry(DragEdge::Right, ShowMode::PullOut);
        let s = g.content.offset(-80, 0);
        assert!((g.open_fraction(s) - 0.8).abs() < f32::EPSILON);
        let g = geometry(DragEdge::Left, ShowMode::PullOut);
        let s = g.content.offset(25, 0);
        assert!((g.open_fraction(s) - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_drag_distance_is_always_closed() {
        let g = Geometry {
            drag_distance: 0,
            ..geometry(DragEdge::Right, ShowMode::PullOut)
        };
        assert_eq!(g.status_of(g.surface_rect(true)), Status::Close);
        assert_eq!(g.open_fraction(g.content), 0.0);
    }
}
