#![forbid(unsafe_code)]

//! Release resolution: where the surface settles after the pointer lifts.

use crate::config::SwipeConfig;
use crate::edge::Axis;
use crate::geometry::{Geometry, Rect, Status};

/// Settle destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettleTarget {
    Open,
    Close,
}

impl SettleTarget {
    /// Whether the destination is fully open.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Velocity threshold and the asymmetric open-fraction thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleasePolicy {
    /// px/s above which the fling direction alone decides.
    pub min_velocity: f32,
    /// Fraction needed to open when the gesture started closed.
    pub open_after_close: f32,
    /// Fraction needed to stay open when the gesture started open.
    pub open_after_open: f32,
}

impl ReleasePolicy {
    #[must_use]
    pub fn from_config(config: &SwipeConfig) -> Self {
        Self {
            min_velocity: config.min_fling_velocity,
            open_after_close: config.will_open_percent_after_close,
            open_after_open: config.will_open_percent_after_open,
        }
    }

    /// Threshold for a gesture that did (or did not) start from `Close`.
    #[must_use]
    pub fn threshold(&self, was_closed: bool) -> f32 {
        if was_closed {
            self.open_after_close
        } else {
            self.open_after_open
        }
    }

    /// Resolve a release of the surface.
    ///
    /// Velocity is the host's `(vx, vy)` estimate; only the component on the
    /// active edge's axis is read, sign-normalised so positive means opening.
    #[must_use]
    pub fn resolve_surface(
        &self,
        geometry: &Geometry,
        surface: Rect,
        velocity: (f32, f32),
        was_closed: bool,
    ) -> SettleTarget {
        let signed = opening_velocity(geometry, velocity);
        if signed > self.min_velocity {
            return SettleTarget::Open;
        }
        if signed < -self.min_velocity {
            return SettleTarget::Close;
        }
        if geometry.open_fraction(surface) > self.threshold(was_closed) {
            SettleTarget::Open
        } else {
            SettleTarget::Close
        }
    }

    /// Resolve a release of a captured panel.
    ///
    /// Only the fling direction counts. A still hand leaves an open or closed
    /// panel where it is and closes a half-open one.
    #[must_use]
    pub fn resolve_panel(
        &self,
        geometry: &Geometry,
        surface: Rect,
        velocity: (f32, f32),
    ) -> SettleTarget {
        let signed = opening_velocity(geometry, velocity);
        if signed > 0.0 {
            SettleTarget::Open
        } else if signed < 0.0 {
            SettleTarget::Close
        } else if geometry.status_of(surface) == Status::Open {
            SettleTarget::Open
        } else {
            SettleTarget::Close
        }
    }
}

fn opening_velocity(geometry: &Geometry, (vx, vy): (f32, f32)) -> f32 {
    let along = match geometry.edge.axis() {
        Axis::Horizontal => vx,
        Axis::Vertical => vy,
    };
    along * geometry.edge.sign() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{DragEdge, ShowMode};
    use crate::geometry::Size;

    fn geometry(edge: DragEdge) -> Geometry {
        Geometry {
            content: Rect::new(0, 0, 300, 100),
            show_mode: ShowMode::PullOut,
            edge,
            panel_size: Size::new(100, 100),
            drag_distance: 100,
        }
    }

    fn policy() -> ReleasePolicy {
        ReleasePolicy::from_config(&SwipeConfig::default())
    }

    #[test]
    fn fraction_thresholds_are_asymmetric() {
        let g = geometry(DragEdge::Right);
        let at_30 = g.content.offset(-30, 0);
        assert_eq!(policy().resolve_surface(&g, at_30, (0.0, 0.0), true), SettleTarget::Open);
        assert_eq!(policy().resolve_surface(&g, at_30, (0.0, 0.0), false), SettleTarget::Close);
        let at_80 = g.content.offset(-80, 0);
        assert_eq!(policy().resolve_surface(&g, at_80, (0.0, 0.0), false), SettleTarget::Open);
    }

    #[test]
    fn fling_overrides_fraction() {
        let g = geometry(DragEdge::Right);
        let barely = g.content.offset(-5, 0);
        assert_eq!(policy().resolve_surface(&g, barely, (-400.0, 0.0), true), SettleTarget::Open);
        let mostly = g.content.offset(-95, 0);
        assert_eq!(policy().resolve_surface(&g, mostly, (400.0, 0.0), false), SettleTarget::Close);
        // Orthogonal velocity is ignored.
        assert_eq!(policy().resolve_surface(&g, barely, (0.0, -900.0), true), SettleTarget::Close);
    }

    #[test]
    fn vertical_edges_read_vertical_velocity() {
        let g = geometry(DragEdge::Top);
        let surface = g.content.offset(0, 10);
        assert_eq!(policy().resolve_surface(&g, surface, (0.0, 120.0), true), SettleTarget::Open);
        let g = geometry(DragEdge::Bottom);
        assert_eq!(policy().resolve_surface(&g, g.content, (0.0, 120.0), true), SettleTarget::Close);
    }

    #[test]
    fn panel_release_follows_velocity_sign() {
        let g = geometry(DragEdge::Left);
        let half = g.content.offset(50, 0);
        assert_eq!(policy().resolve_panel(&g, half, (3.0, 0.0)), SettleTarget::Open);
        assert_eq!(policy().resolve_panel(&g, half, (-3.0, 0.0)), SettleTarget::Close);
        assert_eq!(policy().resolve_panel(&g, half, (0.0, 0.0)), SettleTarget::Close);
        let open = g.surface_rect(true);
        assert_eq!(policy().resolve_panel(&g, open, (0.0, 0.0)), SettleTarget::Open);
    }
}
