#![forbid(unsafe_code)]

//! Panel configuration.
//!
//! [`SwipeConfig`] mirrors the style attributes a host would declare for a
//! swipe panel: which edges exist and are enabled, how the panel is shown,
//! per-edge offsets in density-independent units, and the release policy.

use std::fmt;
use std::time::Duration;

use crate::edge::{DragEdge, EdgeSet, ShowMode};

/// Default release threshold when the drag started from `Close`.
pub const DEFAULT_OPEN_AFTER_CLOSE: f32 = 0.25;
/// Default release threshold when the drag started from `Open`.
pub const DEFAULT_OPEN_AFTER_OPEN: f32 = 0.75;

/// Thresholds and switches for one swipe panel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeConfig {
    /// Edges with a panel (default: `RIGHT`).
    pub edges: EdgeSet,
    /// Edges that accept swipes (default: all).
    pub enabled_edges: EdgeSet,
    /// Master switch; when false every pointer event passes through.
    pub swipe_enabled: bool,
    pub show_mode: ShowMode,
    /// Per-edge offset subtracted from the panel extent, in dp, indexed by
    /// [`DragEdge::index`].
    pub edge_offsets_dp: [f32; 4],
    /// Host pixel density used for dp conversion (default: 1.0).
    pub density: f32,
    /// Tap on the surface of an open panel closes it (default: true).
    pub click_to_close: bool,
    /// Open fraction needed to settle open when the drag began closed.
    pub will_open_percent_after_close: f32,
    /// Open fraction needed to stay open when the drag began open.
    pub will_open_percent_after_open: f32,
    /// Movement in pixels before a drag direction counts (default: 8.0).
    pub touch_slop: f32,
    /// Release velocity in px/s above which the fling direction decides
    /// (default: 50.0).
    pub min_fling_velocity: f32,
    /// Ask the host to show the surface pressed while dragging.
    pub pressed_state_emulation: bool,
    /// Hold duration before a closed panel reports a long press (default: 500ms).
    pub long_press_threshold: Duration,
    /// Window for double-tap detection (default: 300ms).
    pub multi_tap_timeout: Duration,
    /// Max distance in pixels between taps of a double tap (default: 8.0).
    pub tap_tolerance: f32,
    /// Spring stiffness of the smooth settle (default: 400.0).
    pub settle_stiffness: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            edges: EdgeSet::RIGHT,
            enabled_edges: EdgeSet::all(),
            swipe_enabled: true,
            show_mode: ShowMode::PullOut,
            edge_offsets_dp: [0.0; 4],
            density: 1.0,
            click_to_close: true,
            will_open_percent_after_close: DEFAULT_OPEN_AFTER_CLOSE,
            will_open_percent_after_open: DEFAULT_OPEN_AFTER_OPEN,
            touch_slop: 8.0,
            min_fling_velocity: 50.0,
            pressed_state_emulation: false,
            long_press_threshold: Duration::from_millis(500),
            multi_tap_timeout: Duration::from_millis(300),
            tap_tolerance: 8.0,
            settle_stiffness: 400.0,
        }
    }
}

impl SwipeConfig {
    /// Set the registered edges (builder pattern).
    #[must_use]
    pub fn with_edges(mut self, edges: impl Into<EdgeSet>) -> Self {
        self.edges = edges.into();
        self
    }

    /// Set the show mode (builder pattern).
    #[must_use]
    pub fn with_show_mode(mut self, mode: ShowMode) -> Self {
        self.show_mode = mode;
        self
    }

    /// Set the offset for one edge in dp (builder pattern).
    #[must_use]
    pub fn with_edge_offset(mut self, edge: DragEdge, dp: f32) -> Self {
        self.edge_offsets_dp[edge.index()] = dp;
        self
    }

    /// Set the release threshold pair (builder pattern).
    #[must_use]
    pub fn with_open_thresholds(mut self, after_close: f32, after_open: f32) -> Self {
        self.will_open_percent_after_close = after_close;
        self.will_open_percent_after_open = after_open;
        self
    }

    /// Set host density (builder pattern).
    #[must_use]
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Set click-to-close (builder pattern).
    #[must_use]
    pub fn with_click_to_close(mut self, enabled: bool) -> Self {
        self.click_to_close = enabled;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.density > 0.0) {
            return Err(ConfigError::NonPositiveDensity(self.density));
        }
        for threshold in [
            self.will_open_percent_after_close,
            self.will_open_percent_after_open,
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ThresholdOutOfRange(threshold));
            }
        }
        if !(self.touch_slop >= 0.0) {
            return Err(ConfigError::NegativeTouchSlop(self.touch_slop));
        }
        if !(self.min_fling_velocity >= 0.0) {
            return Err(ConfigError::NegativeVelocity(self.min_fling_velocity));
        }
        if !(self.settle_stiffness > 0.0) {
            return Err(ConfigError::NonPositiveStiffness(self.settle_stiffness));
        }
        Ok(())
    }

    /// Convert density-independent units to whole pixels.
    #[must_use]
    pub fn dp_to_px(&self, dp: f32) -> i32 {
        (dp * self.density + 0.5) as i32
    }

    /// Offset for `edge` in pixels.
    #[must_use]
    pub fn edge_offset_px(&self, edge: DragEdge) -> i32 {
        self.dp_to_px(self.edge_offsets_dp[edge.index()])
    }

    /// Whether swipes toward `edge` are enabled.
    #[must_use]
    pub fn is_edge_enabled(&self, edge: DragEdge) -> bool {
        self.enabled_edges.has(edge)
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    NonPositiveDensity(f32),
    ThresholdOutOfRange(f32),
    NegativeTouchSlop(f32),
    NegativeVelocity(f32),
    NonPositiveStiffness(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDensity(d) => write!(f, "density must be > 0 (got {d})"),
            Self::ThresholdOutOfRange(t) => {
                write!(f, "open threshold must be within [0, 1] (got {t})")
            }
            Self::NegativeTouchSlop(s) => write!(f, "touch slop must be >= 0 (got {s})"),
            Self::NegativeVelocity(v) => write!(f, "fling velocity must be >= 0 (got {v})"),
            Self::NonPositiveStiffness(k) => write!(f, "settle stiffness must be > 0 (got {k})"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = SwipeConfig::default();
        assert_eq!(config.edges, EdgeSet::RIGHT);
        assert_eq!(config.show_mode, ShowMode::PullOut);
        assert_eq!(config.will_open_percent_after_close, 0.25);
        assert_eq!(config.will_open_percent_after_open, 0.75);
        assert!(config.click_to_close);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn dp_conversion_rounds() {
        let config = SwipeConfig::default().with_density(2.5);
        assert_eq!(config.dp_to_px(10.0), 25);
        assert_eq!(config.dp_to_px(0.3), 1);
        let config = config.with_edge_offset(DragEdge::Left, 4.0);
        assert_eq!(config.edge_offset_px(DragEdge::Left), 10);
        assert_eq!(config.edge_offset_px(DragEdge::Right), 0);
    }

    #[test]
    fn validate_rejects_bad_thresholds() {
        let config = SwipeConfig::default().with_open_thresholds(1.5, 0.75);
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOutOfRange(1.5)));
        let config = SwipeConfig::default().with_density(0.0);
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveDensity(0.0)));
        let config = SwipeConfig {
            settle_stiffness: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
