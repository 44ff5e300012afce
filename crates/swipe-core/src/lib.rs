#![forbid(unsafe_code)]

//! Core: geometry, gesture classification, settling, and event dispatch for
//! swipe-to-reveal panels.
//!
//! # Role
//! `swipe-core` is the toolkit-independent half of a swipe panel. A host
//! (any widget toolkit) measures views and delivers pointer events; this
//! crate decides where the surface and the panels go and which events fire.
//!
//! # Primary responsibilities
//! - **SwipeLayout**: one surface plus up to four edge panels, the drag state
//!   machine, and programmatic open/close.
//! - **Geometry**: allowed rectangles per edge and show mode, and `Status`
//!   derived from the surface offset.
//! - **Release and settle**: where the surface goes after the pointer lifts,
//!   and the spring that takes it there.
//! - **Reveal**: per-child exposure fractions while the surface moves.
//!
//! # How it fits in the system
//! `swipe-list` builds on this crate to keep open state consistent across
//! recycled list rows. Hosts implement [`Host`] to receive redraw,
//! intercept, and item-click requests.
//!
//! # Example
//!
//! ```
//! use swipe_core::{NoopHost, PanelView, Sides, Size, Status, SwipeConfig, SwipeLayout};
//!
//! let mut layout = SwipeLayout::new(
//!     SwipeConfig::default(),
//!     Size::new(300, 60),
//!     Sides::default(),
//!     vec![PanelView::new(Size::new(100, 60))],
//! )
//! .unwrap();
//! let events = layout.open(false, true, &mut NoopHost);
//! assert_eq!(layout.status(), Status::Open);
//! assert!(!events.is_empty());
//! ```

pub mod animation;
pub mod config;
pub mod edge;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod layout;
pub mod lifecycle;
pub mod logging;
pub mod release;
pub mod reveal;
pub mod swipe_event;
pub mod tree;

pub use config::{ConfigError, SwipeConfig};
pub use edge::{Axis, DragEdge, EdgeSet, ShowMode};
pub use error::SwipeError;
pub use event::{PointerEvent, PointerKind};
pub use geometry::{Geometry, Point, Rect, Sides, Size, Status};
pub use gesture::DragPhase;
pub use host::{Host, NoopHost, RecordingHost};
pub use layout::{DenierId, Dispatch, PanelView, SwipeLayout};
pub use release::SettleTarget;
pub use swipe_event::{ListenerId, SwipeEvent};
pub use tree::{ChildId, ParentRef};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
