#![forbid(unsafe_code)]

//! Construction and caller errors.

use std::fmt;

use crate::config::ConfigError;
use crate::edge::DragEdge;
use crate::tree::ChildId;

/// Errors surfaced by [`SwipeLayout`](crate::layout::SwipeLayout).
///
/// Every variant is a caller bug. Gestures toward absent or disabled edges
/// are not errors and never produce one.
#[derive(Debug, Clone, PartialEq)]
pub enum SwipeError {
    /// The number of panel views differs from the number of registered edges.
    PanelCountMismatch { panels: usize, edges: usize },
    /// Two panels were anchored to the same edge.
    DuplicatePanelEdge(DragEdge),
    /// A reveal binding named a child that is not in the view tree.
    UnknownChild(ChildId),
    /// A child was registered under a parent that is not in the view tree.
    UnknownParent(ChildId),
    /// A child id was registered twice.
    DuplicateChild(ChildId),
    /// An explicit open was requested toward an edge without a panel.
    EdgeNotRegistered(DragEdge),
    /// The configuration failed validation.
    InvalidConfig(ConfigError),
}

impl fmt::Display for SwipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PanelCountMismatch { panels, edges } => write!(
                f,
                "need one surface plus one panel per drag edge (panels: {panels}, edges: {edges})"
            ),
            Self::DuplicatePanelEdge(edge) => {
                write!(f, "more than one panel anchored to the {edge:?} edge")
            }
            Self::UnknownChild(id) => write!(f, "child {id} does not belong to this layout"),
            Self::UnknownParent(id) => write!(f, "parent {id} does not belong to this layout"),
            Self::DuplicateChild(id) => write!(f, "child {id} is already registered"),
            Self::EdgeNotRegistered(edge) => write!(f, "no panel registered for the {edge:?} edge"),
            Self::InvalidConfig(error) => write!(f, "invalid swipe configuration: {error}"),
        }
    }
}

impl std::error::Error for SwipeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::InvalidConfig(error) = self {
            return Some(error);
        }
        None
    }
}

impl From<ConfigError> for SwipeError {
    fn from(error: ConfigError) -> Self {
        Self::InvalidConfig(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_mentions_counts() {
        let err = SwipeError::PanelCountMismatch {
            panels: 1,
            edges: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("panels: 1"));
        assert!(msg.contains("edges: 2"));
    }

    #[test]
    fn config_error_is_source() {
        let err = SwipeError::from(ConfigError::NonPositiveDensity(0.0));
        assert!(err.source().is_some());
        assert!(SwipeError::UnknownChild(ChildId(3)).source().is_none());
    }
}
