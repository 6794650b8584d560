//! Drag-reorder state machine
//!
//! `Idle -> Dragging -> {Dropped | Cancelled} -> Idle`, independent of the
//! input device. Hovering only moves the transient target indicator; the
//! collection changes only on drop.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Link, LinkId};
use crate::order;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: LinkId,
        over: Option<LinkId>,
    },
}

/// Result of a drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Collection was reordered
    Dropped(Vec<Link>),
    /// Nothing to commit (no drag in progress, dropped onto itself, or unknown id)
    Cancelled,
}

impl DragState {
    /// Capture the dragged link. Restarting replaces the previous source.
    pub fn start(&self, source: impl Into<LinkId>) -> DragState {
        DragState::Dragging {
            source: source.into(),
            over: None,
        }
    }

    /// Update the hover indicator. Ignored while idle.
    pub fn over(&self, target: impl Into<LinkId>) -> DragState {
        match self {
            DragState::Idle => DragState::Idle,
            DragState::Dragging { source, .. } => DragState::Dragging {
                source: source.clone(),
                over: Some(target.into()),
            },
        }
    }

    /// Commit through the order manager. The state always returns to idle.
    pub fn drop_on(&self, links: &[Link], target: &str) -> (DragState, DropOutcome) {
        let outcome = match self {
            DragState::Idle => {
                debug!(target = %target, "Drop without drag in progress");
                DropOutcome::Cancelled
            }
            DragState::Dragging { source, .. } => match order::try_reorder(links, source, target) {
                Some(next) => DropOutcome::Dropped(next),
                None => DropOutcome::Cancelled,
            },
        };
        (DragState::Idle, outcome)
    }

    /// Fired unconditionally when the gesture finishes
    pub fn end(&self) -> DragState {
        DragState::Idle
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { source, .. } => Some(source),
        }
    }

    /// Link currently under the pointer, for the drop indicator
    pub fn indicator(&self) -> Option<&str> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { over, .. } => over.as_deref(),
        }
    }
}
