//! Drag session state machine: `idle -> dragging -> dropped -> idle`

use crate::error::{BoardError, Result};
use crate::types::{CardId, Status};
use std::fmt;
use tracing::debug;

/// The element a move-start interaction originated from
pub trait DragTarget {
    /// Whether the target or one of its ancestors carries `class`.
    /// `None` when region hit-testing is unavailable.
    fn closest(&self, class: &str) -> Option<bool>;

    /// Exact class membership of the target itself
    fn has_class(&self, class: &str) -> bool;
}

/// Decides whether an interaction may start a drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePredicate {
    class: String,
}

impl Default for MovePredicate {
    fn default() -> Self {
        Self::new("Card")
    }
}

impl MovePredicate {
    /// Permit drags starting inside elements carrying `class`
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }

    /// The draggable region class
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Check the event target, never the dragged element
    pub fn permits<T: DragTarget + ?Sized>(&self, target: Option<&T>) -> bool {
        let Some(target) = target else {
            return false;
        };
        target
            .closest(&self.class)
            .unwrap_or_else(|| target.has_class(&self.class))
    }
}

/// Where the drag session is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { card: CardId, source: Status },
    Dropped,
}

impl fmt::Display for DragState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Dragging { .. } => f.write_str("dragging"),
            Self::Dropped => f.write_str("dropped"),
        }
    }
}

/// Proof that a drop happened. Consumed by exactly one drop-cycle.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a drop ticket must be handed to BoardEngine::drop_cycle"]
pub struct DropTicket {
    card: CardId,
    source: Status,
}

impl DropTicket {
    /// Card that was dragged
    pub fn card(&self) -> &CardId {
        &self.card
    }

    /// Lane the drag started in
    pub fn source(&self) -> Status {
        self.source
    }
}

/// Tracks one drag gesture at a time
#[derive(Debug)]
pub struct DragSession {
    state: DragState,
    predicate: MovePredicate,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(MovePredicate::default())
    }
}

impl DragSession {
    /// Create an idle session
    pub fn new(predicate: MovePredicate) -> Self {
        Self {
            state: DragState::Idle,
            predicate,
        }
    }

    /// Current state
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Check whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    fn transition(&mut self, next: DragState) {
        debug!(from = %self.state, to = %next, "drag transition");
        self.state = next;
    }

    /// Handle a move-start signal.
    ///
    /// Returns `Ok(false)` and stays idle when the predicate refuses the
    /// target.
    pub fn begin<T: DragTarget + ?Sized>(
        &mut self,
        card: impl Into<CardId>,
        source: Status,
        target: Option<&T>,
    ) -> Result<bool> {
        if self.state != DragState::Idle {
            return Err(BoardError::invalid_transition(
                self.state.to_string(),
                "dragging",
            ));
        }
        if !self.predicate.permits(target) {
            debug!("move refused: target outside draggable region");
            return Ok(false);
        }
        self.transition(DragState::Dragging {
            card: card.into(),
            source,
        });
        Ok(true)
    }

    /// Handle a drop signal.
    ///
    /// Passes through `dropped` straight back to `idle` and hands out the
    /// ticket for the drop-cycle. `None` when nothing was being dragged.
    pub fn release(&mut self) -> Option<DropTicket> {
        let previous = std::mem::replace(&mut self.state, DragState::Dropped);
        let DragState::Dragging { card, source } = previous else {
            self.state = DragState::Idle;
            debug!("drop ignored: no drag in progress");
            return None;
        };
        debug!(from = "dragging", to = "dropped", card = %card, "drag transition");
        self.transition(DragState::Idle);
        Some(DropTicket { card, source })
    }

    /// Abandon the drag without a drop-cycle
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            self.transition(DragState::Idle);
        }
    }
}
