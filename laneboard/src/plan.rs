//! Turn a reconciled board into per-card store updates

use crate::types::{Board, CardId, Status};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// The full desired state of one card in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardUpdate {
    #[serde(skip)]
    pub id: CardId,
    pub status: Status,
    pub priority: u32,
}

impl CardUpdate {
    /// Create an update record
    pub fn new(id: impl Into<CardId>, status: Status, priority: u32) -> Self {
        Self {
            id: id.into(),
            status,
            priority,
        }
    }
}

/// Which cards a plan sends to the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStrategy {
    /// Resend every card on every drop
    #[default]
    Full,
    /// Only cards whose status or priority differs from the board before the drop
    Changed,
}

/// Assign `priority = index + 1` in every lane
pub fn assign_priorities(board: &mut Board) {
    for status in Status::ALL {
        for (index, card) in board.lane_mut(status).iter_mut().enumerate() {
            card.priority = Some(index as u32 + 1);
        }
    }
}

/// Renumber `board` and emit one update per card, lane by lane.
pub fn plan_updates(board: &mut Board) -> Vec<CardUpdate> {
    assign_priorities(board);
    board
        .cards()
        .map(|card| CardUpdate {
            id: card.id.clone(),
            status: card.status,
            priority: card.priority.unwrap_or_default(),
        })
        .collect()
}

/// Plans updates according to a [`PlanStrategy`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    strategy: PlanStrategy,
}

impl Planner {
    /// Create a planner for the given strategy
    pub fn new(strategy: PlanStrategy) -> Self {
        Self { strategy }
    }

    /// The configured strategy
    pub fn strategy(&self) -> PlanStrategy {
        self.strategy
    }

    /// Renumber `next` and return the updates that bring the store in line.
    ///
    /// `previous` is the board the store last confirmed; only
    /// [`PlanStrategy::Changed`] looks at it. Cards whose earlier updates
    /// failed still differ from it and are sent again.
    pub fn plan(&self, previous: &Board, next: &mut Board) -> Vec<CardUpdate> {
        let updates = plan_updates(next);
        match self.strategy {
            PlanStrategy::Full => updates,
            PlanStrategy::Changed => {
                let before: HashMap<&CardId, (Status, Option<u32>)> = previous
                    .cards()
                    .map(|card| (&card.id, (card.status, card.priority)))
                    .collect();
                let total = updates.len();
                let changed: Vec<CardUpdate> = updates
                    .into_iter()
                    .filter(|u| before.get(&u.id) != Some(&(u.status, Some(u.priority))))
                    .collect();
                debug!(total, changed = changed.len(), "planned changed cards only");
                changed
            }
        }
    }
}
