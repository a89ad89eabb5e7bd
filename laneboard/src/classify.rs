//! Partition a flat card collection into the three lanes

use crate::types::{Board, Card, StoredCard};
use tracing::debug;

/// Classify stored records into lanes ordered by ascending priority.
///
/// Records whose status is not one of the three lanes are dropped. Ties keep
/// input order, and cards without a usable priority sort after the rest.
pub fn classify(records: impl IntoIterator<Item = StoredCard>) -> Board {
    let mut board = Board::new();
    let mut dropped = 0usize;

    for record in records {
        match Card::from_stored(record) {
            Some(card) => board.lane_mut(card.status).push(card),
            None => dropped += 1,
        }
    }

    for lane in [&mut board.backlog, &mut board.in_progress, &mut board.complete] {
        // sort_by_key is stable
        lane.sort_by_key(|card| card.priority.unwrap_or(u32::MAX));
    }

    if dropped > 0 {
        debug!(dropped, "dropped cards with unrecognized status");
    }
    debug!(
        backlog = board.backlog.len(),
        in_progress = board.in_progress.len(),
        complete = board.complete.len(),
        "classified cards"
    );
    board
}
