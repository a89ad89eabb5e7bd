//! Rebuild authoritative lanes from captured view order

use crate::types::{Board, Card, Status};
use crate::view::LaneOrder;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Rebuild the board from the order the view presents.
///
/// The view decides membership and order; card content comes from `known`.
/// Each card's status is overwritten with the lane it was found in and every
/// other attribute is carried over untouched, including the stale priority.
/// An identifier the board does not know becomes a placeholder with only its
/// id and status. An identifier shown more than once keeps only its first
/// position. Priorities are left to [`crate::plan`].
pub fn reconcile(known: &Board, order: &LaneOrder) -> Board {
    let index = known.index();
    let mut next = Board::new();
    let mut seen = HashSet::new();

    for status in Status::ALL {
        let lane = next.lane_mut(status);
        for id in order.lane(status) {
            if !seen.insert(id) {
                warn!(id = %id, lane = %status, "view shows a card twice, keeping the first");
                continue;
            }
            let card = match index.get(id) {
                Some(card) => Card {
                    status,
                    ..(*card).clone()
                },
                None => {
                    warn!(id = %id, lane = %status, "view shows a card the board does not know");
                    Card::placeholder(id.clone(), status)
                }
            };
            lane.push(card);
        }
    }

    let lost = known.len().saturating_sub(next.len());
    if lost > 0 {
        debug!(lost, "cards missing from the view after reconciliation");
    }
    next
}
