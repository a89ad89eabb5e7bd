//! Board state: the three lanes together

use super::card::{Card, CardId, Status};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The three ordered lanes of the board.
///
/// Every card identifier appears in exactly one lane. The board has no
/// identity of its own; it is always derived from the last fetch or the last
/// reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub backlog: Vec<Card>,
    #[serde(default, rename = "in-progress")]
    pub in_progress: Vec<Card>,
    #[serde(default)]
    pub complete: Vec<Card>,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards in a lane, in display order
    pub fn lane(&self, status: Status) -> &[Card] {
        match status {
            Status::Backlog => &self.backlog,
            Status::InProgress => &self.in_progress,
            Status::Complete => &self.complete,
        }
    }

    /// Mutable access to a lane
    pub fn lane_mut(&mut self, status: Status) -> &mut Vec<Card> {
        match status {
            Status::Backlog => &mut self.backlog,
            Status::InProgress => &mut self.in_progress,
            Status::Complete => &mut self.complete,
        }
    }

    /// Iterate lanes in board order
    pub fn lanes(&self) -> impl Iterator<Item = (Status, &[Card])> + '_ {
        Status::ALL.into_iter().map(move |status| (status, self.lane(status)))
    }

    /// Iterate all cards in board order
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.backlog
            .iter()
            .chain(self.in_progress.iter())
            .chain(self.complete.iter())
    }

    /// Total number of cards across lanes
    pub fn len(&self) -> usize {
        self.backlog.len() + self.in_progress.len() + self.complete.len()
    }

    /// Check whether every lane is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Card identifiers in board order
    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards().map(|c| c.id.clone()).collect()
    }

    /// Find a card by identifier
    pub fn find(&self, id: &CardId) -> Option<&Card> {
        self.cards().find(|c| &c.id == id)
    }

    /// Build an identifier lookup across all lanes.
    ///
    /// If an identifier appears twice (which the engine never produces) the
    /// first occurrence in board order wins.
    pub fn index(&self) -> HashMap<CardId, &Card> {
        let mut index = HashMap::with_capacity(self.len());
        for card in self.cards() {
            index.entry(card.id.clone()).or_insert(card);
        }
        index
    }

    /// Lane order as plain identifiers, handy for assertions and logs
    pub fn lane_ids(&self, status: Status) -> Vec<&str> {
        self.lane(status).iter().map(|c| c.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        Board {
            backlog: vec![
                Card::new("a", Status::Backlog, Some(1)),
                Card::new("b", Status::Backlog, Some(2)),
            ],
            in_progress: vec![Card::new("c", Status::InProgress, Some(1))],
            complete: vec![],
        }
    }

    #[test]
    fn test_lanes_in_board_order() {
        let board = sample();
        let order: Vec<Status> = board.lanes().map(|(s, _)| s).collect();
        assert_eq!(order, Status::ALL.to_vec());
        assert_eq!(board.card_ids(), vec!["a".into(), "b".into(), "c".into()]);
    }

    #[test]
    fn test_len_and_find() {
        let board = sample();
        assert_eq!(board.len(), 3);
        assert!(!board.is_empty());
        assert_eq!(
            board.find(&"c".into()).map(|c| c.status),
            Some(Status::InProgress)
        );
        assert!(board.find(&"zzz".into()).is_none());
        assert!(Board::new().is_empty());
    }

    #[test]
    fn test_index_covers_every_card() {
        let board = sample();
        let index = board.index();
        assert_eq!(index.len(), 3);
        assert_eq!(index[&CardId::from("b")].priority, Some(2));
    }

    #[test]
    fn test_serializes_with_wire_lane_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("in-progress").is_some());
        assert_eq!(json["backlog"][1]["id"], "b");
    }
}
