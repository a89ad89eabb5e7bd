//! The seam between the rendered board and the engine.
//!
//! The drag library reorders rendered elements in place before the engine
//! hears about a drop. Extraction reads that live presentation order back
//! into identifiers; [`LaneView::restore`] then throws the imperative
//! mutation away so only the model-driven render survives.

mod rendered;

pub use rendered::{RenderedBoard, RenderedCard, RenderedTarget, CARD_CLASS};

use crate::error::{BoardError, Result};
use crate::types::{Board, CardId, Status};
use tracing::{debug, error};

/// A rendered card root element
pub trait ViewElement {
    /// Identifier metadata attached to the element, if any
    fn data_id(&self) -> Option<&str>;
}

/// A rendered board with one container per lane
pub trait LaneView {
    type Element: ViewElement;

    /// Elements currently presented in a lane, in presentation order.
    /// `None` when the lane container is not attached yet.
    fn children(&self, lane: Status) -> Option<&[Self::Element]>;

    /// Discard whatever the drag library did and present exactly `board`.
    fn restore(&mut self, board: &Board);
}

/// Read the live identifier order of one lane.
///
/// An unattached lane yields an empty sequence.
pub fn extract_lane<V: LaneView + ?Sized>(view: &V, lane: Status) -> Vec<CardId> {
    let Some(children) = view.children(lane) else {
        debug!(lane = %lane, "lane container not attached, treating as empty");
        return Vec::new();
    };

    children
        .iter()
        .enumerate()
        .filter_map(|(position, element)| match element.data_id() {
            Some(id) => Some(CardId::from(id)),
            None => {
                debug!(lane = %lane, position, "skipping element without card id");
                None
            }
        })
        .collect()
}

/// Identifier order for every lane, captured at a single moment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneOrder {
    pub backlog: Vec<CardId>,
    pub in_progress: Vec<CardId>,
    pub complete: Vec<CardId>,
}

impl LaneOrder {
    /// Capture the current presentation order of all lanes
    pub fn capture<V: LaneView + ?Sized>(view: &V) -> Self {
        Self {
            backlog: extract_lane(view, Status::Backlog),
            in_progress: extract_lane(view, Status::InProgress),
            complete: extract_lane(view, Status::Complete),
        }
    }

    /// Identifiers captured for one lane
    pub fn lane(&self, status: Status) -> &[CardId] {
        match status {
            Status::Backlog => &self.backlog,
            Status::InProgress => &self.in_progress,
            Status::Complete => &self.complete,
        }
    }

    /// Order of each lane of an existing board
    pub fn of_board(board: &Board) -> Self {
        let ids = |status: Status| -> Vec<CardId> {
            board.lane(status).iter().map(|c| c.id.clone()).collect()
        };
        Self {
            backlog: ids(Status::Backlog),
            in_progress: ids(Status::InProgress),
            complete: ids(Status::Complete),
        }
    }
}

/// Check at setup that every lane container is attached.
///
/// Logs one error naming the missing lanes when any are absent.
pub fn ensure_attached<V: LaneView + ?Sized>(view: &V) -> Result<()> {
    let missing: Vec<Status> = Status::ALL
        .into_iter()
        .filter(|lane| view.children(*lane).is_none())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let err = BoardError::DetachedLanes { missing };
    error!("{err}; drag handling not installed");
    Err(err)
}
