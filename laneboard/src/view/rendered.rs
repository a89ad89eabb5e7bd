//! In-memory rendered board for headless embedding and tests

use super::{LaneView, ViewElement};
use crate::error::{BoardError, Result};
use crate::session::DragTarget;
use crate::types::{Board, Status};

/// Default class carried by every rendered card root
pub const CARD_CLASS: &str = "Card";

/// One rendered card element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl RenderedCard {
    /// A card element carrying the given identifier metadata
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            classes: vec![CARD_CLASS.to_string()],
        }
    }

    /// An element with no identifier metadata (e.g. a drop placeholder)
    pub fn anonymous() -> Self {
        Self {
            id: None,
            classes: Vec::new(),
        }
    }
}

impl ViewElement for RenderedCard {
    fn data_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Three lane containers holding rendered elements.
///
/// [`RenderedBoard::move_card`] mutates presentation order the way a drag
/// library does, behind the model's back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBoard {
    backlog: Option<Vec<RenderedCard>>,
    in_progress: Option<Vec<RenderedCard>>,
    complete: Option<Vec<RenderedCard>>,
    renders: usize,
}

impl RenderedBoard {
    /// A view with no lane containers attached
    pub fn detached() -> Self {
        Self::default()
    }

    /// Render a board into freshly attached containers
    pub fn from_board(board: &Board) -> Self {
        let mut view = Self::detached();
        view.restore(board);
        view.renders = 0;
        view
    }

    fn slot(&self, lane: Status) -> &Option<Vec<RenderedCard>> {
        match lane {
            Status::Backlog => &self.backlog,
            Status::InProgress => &self.in_progress,
            Status::Complete => &self.complete,
        }
    }

    fn slot_mut(&mut self, lane: Status) -> &mut Option<Vec<RenderedCard>> {
        match lane {
            Status::Backlog => &mut self.backlog,
            Status::InProgress => &mut self.in_progress,
            Status::Complete => &mut self.complete,
        }
    }

    /// Detach a lane container
    pub fn detach(&mut self, lane: Status) {
        *self.slot_mut(lane) = None;
    }

    /// Append an arbitrary element to an attached lane
    pub fn insert_element(&mut self, lane: Status, element: RenderedCard) {
        if let Some(children) = self.slot_mut(lane) {
            children.push(element);
        }
    }

    /// Move a rendered element between (or within) lanes.
    ///
    /// `to_index` is clamped to the end of the target lane.
    pub fn move_card(
        &mut self,
        from: Status,
        from_index: usize,
        to: Status,
        to_index: usize,
    ) -> Result<()> {
        let detached = |lane: Status| BoardError::DetachedLanes {
            missing: vec![lane],
        };

        if self.slot(to).is_none() {
            return Err(detached(to));
        }
        let source = self.slot_mut(from).as_mut().ok_or_else(|| detached(from))?;
        if from_index >= source.len() {
            return Err(BoardError::CardNotFound {
                id: format!("{from}[{from_index}]"),
            });
        }
        let element = source.remove(from_index);

        let target = self.slot_mut(to).as_mut().ok_or_else(|| detached(to))?;
        let index = to_index.min(target.len());
        target.insert(index, element);
        Ok(())
    }

    /// Identifiers presented in a lane, for assertions
    pub fn ids(&self, lane: Status) -> Vec<&str> {
        self.slot(lane)
            .iter()
            .flatten()
            .filter_map(|element| element.id.as_deref())
            .collect()
    }

    /// Number of model-driven renders since construction
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl LaneView for RenderedBoard {
    type Element = RenderedCard;

    fn children(&self, lane: Status) -> Option<&[RenderedCard]> {
        self.slot(lane).as_deref()
    }

    fn restore(&mut self, board: &Board) {
        for (lane, cards) in board.lanes() {
            let rendered = cards
                .iter()
                .map(|card| RenderedCard::new(card.id.as_str()))
                .collect();
            *self.slot_mut(lane) = Some(rendered);
        }
        self.renders += 1;
    }
}

/// An event target inside the rendered board.
///
/// `ancestors` lists the class sets from the target up to the root; `None`
/// models an environment without region hit-testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTarget {
    pub classes: Vec<String>,
    pub ancestors: Option<Vec<Vec<String>>>,
}

impl RenderedTarget {
    /// A target carrying the given classes and no ancestors
    pub fn with_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            ancestors: Some(Vec::new()),
        }
    }

    /// Nest the target inside an element carrying `classes`
    pub fn inside<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parent = classes.into_iter().map(Into::into).collect();
        self.ancestors.get_or_insert_with(Vec::new).push(parent);
        self
    }

    /// Drop hit-testing support from the target
    pub fn without_hit_testing(mut self) -> Self {
        self.ancestors = None;
        self
    }
}

impl DragTarget for RenderedTarget {
    fn closest(&self, class: &str) -> Option<bool> {
        let ancestors = self.ancestors.as_ref()?;
        Some(
            self.has_class(class)
                || ancestors
                    .iter()
                    .any(|classes| classes.iter().any(|c| c == class)),
        )
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
