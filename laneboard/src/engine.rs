//! BoardEngine - owns the board and runs drop-cycles
//!
//! A drop-cycle: capture view order, reconcile, renumber, apply the result
//! locally, put the view back in line with the model, persist, reload.

use crate::classify::classify;
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::persist::{persist, PersistReport};
use crate::plan::{PlanStrategy, Planner};
use crate::reconcile::reconcile;
use crate::session::{DragSession, DropTicket, MovePredicate};
use crate::store::{CardStore, HttpCardStore};
use crate::types::Board;
use crate::view::{ensure_attached, LaneOrder, LaneView};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument};

/// Runtime knobs for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub plan_strategy: PlanStrategy,
    /// Reload from the store even when some updates failed
    pub reload_on_failure: bool,
    pub draggable_class: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            plan_strategy: PlanStrategy::Full,
            reload_on_failure: false,
            draggable_class: MovePredicate::default().class().to_string(),
        }
    }
}

/// How a drop-cycle ended. Never surfaced as an error to the view.
#[derive(Debug)]
pub enum DropOutcome {
    /// Every update was accepted and the authoritative board fetched
    Saved { updated: usize },
    /// At least one update failed. The optimistic board is kept unless
    /// `reloaded` is true.
    SaveFailed {
        report: PersistReport,
        reloaded: bool,
    },
    /// Updates were sent but fetching the authoritative board failed
    ReloadFailed {
        report: PersistReport,
        error: BoardError,
    },
}

impl DropOutcome {
    /// Check whether the store accepted every update
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Exclusive owner of the board state.
///
/// The board is only ever replaced by a reconciliation result or by a
/// classified reload. Persist and reload of overlapping drop-cycles are
/// serialized through a single-slot gate.
pub struct BoardEngine<S> {
    store: S,
    board: RwLock<Board>,
    /// Last board classified from a fetch; what the store is known to hold
    confirmed: RwLock<Board>,
    gate: Mutex<()>,
    generation: AtomicU64,
    planner: Planner,
    options: EngineOptions,
}

impl BoardEngine<HttpCardStore> {
    /// Create an engine talking HTTP to the configured store
    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        let store = HttpCardStore::from_config(config)?;
        Ok(Self::with_options(store, config.engine_options()))
    }
}

impl<S: CardStore> BoardEngine<S> {
    /// Create an engine with default options and an empty board
    pub fn new(store: S) -> Self {
        Self::with_options(store, EngineOptions::default())
    }

    /// Create an engine with explicit options
    pub fn with_options(store: S, options: EngineOptions) -> Self {
        Self {
            store,
            board: RwLock::new(Board::new()),
            confirmed: RwLock::new(Board::new()),
            gate: Mutex::new(()),
            generation: AtomicU64::new(0),
            planner: Planner::new(options.plan_strategy),
            options,
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Engine options
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Copy of the current board
    pub async fn snapshot(&self) -> Board {
        self.board.read().await.clone()
    }

    /// Check the view and hand out a drag session using the configured
    /// draggable class. Fails when any lane container is missing.
    pub fn attach<V: LaneView + ?Sized>(&self, view: &V) -> Result<DragSession> {
        ensure_attached(view)?;
        Ok(DragSession::new(MovePredicate::new(
            self.options.draggable_class.clone(),
        )))
    }

    /// Fetch every card and classify it into a fresh board
    pub async fn load(&self) -> Result<Board> {
        let records = self.store.fetch_all().await?;
        let board = classify(records);
        *self.confirmed.write().await = board.clone();
        let mut current = self.board.write().await;
        *current = board.clone();
        info!(cards = board.len(), "loaded board");
        Ok(board)
    }

    /// Fetch and classify, applying the result only if no newer drop-cycle
    /// has replaced the board since `generation`. The fetched board always
    /// becomes the confirmed one.
    async fn reload(&self, generation: u64) -> Result<Option<Board>> {
        let records = self.store.fetch_all().await?;
        let board = classify(records);
        *self.confirmed.write().await = board.clone();

        let mut current = self.board.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "reload superseded by a newer drop");
            return Ok(None);
        }
        *current = board.clone();
        info!(cards = board.len(), "reloaded board");
        Ok(Some(board))
    }

    /// Run one drop-cycle.
    ///
    /// View order is captured before anything is awaited. The reconciled
    /// board is applied immediately and the view restored to it; failures
    /// after that point are logged and reported in the outcome, and the
    /// optimistic board is not rolled back.
    #[instrument(skip_all, fields(card = %ticket.card(), source = %ticket.source()))]
    pub async fn drop_cycle<V: LaneView + ?Sized>(
        &self,
        ticket: DropTicket,
        view: &mut V,
    ) -> DropOutcome {
        let order = LaneOrder::capture(view);

        let (next, updates, generation) = {
            let mut board = self.board.write().await;
            let mut next = reconcile(&board, &order);
            // diff against what the store holds, not earlier optimistic state
            let confirmed = self.confirmed.read().await;
            let updates = self.planner.plan(&confirmed, &mut next);
            drop(confirmed);
            *board = next.clone();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            (next, updates, generation)
        };
        view.restore(&next);
        debug!(generation, updates = updates.len(), "applied optimistic board");

        let _slot = self.gate.lock().await;
        let report = persist(&self.store, &updates).await;

        if !report.is_success() && !self.options.reload_on_failure {
            return DropOutcome::SaveFailed {
                report,
                reloaded: false,
            };
        }

        match self.reload(generation).await {
            Ok(reloaded) => {
                if let Some(board) = &reloaded {
                    view.restore(board);
                }
                if report.is_success() {
                    DropOutcome::Saved {
                        updated: report.attempted,
                    }
                } else {
                    DropOutcome::SaveFailed {
                        report,
                        reloaded: reloaded.is_some(),
                    }
                }
            }
            Err(error) => {
                error!(error = %error, "failed to reload board after save");
                DropOutcome::ReloadFailed { report, error }
            }
        }
    }
}
