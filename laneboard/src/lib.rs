//! Lane reconciliation and persistence engine for a three-lane task board
//!
//! Cards flow through three ordered lanes (`backlog`, `in-progress`,
//! `complete`). A drag library reorders the rendered board directly; this
//! crate turns that mutation back into an authoritative, densely numbered
//! board, sends the result to the remote store, and reloads.
//!
//! ## Overview
//!
//! - **Classify** - partition fetched cards into lanes by ascending priority
//! - **Extract** - read the live presentation order out of the view
//! - **Reconcile** - rebuild lanes from that order, overwriting status
//! - **Plan** - renumber each lane `1..n` and emit per-card updates
//! - **Persist** - send all updates concurrently, then reload on success
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use laneboard::{BoardConfig, BoardEngine, RenderedBoard, RenderedTarget, Status};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = BoardEngine::from_config(&BoardConfig::load()?)?;
//! let board = engine.load().await?;
//!
//! let mut view = RenderedBoard::from_board(&board);
//! let mut session = engine.attach(&view)?;
//!
//! // the drag library reports a move-start on a card, then mutates the view
//! let target = RenderedTarget::with_classes(["Card"]);
//! if session.begin("42", Status::Backlog, Some(&target))? {
//!     view.move_card(Status::Backlog, 0, Status::InProgress, 0)?;
//!     if let Some(ticket) = session.release() {
//!         let outcome = engine.drop_cycle(ticket, &mut view).await;
//!         println!("saved: {}", outcome.is_saved());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Failures while saving are logged through `tracing` and reported in the
//! returned [`DropOutcome`]; they are never retried and the optimistic board
//! is not rolled back.

pub mod classify;
pub mod config;
mod engine;
mod error;
pub mod persist;
pub mod plan;
pub mod reconcile;
pub mod session;
pub mod store;
pub mod types;
pub mod view;

pub use classify::classify;
pub use config::BoardConfig;
pub use engine::{BoardEngine, DropOutcome, EngineOptions};
pub use error::{BoardError, Result};
pub use persist::{persist, PersistReport, UpdateFailure};
pub use plan::{plan_updates, CardUpdate, PlanStrategy, Planner};
pub use reconcile::reconcile;
pub use session::{DragSession, DragState, DragTarget, DropTicket, MovePredicate};
pub use store::{CardStore, HttpCardStore, MemoryCardStore};
pub use types::{Board, Card, CardId, Status, StoredCard};
pub use view::{LaneOrder, LaneView, RenderedBoard, RenderedCard, RenderedTarget, ViewElement};
