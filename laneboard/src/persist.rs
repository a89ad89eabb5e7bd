//! Send a batch of card updates to the store

use crate::error::BoardError;
use crate::plan::CardUpdate;
use crate::store::CardStore;
use crate::types::CardId;
use futures::future::join_all;
use tracing::{error, info, warn};

/// One card update the store did not accept
#[derive(Debug)]
pub struct UpdateFailure {
    pub id: CardId,
    pub error: BoardError,
}

/// Result of persisting one batch
#[derive(Debug, Default)]
pub struct PersistReport {
    pub attempted: usize,
    pub failures: Vec<UpdateFailure>,
}

impl PersistReport {
    /// Check whether every update succeeded
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of updates the store accepted
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }
}

/// Issue every update concurrently and wait for all of them.
///
/// All requests are in flight before any result is known, so one failure
/// never stops the others. Failures are logged and reported, never retried.
pub async fn persist<S: CardStore + ?Sized>(store: &S, updates: &[CardUpdate]) -> PersistReport {
    let results = join_all(updates.iter().map(|update| store.update(update))).await;

    let failures: Vec<UpdateFailure> = updates
        .iter()
        .zip(results)
        .filter_map(|(update, result)| {
            result.err().map(|error| {
                warn!(id = %update.id, error = %error, "card update failed");
                UpdateFailure {
                    id: update.id.clone(),
                    error,
                }
            })
        })
        .collect();

    let report = PersistReport {
        attempted: updates.len(),
        failures,
    };

    if report.is_success() {
        info!(updated = report.attempted, "saved board");
    } else {
        error!(
            failed = report.failures.len(),
            attempted = report.attempted,
            "failed to save board state; local board may differ from the store until the next reload"
        );
    }
    report
}
