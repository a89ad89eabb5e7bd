//! In-memory card store that behaves like the remote one

use super::CardStore;
use crate::error::{BoardError, Result};
use crate::plan::CardUpdate;
use crate::types::{CardId, StoredCard};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// A simulated remote store.
///
/// Updates rewrite the stored record's status and priority. Identifiers
/// passed to [`MemoryCardStore::reject`] fail every update with a 500.
#[derive(Debug, Default)]
pub struct MemoryCardStore {
    cards: Mutex<Vec<StoredCard>>,
    rejected: Mutex<HashSet<CardId>>,
    attempts: Mutex<Vec<CardUpdate>>,
    fetches: AtomicUsize,
}

impl MemoryCardStore {
    /// Create a store holding the given records
    pub fn new(cards: Vec<StoredCard>) -> Self {
        Self {
            cards: Mutex::new(cards),
            ..Self::default()
        }
    }

    /// Make every update for `id` fail
    pub async fn reject(&self, id: impl Into<CardId>) {
        self.rejected.lock().await.insert(id.into());
    }

    /// Stop rejecting updates for `id`
    pub async fn accept(&self, id: &CardId) {
        self.rejected.lock().await.remove(id);
    }

    /// Current stored records
    pub async fn cards(&self) -> Vec<StoredCard> {
        self.cards.lock().await.clone()
    }

    /// Every update attempted so far, including rejected ones
    pub async fn attempts(&self) -> Vec<CardUpdate> {
        self.attempts.lock().await.clone()
    }

    /// Number of completed `fetch_all` calls
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn fetch_all(&self) -> Result<Vec<StoredCard>> {
        let cards = self.cards.lock().await.clone();
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(cards)
    }

    async fn update(&self, update: &CardUpdate) -> Result<()> {
        self.attempts.lock().await.push(update.clone());

        if self.rejected.lock().await.contains(&update.id) {
            return Err(BoardError::rejected(
                500,
                format!("memory://clients/{}", update.id),
                "simulated failure",
            ));
        }

        let mut cards = self.cards.lock().await;
        let card = cards
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or_else(|| BoardError::CardNotFound {
                id: update.id.to_string(),
            })?;
        card.status = update.status.as_str().to_string();
        card.priority = Some(i64::from(update.priority));
        Ok(())
    }
}
