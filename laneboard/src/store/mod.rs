//! The remote card store.
//!
//! The store owns the only durable state: each card's identifier, status and
//! priority. The engine fetches everything at once and updates cards one by
//! one; every update carries the full desired state so it is idempotent.

mod http;
mod memory;

pub use http::HttpCardStore;
pub use memory::MemoryCardStore;

use crate::error::Result;
use crate::plan::CardUpdate;
use crate::types::StoredCard;
use async_trait::async_trait;
use std::sync::Arc;

/// Access to the remote store
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Fetch every card. No paging, no filtering.
    async fn fetch_all(&self) -> Result<Vec<StoredCard>>;

    /// Set one card's status and priority
    async fn update(&self, update: &CardUpdate) -> Result<()>;
}

#[async_trait]
impl<S: CardStore + ?Sized> CardStore for Arc<S> {
    async fn fetch_all(&self) -> Result<Vec<StoredCard>> {
        (**self).fetch_all().await
    }

    async fn update(&self, update: &CardUpdate) -> Result<()> {
        (**self).update(update).await
    }
}
