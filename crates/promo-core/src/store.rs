//! Persistence seam for the code collection

use crate::code::DiscountCode;
use async_trait::async_trait;

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Durable backend for the code collection.
///
/// Saves are full snapshots: the manager hands over every code it holds and
/// the backend replaces whatever it stored before. A save must be durable
/// before it returns, because the manager reports success to the client as
/// soon as the call comes back.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Load the complete collection, empty if nothing was stored yet
    async fn load(&self) -> Result<Vec<DiscountCode>, StoreError>;

    /// Replace the stored collection with a full snapshot
    async fn save(&self, codes: &[DiscountCode]) -> Result<(), StoreError>;
}
