//! In-memory storage backend

use async_trait::async_trait;
use parking_lot::Mutex;
use promo_core::{CodeStore, DiscountCode, StoreError};

/// In-memory storage backend
///
/// Volatile last-snapshot-wins store, suitable for tests and embedding.
/// Data is lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    snapshot: Mutex<Vec<DiscountCode>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of codes in the last saved snapshot
    pub fn len(&self) -> usize {
        self.snapshot.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CodeStore for MemoryStore {
    async fn load(&self) -> Result<Vec<DiscountCode>, StoreError> {
        Ok(self.snapshot.lock().clone())
    }

    async fn save(&self, codes: &[DiscountCode]) -> Result<(), StoreError> {
        *self.snapshot.lock() = codes.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_empty());

        let codes = vec![DiscountCode::new("ABCDEFG")];
        store.save(&codes).await.unwrap();
        assert_eq!(store.load().await.unwrap(), codes);

        // A later save replaces the snapshot wholesale
        store.save(&[]).await.unwrap();
        assert!(store.is_empty());
    }
}
