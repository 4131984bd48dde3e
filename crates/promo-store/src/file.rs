//! JSON file storage backend

use async_trait::async_trait;
use promo_core::{CodeStore, DiscountCode, StoreError};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// JSON file storage backend
///
/// Persists the full code collection as a pretty-printed JSON array. Every
/// save writes a sibling `<file>.tmp` first, fsyncs it, then renames it over
/// the target, so a crash mid-write never leaves a half-written file behind.
pub struct JsonFileStore {
    path: PathBuf,
    tmp_path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tmp_path = tmp_sibling(&path);
        Self { path, tmp_path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}

#[async_trait]
impl CodeStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<DiscountCode>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn save(&self, codes: &[DiscountCode]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(codes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut file = tokio::fs::File::create(&self.tmp_path).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&self.tmp_path, &self.path).await?;

        tracing::trace!(path = %self.path.display(), count = codes.len(), "snapshot saved");
        Ok(())
    }
}
