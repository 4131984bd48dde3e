//! Error types for Promo Core

use crate::store::StoreError;
use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid code count: {0}")]
    InvalidCount(i64),

    #[error("Invalid code length: {0}")]
    InvalidLength(u8),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for Promo Core operations
pub type Result<T> = std::result::Result<T, Error>;
