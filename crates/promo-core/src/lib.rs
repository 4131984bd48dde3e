//! Promo Core - Code Generation and Redemption Engine
//!
//! This crate provides the core functionality for Promo:
//! - Unique discount code generation from a restricted alphabet
//! - Exactly-once redemption with rollback on failed saves
//! - The `CodeStore` persistence seam, implemented by promo-store

pub mod code;
pub mod error;
pub mod manager;
pub mod store;

pub use code::{DiscountCode, CODE_ALPHABET, MAX_CODE_LENGTH, MIN_CODE_LENGTH};
pub use error::{Error, Result};
pub use manager::{CodeManager, CodeStats, UseOutcome, MAX_BATCH_SIZE};
pub use store::{CodeStore, StoreError};
