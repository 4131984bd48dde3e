//! Code Manager - owns the code collection and drives every mutation

use crate::code::{self, DiscountCode, MAX_CODE_LENGTH, MIN_CODE_LENGTH};
use crate::error::{Error, Result};
use crate::store::CodeStore;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Largest batch a single generate call may request
pub const MAX_BATCH_SIZE: i64 = 2000;

/// Outcome of a redemption attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseOutcome {
    /// The code was fresh and is now marked used; carries the stored form
    Used(String),
    /// No code with this value exists
    NotFound,
    /// The code exists but was redeemed before
    AlreadyUsed,
    /// The submission was empty after trimming
    Missing,
}

/// Collection counters returned by [`CodeManager::stats`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeStats {
    pub total: usize,
    pub used: usize,
}

/// Code state guarded by the manager's mutex
struct State {
    /// Codes in generation order, exactly as persisted
    codes: Vec<DiscountCode>,
    /// Uppercased code values, for collision checks during generation
    issued: HashSet<String>,
}

/// Code manager owns the collection and the store behind it.
///
/// Every mutation runs under one async mutex that stays held across the
/// durable save, so generation and redemption never interleave and a client
/// only sees success once its change is on disk. A failed save rolls the
/// in-memory change back, keeping memory and disk consistent.
pub struct CodeManager {
    state: Mutex<State>,
    store: Arc<dyn CodeStore>,
}

impl CodeManager {
    /// Load the stored collection and build a manager on top of it
    pub async fn open(store: Arc<dyn CodeStore>) -> Result<Self> {
        let codes = store.load().await?;
        let issued = codes.iter().map(|c| c.code.to_uppercase()).collect();

        Ok(Self {
            state: Mutex::new(State { codes, issued }),
            store,
        })
    }

    /// Generate `count` unique codes and persist them.
    ///
    /// `length` fixes the code length to 7 or 8; when `None`, every code
    /// independently picks one of the two. Returns the new codes in
    /// generation order. Nothing is kept if the save fails.
    pub async fn generate(&self, count: i64, length: Option<u8>) -> Result<Vec<String>> {
        if count <= 0 || count > MAX_BATCH_SIZE {
            return Err(Error::InvalidCount(count));
        }
        if let Some(len) = length {
            if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&len) {
                return Err(Error::InvalidLength(len));
            }
        }

        let mut state = self.state.lock().await;
        let checkpoint = state.codes.len();

        let mut generated = Vec::with_capacity(count as usize);
        while generated.len() < count as usize {
            let len = length.unwrap_or_else(code::random_length);
            let candidate = code::random_code(len);

            // Uppercase is the canonical form for collision checks
            if state.issued.insert(candidate.to_uppercase()) {
                state.codes.push(DiscountCode::new(candidate.clone()));
                generated.push(candidate);
            }
        }

        if let Err(e) = self.store.save(&state.codes).await {
            tracing::error!(count = generated.len(), error = %e, "save failed, rolling back generated codes");
            for code in &generated {
                state.issued.remove(&code.to_uppercase());
            }
            state.codes.truncate(checkpoint);
            return Err(e.into());
        }

        tracing::debug!(count = generated.len(), "generated codes");
        Ok(generated)
    }

    /// Redeem a code exactly once.
    ///
    /// The submission is trimmed and matched case-insensitively. A
    /// successful redemption is durable before this returns; a failed save
    /// clears the flag again so the code stays redeemable.
    pub async fn use_code(&self, submitted: &str) -> Result<UseOutcome> {
        let submitted = submitted.trim();
        if submitted.is_empty() {
            return Ok(UseOutcome::Missing);
        }

        let mut state = self.state.lock().await;

        let idx = match state.codes.iter().position(|c| c.matches(submitted)) {
            Some(idx) => idx,
            None => return Ok(UseOutcome::NotFound),
        };

        if state.codes[idx].is_used {
            return Ok(UseOutcome::AlreadyUsed);
        }

        state.codes[idx].is_used = true;

        if let Err(e) = self.store.save(&state.codes).await {
            tracing::error!(code = %state.codes[idx].code, error = %e, "save failed, rolling back redemption");
            state.codes[idx].is_used = false;
            return Err(e.into());
        }

        let stored = state.codes[idx].code.clone();
        tracing::info!(code = %stored, "code redeemed");
        Ok(UseOutcome::Used(stored))
    }

    /// Snapshot of collection counters
    pub async fn stats(&self) -> CodeStats {
        let state = self.state.lock().await;
        CodeStats {
            total: state.codes.len(),
            used: state.codes.iter().filter(|c| c.is_used).count(),
        }
    }
}
