// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for queue and lease operations
//!
//! Contention outcomes (duplicate push, empty pop, lost lease) are not
//! errors; they come back as `Ok(false)` or `Ok(None)`.

use crate::store::StoreError;
use thiserror::Error;

/// Store operation that set a lease's expiry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeasePhase {
    Claim,
    Extend,
}

impl std::fmt::Display for LeasePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeasePhase::Claim => write!(f, "claim"),
            LeasePhase::Extend => write!(f, "extend"),
        }
    }
}

/// Errors from queue and lease operations
#[derive(Debug, Error)]
pub enum QueueError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("push ttl must be greater than zero")]
    InvalidTtl,
    /// The store accepted the write but no safe validity window remains.
    /// The caller must stop working on the item.
    #[error("lease on {item} has no safe deadline left after {phase}")]
    DeadlineExhausted { item: String, phase: LeasePhase },
}
