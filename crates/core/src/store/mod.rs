// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic store adapter
//!
//! The queue delegates all mutual exclusion to the store. Each compound
//! operation below must run as one indivisible step per key; the client
//! holds no locks of its own.

mod memory;

pub use memory::{MarkerState, MemoryStore, StoreCall};

use crate::token::Token;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Marker value for an item that is queued but not yet claimed
pub const PENDING: &str = "1";

/// Errors communicating with the store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store connection failed: {0}")]
    Connection(String),
    #[error("store command failed: {0}")]
    Command(String),
    #[error("unexpected store reply: {0}")]
    Reply(String),
}

/// Compound operations the queue needs from a key-value store
#[async_trait]
pub trait LeaseStore: Clone + Send + Sync + 'static {
    /// If `marker` is absent, push it onto the head of `list` and set it to
    /// [`PENDING`] with expiry `ttl`. Returns `false` if the marker exists.
    async fn push_if_absent(
        &self,
        list: &str,
        marker: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError>;

    /// Remove and return the entry at the tail of `list`
    async fn pop_tail(&self, list: &str) -> Result<Option<String>, StoreError>;

    /// If `marker` holds [`PENDING`], overwrite it with `token` and reset its
    /// expiry to `ttl`. Returns `false` if the marker changed or vanished.
    async fn claim_if_pending(
        &self,
        marker: &str,
        token: &Token,
        ttl: Duration,
    ) -> Result<bool, StoreError>;

    /// If `marker` holds `token`, reset its expiry to `ttl`
    async fn extend_if_owner(
        &self,
        marker: &str,
        token: &Token,
        ttl: Duration,
    ) -> Result<bool, StoreError>;

    /// If `marker` holds `token`, delete it
    async fn delete_if_owner(&self, marker: &str, token: &Token) -> Result<bool, StoreError>;
}
