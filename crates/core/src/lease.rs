// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client handle for one claimed item

use crate::clock::{Clock, SystemClock};
use crate::deadline::estimate_deadline;
use crate::error::{LeasePhase, QueueError};
use crate::store::LeaseStore;
use crate::token::Token;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Temporary exclusive ownership of a claimed item
///
/// The lease is only trustworthy while the local clock is before
/// [`Lease::until`]. Store-side ownership is re-checked by every
/// [`Lease::extend`] and [`Lease::release`].
pub struct Lease<S, C = SystemClock> {
    item: String,
    key: String,
    token: Token,
    expiry: Duration,
    drift_factor: f64,
    until: Instant,
    store: S,
    clock: C,
}

impl<S: LeaseStore, C: Clock> Lease<S, C> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        item: String,
        key: String,
        token: Token,
        expiry: Duration,
        drift_factor: f64,
        until: Instant,
        store: S,
        clock: C,
    ) -> Self {
        Self {
            item,
            key,
            token,
            expiry,
            drift_factor,
            until,
            store,
            clock,
        }
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    /// Marker key this lease owns
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub fn drift_factor(&self) -> f64 {
        self.drift_factor
    }

    /// Last computed deadline estimate
    pub fn until(&self) -> Instant {
        self.until
    }

    /// Whether the local clock is still before the deadline estimate.
    ///
    /// This is a local check only; it does not prove the store still holds
    /// the token.
    pub fn is_valid(&self) -> bool {
        self.clock.now() < self.until
    }

    pub fn remaining(&self) -> Duration {
        self.clock.until(self.until)
    }

    /// Renew the store-side expiry and recompute the deadline.
    ///
    /// `Ok(false)` means the marker no longer holds this token and the caller
    /// must stop processing. If the renewal lands but the recomputed deadline
    /// is already past, returns [`QueueError::DeadlineExhausted`].
    pub async fn extend(&mut self) -> Result<bool, QueueError> {
        let start = self.clock.now();
        let held = self
            .store
            .extend_if_owner(&self.key, &self.token, self.expiry)
            .await?;
        if !held {
            debug!(item = %self.item, "extend rejected, lease lost");
            return Ok(false);
        }

        let end = self.clock.now();
        match estimate_deadline(start, end, self.expiry, self.drift_factor) {
            Some(until) => {
                self.until = until;
                Ok(true)
            }
            None => {
                warn!(
                    item = %self.item,
                    elapsed_ms = end.saturating_duration_since(start).as_millis() as u64,
                    "extend exhausted the lease window"
                );
                Err(QueueError::DeadlineExhausted {
                    item: self.item.clone(),
                    phase: LeasePhase::Extend,
                })
            }
        }
    }

    /// Delete the marker if it still holds this token.
    ///
    /// `Ok(false)` means the lease was already lost before release.
    pub async fn release(&self) -> Result<bool, QueueError> {
        let released = self.store.delete_if_owner(&self.key, &self.token).await?;
        if !released {
            debug!(item = %self.item, "release found lease already gone");
        }
        Ok(released)
    }
}

impl<S, C> std::fmt::Debug for Lease<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lease")
            .field("item", &self.item)
            .field("key", &self.key)
            .field("token", &self.token)
            .field("expiry", &self.expiry)
            .field("until", &self.until)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "lease_tests.rs"]
mod tests;
