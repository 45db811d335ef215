// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lease-based work queue
//!
//! Producers [`Queue::push`] item identifiers; consumers [`Queue::pop`] them
//! and receive a [`Lease`] that must be extended while the work runs and
//! released when it is done.
//!
//! Delivery is at-most-one-claimant, possibly-zero: pop removes the list
//! entry before claiming its marker, so if the marker changed in between (a
//! concurrent claim, or a TTL lapse while the entry sat in the list) the
//! entry is gone and pop reports an empty result. The item is not re-queued.

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, QueueConfig};
use crate::deadline::estimate_deadline;
use crate::error::{LeasePhase, QueueError};
use crate::keys::QueueKeys;
use crate::lease::Lease;
use crate::store::{LeaseStore, StoreError};
use crate::token::{TokenGen, UuidTokenGen};
use std::time::Duration;
use tracing::{debug, warn};

/// A named queue over a shared store
#[derive(Clone)]
pub struct Queue<S, C = SystemClock, G = UuidTokenGen> {
    name: String,
    keys: QueueKeys,
    store: S,
    clock: C,
    tokens: G,
    lease_ttl: Duration,
    drift_factor: f64,
}

impl<S: LeaseStore> Queue<S> {
    /// Queue using the system clock and random tokens
    pub fn new(store: S, config: QueueConfig) -> Result<Self, ConfigError> {
        Self::with_deps(store, SystemClock, UuidTokenGen, config)
    }
}

impl<S: LeaseStore, C: Clock, G: TokenGen> Queue<S, C, G> {
    pub fn with_deps(
        store: S,
        clock: C,
        tokens: G,
        config: QueueConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            keys: QueueKeys::new(&config.name),
            name: config.name,
            store,
            clock,
            tokens,
            lease_ttl: config.lease_ttl,
            drift_factor: config.drift_factor,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keys(&self) -> &QueueKeys {
        &self.keys
    }

    pub fn lease_ttl(&self) -> Duration {
        self.lease_ttl
    }

    pub fn drift_factor(&self) -> f64 {
        self.drift_factor
    }

    /// Enqueue `item` unless an instance of it is already pending or claimed.
    ///
    /// The pending marker expires after `ttl` if nobody claims it. Returns
    /// `Ok(false)` for a duplicate; the caller should back off and retry.
    pub async fn push(&self, item: &str, ttl: Duration) -> Result<bool, QueueError> {
        if ttl.is_zero() {
            return Err(QueueError::InvalidTtl);
        }

        let marker = self.keys.marker(item);
        let accepted = self
            .store
            .push_if_absent(self.keys.list(), &marker, ttl)
            .await?;

        if !accepted {
            debug!(queue = %self.name, item, "push rejected, item already outstanding");
        }
        Ok(accepted)
    }

    /// Claim the oldest pending item.
    ///
    /// `Ok(None)` covers both an empty queue and a lost claim. A claim that
    /// lands but leaves no safe validity window fails with
    /// [`QueueError::DeadlineExhausted`]; the marker then lapses store-side.
    pub async fn pop(&self) -> Result<Option<Lease<S, C>>, QueueError> {
        let start = self.clock.now();
        let token = self.tokens.next();

        let Some(marker) = self.store.pop_tail(self.keys.list()).await? else {
            debug!(queue = %self.name, "queue empty");
            return Ok(None);
        };

        let item = self
            .keys
            .item_of(&marker)
            .ok_or_else(|| {
                StoreError::Reply(format!(
                    "list entry {} does not belong to queue {}",
                    marker, self.name
                ))
            })?
            .to_string();

        let claimed = self
            .store
            .claim_if_pending(&marker, &token, self.lease_ttl)
            .await?;
        if !claimed {
            debug!(queue = %self.name, item = %item, "claim lost, marker no longer pending");
            return Ok(None);
        }

        let end = self.clock.now();
        let Some(until) = estimate_deadline(start, end, self.lease_ttl, self.drift_factor) else {
            warn!(
                queue = %self.name,
                item = %item,
                elapsed_ms = end.saturating_duration_since(start).as_millis() as u64,
                "claim exhausted the lease window"
            );
            return Err(QueueError::DeadlineExhausted {
                item,
                phase: LeasePhase::Claim,
            });
        };

        debug!(queue = %self.name, item = %item, %token, "claimed");
        Ok(Some(Lease::new(
            item,
            marker,
            token,
            self.lease_ttl,
            self.drift_factor,
            until,
            self.store.clone(),
            self.clock.clone(),
        )))
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
