// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test fixtures shared by queue and lease tests

use crate::clock::FakeClock;
use crate::config::QueueConfig;
use crate::queue::Queue;
use crate::store::{LeaseStore, MemoryStore, StoreError};
use crate::token::{SequentialTokenGen, Token};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Store that advances a fake clock before every round trip
#[derive(Clone)]
pub struct SlowStore {
    pub inner: MemoryStore<FakeClock>,
    clock: FakeClock,
    latency: Arc<Mutex<Duration>>,
}

impl SlowStore {
    pub fn new(clock: FakeClock) -> Self {
        Self {
            inner: MemoryStore::with_clock(clock.clone()),
            clock,
            latency: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap_or_else(|e| e.into_inner()) = latency;
    }

    fn round_trip(&self) {
        let latency = *self.latency.lock().unwrap_or_else(|e| e.into_inner());
        self.clock.advance(latency);
    }
}

#[async_trait]
impl LeaseStore for SlowStore {
    async fn push_if_absent(
        &self,
        list: &str,
        marker: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        self.round_trip();
        self.inner.push_if_absent(list, marker, ttl).await
    }

    async fn pop_tail(&self, list: &str) -> Result<Option<String>, StoreError> {
        self.round_trip();
        self.inner.pop_tail(list).await
    }

    async fn claim_if_pending(
        &self,
        marker: &str,
        token: &Token,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        self.round_trip();
        self.inner.claim_if_pending(marker, token, ttl).await
    }

    async fn extend_if_owner(
        &self,
        marker: &str,
        token: &Token,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        self.round_trip();
        self.inner.extend_if_owner(marker, token, ttl).await
    }

    async fn delete_if_owner(&self, marker: &str, token: &Token) -> Result<bool, StoreError> {
        self.round_trip();
        self.inner.delete_if_owner(marker, token).await
    }
}

pub type TestQueue = Queue<SlowStore, FakeClock, SequentialTokenGen>;

/// Queue with a 1s lease and 5% drift over a controllable store
pub fn test_queue() -> (TestQueue, SlowStore, FakeClock) {
    let clock = FakeClock::new();
    let store = SlowStore::new(clock.clone());
    let config = QueueConfig::new("jobs").with_lease_ttl(Duration::from_secs(1));
    let queue = Queue::with_deps(
        store.clone(),
        clock.clone(),
        SequentialTokenGen::new("lease"),
        config,
    )
    .unwrap();
    (queue, store, clock)
}
