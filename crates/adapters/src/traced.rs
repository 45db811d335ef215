// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced store wrapper for consistent observability

use async_trait::async_trait;
use leaseq_core::store::{LeaseStore, StoreError};
use leaseq_core::Token;
use std::time::{Duration, Instant};
use tracing::Instrument;

/// Wrapper that adds tracing to any LeaseStore
#[derive(Clone)]
pub struct TracedStore<S> {
    inner: S,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

fn log_outcome(op: &'static str, started: Instant, result: &Result<bool, StoreError>) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(true) => tracing::debug!(elapsed_ms, "{} applied", op),
        Ok(false) => tracing::debug!(elapsed_ms, "{} rejected", op),
        Err(e) => tracing::error!(elapsed_ms, error = %e, "{} failed", op),
    }
}

#[async_trait]
impl<S: LeaseStore> LeaseStore for TracedStore<S> {
    async fn push_if_absent(
        &self,
        list: &str,
        marker: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let span = tracing::info_span!("store.push", list, marker);
        async {
            tracing::debug!(ttl_ms = ttl.as_millis() as u64, "pushing");
            let started = Instant::now();
            let result = self.inner.push_if_absent(list, marker, ttl).await;
            log_outcome("push", started, &result);
            result
        }
        .instrument(span)
        .await
    }

    async fn pop_tail(&self, list: &str) -> Result<Option<String>, StoreError> {
        let span = tracing::info_span!("store.pop", list);
        async {
            let started = Instant::now();
            let result = self.inner.pop_tail(list).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match &result {
                Ok(Some(marker)) => tracing::debug!(elapsed_ms, marker = %marker, "popped"),
                Ok(None) => tracing::trace!(elapsed_ms, "list empty"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "pop failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn claim_if_pending(
        &self,
        marker: &str,
        token: &Token,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let span = tracing::info_span!("store.claim", marker, %token);
        async {
            let started = Instant::now();
            let result = self.inner.claim_if_pending(marker, token, ttl).await;
            log_outcome("claim", started, &result);
            result
        }
        .instrument(span)
        .await
    }

    async fn extend_if_owner(
        &self,
        marker: &str,
        token: &Token,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let span = tracing::info_span!("store.extend", marker, %token);
        async {
            let started = Instant::now();
            let result = self.inner.extend_if_owner(marker, token, ttl).await;
            // a rejected extend means the holder lost its lease
            if matches!(result, Ok(false)) {
                tracing::warn!("extend rejected, token no longer owns marker");
            }
            log_outcome("extend", started, &result);
            result
        }
        .instrument(span)
        .await
    }

    async fn delete_if_owner(&self, marker: &str, token: &Token) -> Result<bool, StoreError> {
        let span = tracing::info_span!("store.release", marker, %token);
        async {
            let started = Instant::now();
            let result = self.inner.delete_if_owner(marker, token).await;
            log_outcome("release", started, &result);
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
