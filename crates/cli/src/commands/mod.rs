// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod demo;
pub mod pop;
pub mod push;

use std::future::Future;
use std::time::Duration;

/// Bound a single store round trip.
///
/// On timeout the store-side effect is indeterminate: the write may or may
/// not have landed.
pub async fn bounded<T, E>(
    timeout: Duration,
    op: &str,
    fut: impl Future<Output = Result<T, E>>,
) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => Ok(result?),
        Err(_) => anyhow::bail!(
            "{} timed out after {}; store state is indeterminate",
            op,
            humantime::format_duration(timeout)
        ),
    }
}

/// Parse a TTL flag, rejecting zero
pub fn parse_ttl(value: &str) -> Result<Duration, String> {
    let ttl = humantime::parse_duration(value).map_err(|e| e.to_string())?;
    if ttl.is_zero() {
        return Err("ttl must be greater than zero".to_string());
    }
    Ok(ttl)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
