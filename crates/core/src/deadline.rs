// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drift-compensated lease deadline estimation
//!
//! The store's expiry clock and the local clock can diverge, and each round
//! trip consumes time the client cannot observe directly. The estimate
//! subtracts both the measured round trip and a fractional drift margin from
//! the nominal expiry, so a holder never believes it owns a lease the store
//! may already have reclaimed.
//!
//! ```text
//! until = end + expiry - (end - start) - expiry * drift
//! ```

use std::time::{Duration, Instant};

/// Default fraction of the expiry reserved for clock drift
pub const DEFAULT_DRIFT_FACTOR: f64 = 0.05;

/// Margin reserved for drift on a lease of length `expiry`.
///
/// Any positive factor reserves at least one nanosecond, so the estimate
/// stays strictly inside the store's expiry even for tiny leases.
pub fn drift_margin(expiry: Duration, drift_factor: f64) -> Duration {
    if drift_factor.is_nan() || drift_factor <= 0.0 {
        return Duration::ZERO;
    }
    expiry
        .mul_f64(drift_factor.min(1.0))
        .max(Duration::from_nanos(1))
}

/// Estimate the local instant until which a lease can be trusted.
///
/// `start` and `end` bracket the store operation that set the TTL. Returns
/// `None` when the estimate is not strictly after `end`: the store accepted
/// the write but no safe validity window remains. A non-finite drift factor
/// or an unrepresentable deadline also yields `None`.
pub fn estimate_deadline(
    start: Instant,
    end: Instant,
    expiry: Duration,
    drift_factor: f64,
) -> Option<Instant> {
    if !drift_factor.is_finite() {
        return None;
    }
    let round_trip = end.saturating_duration_since(start);
    let margin = round_trip.saturating_add(drift_margin(expiry, drift_factor));

    expiry
        .checked_sub(margin)
        .filter(|window| !window.is_zero())
        .and_then(|window| end.checked_add(window))
}

#[cfg(test)]
#[path = "deadline_tests.rs"]
mod tests;
