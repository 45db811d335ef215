// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! leaseq-core: exclusive, lease-based work queue over a shared store
//!
//! This crate provides:
//! - [`Queue`] for pushing items and claiming them as leases
//! - [`Lease`] with token-fenced extend and release
//! - Drift-compensated deadline estimation
//! - The [`LeaseStore`] trait and an in-process [`MemoryStore`]

pub mod clock;
pub mod config;
pub mod deadline;
pub mod error;
pub mod keys;
pub mod lease;
pub mod queue;
pub mod store;
pub mod token;

#[cfg(test)]
mod testing;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, QueueConfig, DEFAULT_LEASE_TTL, MIN_LEASE_TTL};
pub use deadline::{estimate_deadline, DEFAULT_DRIFT_FACTOR};
pub use error::{LeasePhase, QueueError};
pub use keys::QueueKeys;
pub use lease::Lease;
pub use queue::Queue;
pub use store::{LeaseStore, MarkerState, MemoryStore, StoreCall, StoreError, PENDING};
pub use token::{SequentialTokenGen, Token, TokenGen, UuidTokenGen};
