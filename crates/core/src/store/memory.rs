// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process store
//!
//! Keeps markers and lists behind a single mutex, so every compound operation
//! is one critical section. Expiry is evaluated lazily against the injected
//! clock, which lets tests drive TTL lapses with a [`crate::FakeClock`].
//! Every push also sweeps expired markers, so keys that are never touched
//! again do not accumulate.

use super::{LeaseStore, StoreError, PENDING};
use crate::clock::{Clock, SystemClock};
use crate::token::Token;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Observed state of a marker key
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkerState {
    Absent,
    Pending,
    Claimed(Token),
}

/// Recorded store operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreCall {
    Push {
        list: String,
        marker: String,
        ttl: Duration,
    },
    Pop {
        list: String,
    },
    Claim {
        marker: String,
        token: Token,
        ttl: Duration,
    },
    Extend {
        marker: String,
        token: Token,
        ttl: Duration,
    },
    Delete {
        marker: String,
        token: Token,
    },
}

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct State {
    markers: HashMap<String, Entry>,
    lists: HashMap<String, VecDeque<String>>,
    calls: Vec<StoreCall>,
}

impl State {
    /// Current marker value, dropping it first if it has expired
    fn live(&mut self, marker: &str, now: Instant) -> Option<&mut Entry> {
        if self
            .markers
            .get(marker)
            .is_some_and(|entry| entry.expires_at <= now)
        {
            self.markers.remove(marker);
        }
        self.markers.get_mut(marker)
    }

    fn sweep(&mut self, now: Instant) {
        self.markers.retain(|_, entry| entry.expires_at > now);
    }
}

fn expiry(now: Instant, ttl: Duration) -> Result<Instant, StoreError> {
    now.checked_add(ttl)
        .ok_or_else(|| StoreError::Command(format!("ttl {:?} is out of range", ttl)))
}

/// Store backed by process memory
#[derive(Clone)]
pub struct MemoryStore<C: Clock = SystemClock> {
    state: Arc<Mutex<State>>,
    clock: C,
}

impl MemoryStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Inspect a marker without mutating anything but expired entries
    pub fn marker(&self, marker: &str) -> MarkerState {
        let now = self.clock.now();
        match self.lock().live(marker, now) {
            None => MarkerState::Absent,
            Some(entry) if entry.value == PENDING => MarkerState::Pending,
            Some(entry) => MarkerState::Claimed(Token(entry.value.clone())),
        }
    }

    /// Remaining store-side TTL of a marker
    pub fn ttl(&self, marker: &str) -> Option<Duration> {
        let now = self.clock.now();
        self.lock()
            .live(marker, now)
            .map(|entry| entry.expires_at.saturating_duration_since(now))
    }

    /// Number of entries in a list
    pub fn list_len(&self, list: &str) -> usize {
        self.lock().lists.get(list).map_or(0, VecDeque::len)
    }

    /// Number of markers held, including expired ones not yet swept
    pub fn marker_count(&self) -> usize {
        self.lock().markers.len()
    }

    /// Overwrite a marker directly, bypassing the protocol
    pub fn set_marker(
        &self,
        marker: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let expires_at = expiry(self.clock.now(), ttl)?;
        self.lock().markers.insert(
            marker.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    /// Get all recorded operations
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }
}

#[async_trait]
impl<C: Clock> LeaseStore for MemoryStore<C> {
    async fn push_if_absent(
        &self,
        list: &str,
        marker: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.calls.push(StoreCall::Push {
            list: list.to_string(),
            marker: marker.to_string(),
            ttl,
        });

        let expires_at = expiry(now, ttl)?;
        state.sweep(now);
        if state.markers.contains_key(marker) {
            return Ok(false);
        }
        state
            .lists
            .entry(list.to_string())
            .or_default()
            .push_front(marker.to_string());
        state.markers.insert(
            marker.to_string(),
            Entry {
                value: PENDING.to_string(),
                expires_at,
            },
        );
        Ok(true)
    }

    async fn pop_tail(&self, list: &str) -> Result<Option<String>, StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Pop {
            list: list.to_string(),
        });
        Ok(state.lists.get_mut(list).and_then(VecDeque::pop_back))
    }

    async fn claim_if_pending(
        &self,
        marker: &str,
        token: &Token,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.calls.push(StoreCall::Claim {
            marker: marker.to_string(),
            token: token.clone(),
            ttl,
        });

        let expires_at = expiry(now, ttl)?;
        match state.live(marker, now) {
            Some(entry) if entry.value == PENDING => {
                entry.value = token.0.clone();
                entry.expires_at = expires_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn extend_if_owner(
        &self,
        marker: &str,
        token: &Token,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.calls.push(StoreCall::Extend {
            marker: marker.to_string(),
            token: token.clone(),
            ttl,
        });

        let expires_at = expiry(now, ttl)?;
        match state.live(marker, now) {
            Some(entry) if entry.value == token.0 => {
                entry.expires_at = expires_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_if_owner(&self, marker: &str, token: &Token) -> Result<bool, StoreError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.calls.push(StoreCall::Delete {
            marker: marker.to_string(),
            token: token.clone(),
        });

        let owned = state
            .live(marker, now)
            .is_some_and(|entry| entry.value == token.0);
        if owned {
            state.markers.remove(marker);
        }
        Ok(owned)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
