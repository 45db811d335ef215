// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ownership tokens
//!
//! A token is the fencing value written into a claimed marker. Extend and
//! release only succeed while the marker still holds the exact token.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Opaque ownership token for one claim
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token(pub String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates unique ownership tokens
pub trait TokenGen: Clone + Send + Sync + 'static {
    fn next(&self) -> Token;
}

/// Random UUID v4 tokens for production use
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidTokenGen;

impl TokenGen for UuidTokenGen {
    fn next(&self) -> Token {
        Token(uuid::Uuid::new_v4().to_string())
    }
}

/// Sequential token generator for testing
#[derive(Clone, Debug)]
pub struct SequentialTokenGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialTokenGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialTokenGen {
    fn default() -> Self {
        Self::new("token")
    }
}

impl TokenGen for SequentialTokenGen {
    fn next(&self) -> Token {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Token(format!("{}-{}", self.prefix, n))
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
