// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue configuration

use crate::deadline::DEFAULT_DRIFT_FACTOR;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default lease length granted by a claim
pub const DEFAULT_LEASE_TTL: Duration = Duration::from_secs(8);

/// Shortest accepted lease; stores expire keys at millisecond granularity
pub const MIN_LEASE_TTL: Duration = Duration::from_millis(1);

/// Errors loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("queue name must be non-empty")]
    EmptyName,
    #[error("lease ttl must be at least 1ms, got {0:?}")]
    LeaseTtlTooShort(Duration),
    #[error("drift factor must be in [0, 1), got {0}")]
    InvalidDriftFactor(f64),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings for one named queue
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Namespace applied to every store key of this queue
    pub name: String,
    /// Expiry set on a marker by claim and extend
    #[serde(with = "humantime_serde", default = "default_lease_ttl")]
    pub lease_ttl: Duration,
    /// Fraction of the lease reserved for clock drift
    #[serde(default = "default_drift_factor")]
    pub drift_factor: f64,
}

fn default_lease_ttl() -> Duration {
    DEFAULT_LEASE_TTL
}

fn default_drift_factor() -> f64 {
    DEFAULT_DRIFT_FACTOR
}

impl QueueConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lease_ttl: DEFAULT_LEASE_TTL,
            drift_factor: DEFAULT_DRIFT_FACTOR,
        }
    }

    pub fn with_lease_ttl(mut self, ttl: Duration) -> Self {
        self.lease_ttl = ttl;
        self
    }

    pub fn with_drift_factor(mut self, drift_factor: f64) -> Self {
        self.drift_factor = drift_factor;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.lease_ttl < MIN_LEASE_TTL {
            return Err(ConfigError::LeaseTtlTooShort(self.lease_ttl));
        }
        if !(0.0..1.0).contains(&self.drift_factor) {
            return Err(ConfigError::InvalidDriftFactor(self.drift_factor));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
