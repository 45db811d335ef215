// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue settings from a config file and command-line overrides

use clap::Args;
use leaseq_core::QueueConfig;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_QUEUE: &str = "default";

#[derive(Args, Debug, Default)]
pub struct QueueArgs {
    /// TOML file with queue settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Queue name (namespace for all store keys)
    #[arg(long = "queue", global = true)]
    pub name: Option<String>,

    /// Lease length granted by a claim (e.g. "8s", "1500ms")
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    pub lease_ttl: Option<Duration>,

    /// Fraction of the lease reserved for clock drift
    #[arg(long, global = true)]
    pub drift_factor: Option<f64>,
}

impl QueueArgs {
    /// Load the config file if given, then apply flag overrides
    pub fn resolve(&self) -> anyhow::Result<QueueConfig> {
        let mut config = match &self.config {
            Some(path) => QueueConfig::load(path)
                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?,
            None => QueueConfig::new(DEFAULT_QUEUE),
        };

        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(ttl) = self.lease_ttl {
            config.lease_ttl = ttl;
        }
        if let Some(drift) = self.drift_factor {
            config.drift_factor = drift;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
