// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Push command

use super::bounded;
use anyhow::Result;
use clap::Args;
use leaseq_core::{LeaseStore, Queue};
use std::time::Duration;

#[derive(Args)]
pub struct PushArgs {
    /// Items to enqueue
    #[arg(required = true)]
    pub items: Vec<String>,

    /// How long a pending item waits to be claimed
    #[arg(long, default_value = "1s", value_parser = super::parse_ttl)]
    pub ttl: Duration,

    /// Per-operation timeout
    #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
    pub timeout: Duration,
}

pub async fn push<S: LeaseStore>(queue: &Queue<S>, args: PushArgs) -> Result<()> {
    for item in &args.items {
        let accepted = bounded(args.timeout, "push", queue.push(item, args.ttl)).await?;
        let outcome = if accepted { "accepted" } else { "duplicate" };
        println!("{} {}", item, outcome);
    }
    Ok(())
}
