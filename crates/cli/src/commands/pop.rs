// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pop command

use super::bounded;
use anyhow::Result;
use clap::Args;
use leaseq_core::{LeaseStore, Queue};
use std::time::Duration;

#[derive(Args)]
pub struct PopArgs {
    /// Release the lease immediately after claiming it
    #[arg(long)]
    pub release: bool,

    /// Per-operation timeout
    #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
    pub timeout: Duration,
}

pub async fn pop<S: LeaseStore>(queue: &Queue<S>, args: PopArgs) -> Result<()> {
    let Some(lease) = bounded(args.timeout, "pop", queue.pop()).await? else {
        println!("empty");
        return Ok(());
    };

    let remaining = Duration::from_millis(lease.remaining().as_millis() as u64);
    println!("item: {}", lease.item());
    println!("token: {}", lease.token());
    println!("valid for: {}", humantime::format_duration(remaining));

    if args.release {
        let released = bounded(args.timeout, "release", lease.release()).await?;
        println!("{}", if released { "released" } else { "lease lost" });
    }
    Ok(())
}
