// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Demo command
//!
//! One producer cycles through a fixed set of items while a pool of
//! consumers claims, extends, and releases them. Consumers record which items
//! they hold so overlapping ownership shows up in the summary.

use anyhow::{bail, Result};
use clap::Args;
use leaseq_core::{Lease, LeaseStore, Queue, QueueError, SystemClock};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Producer pause after a duplicate push and between passes
const BACKOFF: Duration = Duration::from_millis(100);
/// Consumer pause after an empty pop
const IDLE: Duration = Duration::from_millis(10);

#[derive(Args)]
pub struct DemoArgs {
    /// Use an in-process store instead of Redis
    #[arg(long)]
    pub memory: bool,

    /// Number of distinct items the producer cycles through
    #[arg(
        long,
        default_value_t = 100,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub items: usize,

    /// Number of concurrent consumers
    #[arg(long, default_value_t = 20)]
    pub consumers: usize,

    /// Leases each consumer handles before stopping
    #[arg(long, default_value_t = 3)]
    pub rounds: usize,

    /// Simulated work before and after each extend
    #[arg(long, default_value = "500ms", value_parser = humantime::parse_duration)]
    pub hold: Duration,

    /// How long a pushed item waits to be claimed
    #[arg(long, default_value = "1s", value_parser = super::parse_ttl)]
    pub push_ttl: Duration,
}

/// What ended the wait on the consumer pool
enum Finished {
    Consumers(Result<()>),
    Producer(Result<Result<()>, tokio::task::JoinError>),
    Interrupted,
}

/// Totals across all consumers
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DemoSummary {
    pub claimed: usize,
    pub extended: usize,
    pub released: usize,
    pub lost_extends: usize,
    pub lost_releases: usize,
    pub exhausted: usize,
    pub overlaps: usize,
}

impl fmt::Display for DemoSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "claimed: {}", self.claimed)?;
        writeln!(f, "extended: {}", self.extended)?;
        writeln!(f, "released: {}", self.released)?;
        writeln!(f, "lost extends: {}", self.lost_extends)?;
        writeln!(f, "lost releases: {}", self.lost_releases)?;
        writeln!(f, "deadline exhausted: {}", self.exhausted)?;
        writeln!(f, "overlaps: {}", self.overlaps)
    }
}

#[derive(Default)]
struct Counters {
    claimed: AtomicUsize,
    extended: AtomicUsize,
    released: AtomicUsize,
    lost_extends: AtomicUsize,
    lost_releases: AtomicUsize,
    exhausted: AtomicUsize,
    overlaps: AtomicUsize,
}

impl Counters {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> DemoSummary {
        DemoSummary {
            claimed: self.claimed.load(Ordering::Relaxed),
            extended: self.extended.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            lost_extends: self.lost_extends.load(Ordering::Relaxed),
            lost_releases: self.lost_releases.load(Ordering::Relaxed),
            exhausted: self.exhausted.load(Ordering::Relaxed),
            overlaps: self.overlaps.load(Ordering::Relaxed),
        }
    }
}

/// State shared by the consumer pool
struct Shared {
    counters: Counters,
    in_hand: Mutex<HashSet<String>>,
    hold: Duration,
}

impl Shared {
    /// Record an item as held; false if another consumer already holds it
    fn take(&self, item: &str) -> bool {
        self.in_hand
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(item.to_string())
    }

    fn put_back(&self, item: &str) {
        self.in_hand
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(item);
    }
}

pub async fn run<S: LeaseStore>(queue: Queue<S>, args: &DemoArgs) -> Result<DemoSummary> {
    info!(
        queue = queue.name(),
        items = args.items,
        consumers = args.consumers,
        rounds = args.rounds,
        "starting demo"
    );

    let shared = Arc::new(Shared {
        counters: Counters::default(),
        in_hand: Mutex::new(HashSet::new()),
        hold: args.hold,
    });
    let (stop_tx, stop_rx) = watch::channel(false);

    let mut producer = tokio::spawn(produce(queue.clone(), args.items, args.push_ttl, stop_rx));

    let mut consumers = JoinSet::new();
    for id in 0..args.consumers {
        consumers.spawn(consume(id, queue.clone(), args.rounds, Arc::clone(&shared)));
    }

    let finished = tokio::select! {
        result = join_all(&mut consumers) => Finished::Consumers(result),
        joined = &mut producer => Finished::Producer(joined),
        _ = tokio::signal::ctrl_c() => Finished::Interrupted,
    };

    match finished {
        Finished::Consumers(result) => {
            // the receiver may already be gone if the producer failed
            let _ = stop_tx.send(true);
            producer.await??;
            result?;
        }
        Finished::Producer(joined) => {
            consumers.abort_all();
            joined??;
            bail!("producer stopped before consumers finished");
        }
        Finished::Interrupted => {
            warn!("interrupted, stopping consumers");
            consumers.abort_all();
            let _ = stop_tx.send(true);
            producer.await??;
        }
    }

    let summary = shared.counters.snapshot();
    info!(claimed = summary.claimed, overlaps = summary.overlaps, "demo finished");
    Ok(summary)
}

async fn join_all(consumers: &mut JoinSet<Result<()>>) -> Result<()> {
    while let Some(joined) = consumers.join_next().await {
        joined??;
    }
    Ok(())
}

async fn produce<S: LeaseStore>(
    queue: Queue<S>,
    items: usize,
    ttl: Duration,
    mut stop: watch::Receiver<bool>,
) -> Result<()> {
    loop {
        for i in 0..items {
            if *stop.borrow() {
                return Ok(());
            }
            if !queue.push(&i.to_string(), ttl).await? {
                tokio::time::sleep(BACKOFF).await;
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(BACKOFF) => {}
            _ = stop.changed() => return Ok(()),
        }
    }
}

async fn consume<S: LeaseStore>(
    id: usize,
    queue: Queue<S>,
    rounds: usize,
    shared: Arc<Shared>,
) -> Result<()> {
    let counters = &shared.counters;
    let mut handled = 0;

    while handled < rounds {
        let lease = match queue.pop().await {
            Ok(Some(lease)) => lease,
            Ok(None) => {
                tokio::time::sleep(IDLE).await;
                continue;
            }
            Err(QueueError::DeadlineExhausted { item, .. }) => {
                warn!(consumer = id, item = %item, "claim left no safe window");
                Counters::bump(&counters.exhausted);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        Counters::bump(&counters.claimed);
        let item = lease.item().to_string();
        if !shared.take(&item) {
            warn!(consumer = id, item = %item, "item held by two consumers");
            Counters::bump(&counters.overlaps);
        }

        let result = work(id, lease, &shared).await;
        shared.put_back(&item);
        result?;
        handled += 1;
    }

    Ok(())
}

/// Hold, extend, hold, release. Stops early once the lease is lost.
async fn work<S: LeaseStore>(
    id: usize,
    mut lease: Lease<S, SystemClock>,
    shared: &Shared,
) -> Result<()> {
    let counters = &shared.counters;

    tokio::time::sleep(shared.hold).await;
    match lease.extend().await {
        Ok(true) => Counters::bump(&counters.extended),
        Ok(false) => {
            warn!(consumer = id, item = lease.item(), "extend failed, lease lost");
            Counters::bump(&counters.lost_extends);
            return Ok(());
        }
        Err(QueueError::DeadlineExhausted { .. }) => {
            warn!(consumer = id, item = lease.item(), "extend left no safe window");
            Counters::bump(&counters.exhausted);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    tokio::time::sleep(shared.hold).await;
    if lease.release().await? {
        Counters::bump(&counters.released);
    } else {
        warn!(consumer = id, item = lease.item(), "release failed, lease lost");
        Counters::bump(&counters.lost_releases);
    }
    Ok(())
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod tests;
