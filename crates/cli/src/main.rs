// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! leaseq - lease-based work queue CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{demo, pop, push};
use leaseq_adapters::{RedisStore, TracedStore};
use leaseq_core::{MemoryStore, Queue, QueueConfig};

use crate::settings::QueueArgs;

#[derive(Parser)]
#[command(
    name = "leaseq",
    version,
    about = "Exclusive, lease-based work queue over Redis"
)]
struct Cli {
    /// Redis server URL
    #[arg(long, global = true, default_value = "redis://127.0.0.1:6379")]
    redis: String,

    #[command(flatten)]
    queue: QueueArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enqueue one or more items
    Push(push::PushArgs),
    /// Claim the next item
    Pop(pop::PopArgs),
    /// Run producers and consumers against one queue
    Demo(demo::DemoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let config = cli.queue.resolve()?;

    match cli.command {
        Commands::Push(args) => {
            let queue = connect(&cli.redis, config).await?;
            push::push(&queue, args).await
        }
        Commands::Pop(args) => {
            let queue = connect(&cli.redis, config).await?;
            pop::pop(&queue, args).await
        }
        Commands::Demo(args) => {
            let summary = if args.memory {
                let queue = Queue::new(TracedStore::new(MemoryStore::new()), config)?;
                demo::run(queue, &args).await?
            } else {
                let queue = connect(&cli.redis, config).await?;
                demo::run(queue, &args).await?
            };
            print!("{}", summary);
            Ok(())
        }
    }
}

async fn connect(url: &str, config: QueueConfig) -> Result<Queue<TracedStore<RedisStore>>> {
    let store = RedisStore::connect(url)
        .await
        .with_context(|| format!("failed to connect to {}", url))?;
    Ok(Queue::new(TracedStore::new(store), config)?)
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
