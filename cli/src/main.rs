use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use cli::stress::{self, StressOpts};

#[derive(Debug, Parser)]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Hammer one shared cache with a shuffled mix of inserts and
    /// invalidations, then check that both indexes are consistent.
    Stress {
        /// Number of inserts, each tagged with every tag.
        #[arg(long, default_value_t = 4000)]
        inserts: usize,

        /// Number of single-tag invalidations, cycling through the tags.
        #[arg(long, default_value_t = 400)]
        invalidations: usize,

        /// Worker threads sharing the cache.
        #[arg(long, default_value_t = 8)]
        threads: usize,

        /// Dependency tags used by the workload.
        /// Example: `--tags users,orders,invoices`
        #[arg(long, value_delimiter = ',', default_value = "t1,t2")]
        tags: Vec<String>,

        /// Give up on a lock after this many milliseconds instead of blocking.
        #[arg(long, env = "TAGCACHE_LOCK_TIMEOUT_MS")]
        lock_timeout_ms: Option<u64>,

        /// Value store backing the cache.
        #[arg(long, value_enum, default_value_t = Backend::Memory)]
        backend: Backend,

        /// Seed for the workload shuffle, for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// `HashMap` behind the cache's own lock.
    Memory,
    /// `DashMap`.
    Dash,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Args::parse().cmd {
        Command::Stress {
            inserts,
            invalidations,
            threads,
            tags,
            lock_timeout_ms,
            backend,
            seed,
        } => {
            let opts = StressOpts {
                inserts,
                invalidations,
                threads,
                tags,
                lock_timeout: lock_timeout_ms.map(Duration::from_millis),
                seed,
            };

            let report = match backend {
                Backend::Memory => stress::run(tagcache::MemoryStore::new(), &opts)?,
                Backend::Dash => stress::run(dashcache::DashStore::new(), &opts)?,
            };

            tracing::info!(?backend, %report, "stress run consistent");
            Ok(())
        }
    }
}
