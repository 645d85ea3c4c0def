use std::{
    collections::HashSet,
    fmt::Display,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, bail, ensure};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tagcache::{CacheOptions, TagCache, ValueStore};

#[derive(Debug)]
pub struct StressOpts {
    pub inserts: usize,
    pub invalidations: usize,
    pub threads: usize,
    pub tags: Vec<String>,
    pub lock_timeout: Option<Duration>,
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub struct StressReport {
    pub elapsed: Duration,
    pub evicted: usize,
    pub surviving: usize,
}

impl Display for StressReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} keys evicted during the run, {} survived it, took {:?}",
            self.evicted, self.surviving, self.elapsed
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Insert(usize),
    Invalidate(usize),
}

fn key(i: usize) -> String {
    format!("key:{i}")
}

#[tracing::instrument(level = "info", skip_all, fields(?opts))]
pub fn run<S>(store: S, opts: &StressOpts) -> anyhow::Result<StressReport>
where
    S: ValueStore<Value = usize> + Send + Sync,
{
    ensure!(opts.threads > 0, "at least one thread is required");
    ensure!(!opts.tags.is_empty(), "at least one tag is required");

    let options = match opts.lock_timeout {
        Some(timeout) => CacheOptions::new().with_lock_timeout(timeout),
        None => CacheOptions::new(),
    };
    let cache = TagCache::with_options(store, options);

    let mut ops = (0..opts.inserts)
        .map(Op::Insert)
        .chain((0..opts.invalidations).map(|i| Op::Invalidate(i % opts.tags.len())))
        .collect::<Vec<_>>();
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    ops.shuffle(&mut rng);

    let evicted = AtomicUsize::new(0);
    let started = Instant::now();

    thread::scope(|s| -> anyhow::Result<()> {
        let workers = ops
            .chunks(ops.len().div_ceil(opts.threads).max(1))
            .map(|chunk| {
                let cache = &cache;
                let evicted = &evicted;
                s.spawn(move || -> tagcache::Result<()> {
                    for op in chunk {
                        match *op {
                            Op::Insert(i) => cache.insert_value(&key(i), i, &opts.tags)?,
                            Op::Invalidate(t) => {
                                let removed = cache.invalidate(&opts.tags[t..=t])?;
                                evicted.fetch_add(removed, Ordering::Relaxed);
                            }
                        }
                    }
                    Ok(())
                })
            })
            .collect::<Vec<_>>();

        for worker in workers {
            match worker.join() {
                Ok(result) => result.context("worker failed")?,
                Err(_) => bail!("worker panicked"),
            }
        }
        Ok(())
    })?;

    let elapsed = started.elapsed();

    let mut reachable = HashSet::new();
    for tag in &opts.tags {
        reachable.extend(cache.dependents(tag)?);
    }

    for key in &reachable {
        ensure!(
            cache.get(key)?.is_some(),
            "a surviving tag lists `{key}` but it is not cached"
        );
    }

    let mut surviving = 0;
    for i in 0..opts.inserts {
        if let Some(cached) = cache.get(&key(i))? {
            ensure!(
                cached.value() == Some(&i),
                "`{}` holds {:?}, expected {}",
                key(i),
                cached,
                i
            );
            ensure!(
                reachable.contains(&key(i)),
                "`{}` is cached but no tag lists it",
                key(i)
            );
            surviving += 1;
        }
    }

    cache.invalidate(&opts.tags)?;

    for i in 0..opts.inserts {
        ensure!(
            cache.get(&key(i))?.is_none(),
            "`{}` survived invalidating every tag",
            key(i)
        );
    }
    for tag in &opts.tags {
        ensure!(
            cache.dependents(tag)?.is_empty(),
            "tag `{tag}` still lists keys"
        );
    }

    Ok(StressReport {
        elapsed,
        evicted: evicted.into_inner(),
        surviving,
    })
}
