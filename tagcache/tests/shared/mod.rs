#![allow(dead_code)]

use std::time::Duration;

use tagcache::{CacheOptions, CfgDebug, MemoryStore, TagCache};

pub fn cache<V: Clone + CfgDebug>() -> TagCache<MemoryStore<V>> {
    TagCache::with_options(
        MemoryStore::new(),
        CacheOptions::new().with_lock_timeout(Duration::from_secs(5)),
    )
}

#[cfg(feature = "tracing")]
static TRACING_INIT: std::sync::Once = std::sync::Once::new();

#[cfg(feature = "tracing")]
pub fn tracing_init() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
