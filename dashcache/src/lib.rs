use tagcache::{BackendError, Cached, ValueStore};

use dashmap::DashMap;

/// [`ValueStore`] over a sharded concurrent map.
pub struct DashStore<V> {
    entries: DashMap<String, Cached<V>>,
}

impl<V> DashStore<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for DashStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ValueStore for DashStore<V>
where
    V: Clone,
{
    type Value = V;

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", fields(?key), skip_all)
    )]
    fn get(&self, key: &str) -> Result<Option<Cached<V>>, BackendError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", fields(?key), skip_all)
    )]
    fn set(&mut self, key: String, value: Cached<V>) -> Result<(), BackendError> {
        self.entries.insert(key, value);
        Ok(())
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", fields(?key), skip_all)
    )]
    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        if self.entries.remove(key).is_none() {
            #[cfg(feature = "tracing")]
            tracing::trace!("key already absent");
        }
        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    fn clear(&mut self) -> Result<(), BackendError> {
        self.entries.clear();
        Ok(())
    }
}
