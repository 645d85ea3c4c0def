use std::collections::HashMap;

use crate::{BackendError, Cached};

/// Backing key-value storage for cached values.
///
/// Keys are matched by exact string equality. Implementations must accept
/// [`Cached::Null`] like any other value. A [`TagCache`](crate::TagCache)
/// serializes access through its own lock, so `&mut self` methods never race.
pub trait ValueStore {
    type Value;

    fn get(&self, key: &str) -> Result<Option<Cached<Self::Value>>, BackendError>;
    fn set(&mut self, key: String, value: Cached<Self::Value>) -> Result<(), BackendError>;
    fn remove(&mut self, key: &str) -> Result<(), BackendError>;
    fn clear(&mut self) -> Result<(), BackendError>;
}

/// Plain in-process store.
pub type MemoryStore<V> = HashMap<String, Cached<V>>;

impl<V> ValueStore for HashMap<String, Cached<V>>
where
    V: Clone,
{
    type Value = V;

    fn get(&self, key: &str) -> Result<Option<Cached<V>>, BackendError> {
        Ok(HashMap::get(self, key).cloned())
    }

    fn set(&mut self, key: String, value: Cached<V>) -> Result<(), BackendError> {
        self.insert(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        HashMap::remove(self, key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), BackendError> {
        HashMap::clear(self);
        Ok(())
    }
}
