/// A value as held by a [`ValueStore`](crate::ValueStore).
///
/// Stored nulls are kept as [`Cached::Null`] so that "a null was cached" stays
/// distinguishable from a lookup miss, which is `None` at the call site:
///
/// ```
/// use tagcache::{Cached, MemoryStore, TagCache};
///
/// let cache = TagCache::new(MemoryStore::<u32>::new());
/// cache.insert("user:7", None, &["users"]).unwrap();
///
/// assert_eq!(cache.get("user:7").unwrap(), Some(Cached::NULL));
/// assert_eq!(cache.get("user:8").unwrap(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cached<V> {
    Null,
    Value(V),
}

impl<V> Cached<V> {
    /// The null sentinel.
    pub const NULL: Self = Cached::Null;

    pub fn is_null(&self) -> bool {
        matches!(self, Cached::Null)
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            Cached::Null => None,
            Cached::Value(value) => Some(value),
        }
    }

    pub fn into_value(self) -> Option<V> {
        self.into()
    }

    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> Cached<U> {
        match self {
            Cached::Null => Cached::Null,
            Cached::Value(value) => Cached::Value(f(value)),
        }
    }
}

impl<V> From<Option<V>> for Cached<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => Cached::Value(value),
            None => Cached::Null,
        }
    }
}

impl<V> From<Cached<V>> for Option<V> {
    fn from(cached: Cached<V>) -> Self {
        match cached {
            Cached::Null => None,
            Cached::Value(value) => Some(value),
        }
    }
}
