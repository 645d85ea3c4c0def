use std::collections::HashSet;

use crate::{
    CacheOptions, Cached, CfgDebug, DependencyIndex, Error, IndexKind, Result, Tag, ValueStore,
    lock::IndexLock,
};

/// Values keyed by string, each recorded under the dependency tags it was
/// derived from, so that every value depending on a tag can be dropped at once.
///
/// The value store and the dependency index sit behind independent
/// reader/writer locks. Whenever one call needs both, the dependency index is
/// taken first.
///
/// ```
/// use tagcache::{MemoryStore, TagCache};
///
/// let cache = TagCache::new(MemoryStore::new());
/// cache.insert_value("orders?user=7", vec![1, 2], &["orders", "users:7"]).unwrap();
/// cache.insert_value("orders?user=8", vec![3], &["orders", "users:8"]).unwrap();
///
/// cache.invalidate(&["orders"]).unwrap();
///
/// assert!(cache.get("orders?user=7").unwrap().is_none());
/// assert!(cache.get("orders?user=8").unwrap().is_none());
/// ```
pub struct TagCache<S> {
    values: IndexLock<S>,
    dependencies: IndexLock<DependencyIndex>,
    options: CacheOptions,
}

impl<S> TagCache<S>
where
    S: ValueStore,
    S::Value: CfgDebug,
{
    pub fn new(store: S) -> Self {
        Self::with_options(store, CacheOptions::default())
    }

    pub fn with_options(store: S, options: CacheOptions) -> Self {
        Self {
            values: IndexLock::new(IndexKind::Values, store),
            dependencies: IndexLock::new(IndexKind::Dependencies, DependencyIndex::new()),
            options,
        }
    }

    /// Caches `value` under `key` (a `None` is stored as [`Cached::NULL`]) and
    /// records `key` as a dependent of every non-blank tag.
    ///
    /// Tags accumulate: re-inserting a key under new tags keeps it listed
    /// under the old ones too.
    ///
    /// If the memberships cannot be recorded the value is taken out again, so
    /// a failed insert never leaves a value that no tag can reach.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?key, ?value, ?tags), skip_all)
    )]
    pub fn insert<T>(&self, key: &str, value: Option<S::Value>, tags: &[T]) -> Result<()>
    where
        T: Tag,
    {
        let timeout = self.options.lock_timeout;

        let tags = tags
            .iter()
            .filter(|tag| match tag.is_blank() {
                true => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!("skipping blank tag `{:?}`", tag);

                    false
                }
                false => true,
            })
            .collect::<Vec<_>>();

        // The value goes in before its memberships. An invalidation that
        // snapshots the key is then guaranteed to find the value to remove.
        self.values
            .write(timeout)?
            .set(key.to_owned(), Cached::from(value))?;

        if tags.is_empty() {
            return Ok(());
        }

        let recorded = self.dependencies.write(timeout).map(|mut dependencies| {
            for tag in &tags {
                dependencies.add_member(tag.id(), key);
            }
        });

        if let Err(err) = recorded {
            self.roll_back(key);
            return Err(err);
        }

        Ok(())
    }

    /// Best effort: the caller reports the original failure either way.
    fn roll_back(&self, key: &str) {
        let removed = self
            .values
            .write(self.options.lock_timeout)
            .and_then(|mut values| Ok(values.remove(key)?));

        if let Err(_err) = removed {
            #[cfg(feature = "tracing")]
            tracing::error!(?key, err = %_err, "could not roll back insert");
        }
    }

    pub fn insert_value<T>(&self, key: &str, value: S::Value, tags: &[T]) -> Result<()>
    where
        T: Tag,
    {
        self.insert(key, Some(value), tags)
    }

    /// `None` on a miss, `Some(Cached::NULL)` when a null was cached.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?key), skip_all, ret)
    )]
    pub fn get(&self, key: &str) -> Result<Option<Cached<S::Value>>> {
        let values = self.values.read(self.options.lock_timeout)?;
        Ok(values.get(key)?)
    }

    /// Drops every value recorded under any of `tags`, then forgets the tags.
    /// Each dropped key is also taken out of every other tag that listed it.
    ///
    /// Tags are processed one at a time, in order. Blank and unknown tags are
    /// no-ops. Returns how many keys were evicted. A key reachable from several
    /// of `tags` is evicted by the first of them only.
    ///
    /// On error the tag being processed keeps its entry, so invalidating it
    /// again retries every member.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?tags), skip_all, ret)
    )]
    pub fn invalidate<T>(&self, tags: &[T]) -> Result<usize>
    where
        T: Tag,
    {
        let timeout = self.options.lock_timeout;
        let mut removed = 0;

        for tag in tags {
            if tag.is_blank() {
                #[cfg(feature = "tracing")]
                tracing::trace!("skipping blank tag `{:?}`", tag);

                continue;
            }

            let tag = tag.id();

            // Upgradable: plain readers may still look at the index, but no
            // insert can add to this tag between the snapshot and its removal.
            let dependencies = self.dependencies.upgradable_read(timeout)?;
            if !dependencies.contains_tag(tag) {
                continue;
            }

            for key in dependencies.members(tag) {
                #[cfg(feature = "tracing")]
                tracing::trace!("removing key `{}`", key);

                self.values.write(timeout)?.remove(key)?;
            }

            let mut dependencies = self.dependencies.upgrade(dependencies, timeout)?;
            let evicted = dependencies.remove_tag(tag).unwrap_or_default();
            for key in &evicted {
                dependencies.forget_key(key);
            }

            removed += evicted.len();
        }

        Ok(removed)
    }

    /// Empties both the value store and the dependency index.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
    pub fn clear(&self) -> Result<()> {
        let timeout = self.options.lock_timeout;

        let mut dependencies = self.dependencies.write(timeout)?;
        let mut values = self.values.write(timeout)?;

        values.clear()?;
        dependencies.clear();

        Ok(())
    }

    /// Snapshot of the keys currently recorded under `tag`.
    pub fn dependents(&self, tag: &str) -> Result<HashSet<String>> {
        let dependencies = self.dependencies.read(self.options.lock_timeout)?;
        Ok(dependencies.members(tag).map(str::to_owned).collect())
    }

    /// Returns the cached value for `key`, or runs `compute`, caches its
    /// result under the tags `tagger` derives from it, and returns that.
    ///
    /// A failed `compute` caches nothing.
    pub fn get_or_insert_with<T, E>(
        &self,
        key: &str,
        compute: impl FnOnce() -> Result<Option<S::Value>, E>,
        tagger: impl FnOnce(&Cached<S::Value>) -> Vec<T>,
    ) -> Result<Cached<S::Value>, E>
    where
        T: Tag,
        S::Value: Clone,
        E: From<Error>,
    {
        if let Some(cached) = self.get(key)? {
            return Ok(cached);
        }

        let cached = Cached::from(compute()?);
        let tags = tagger(&cached);
        self.insert(key, cached.clone().into_value(), &tags)?;

        Ok(cached)
    }

    /// Runs `write` against the source of truth and, once it succeeds,
    /// invalidates the tags `tagger` derives from its output.
    ///
    /// A failed `write` invalidates nothing.
    pub fn invalidate_after<R, T, E>(
        &self,
        write: impl FnOnce() -> Result<R, E>,
        tagger: impl FnOnce(&R) -> Vec<T>,
    ) -> Result<R, E>
    where
        T: Tag,
        E: From<Error>,
    {
        let output = write()?;
        self.invalidate(&tagger(&output))?;
        Ok(output)
    }
}
