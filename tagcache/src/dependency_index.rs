use std::collections::{HashMap, HashSet};

/// Reverse index from a tag to the keys that were cached under it, with the
/// forward map from each key back to its tags.
///
/// Both maps only ever hold non-empty sets.
#[derive(Debug, Default)]
pub struct DependencyIndex {
    sets: HashMap<String, HashSet<String>>,
    tags_of: HashMap<String, HashSet<String>>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `key` was not already a member of `tag`.
    pub fn add_member(&mut self, tag: &str, key: &str) -> bool {
        let added = match self.sets.get_mut(tag) {
            Some(keys) => match keys.contains(key) {
                true => false,
                false => keys.insert(key.to_owned()),
            },
            None => {
                self.sets
                    .insert(tag.to_owned(), HashSet::from([key.to_owned()]));
                true
            }
        };

        if added {
            self.tags_of
                .entry(key.to_owned())
                .or_default()
                .insert(tag.to_owned());
        }

        added
    }

    /// Keys currently recorded under `tag`, empty if the tag is unknown.
    pub fn members(&self, tag: &str) -> impl Iterator<Item = &str> {
        self.sets
            .get(tag)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.sets.contains_key(tag)
    }

    pub fn remove_tag(&mut self, tag: &str) -> Option<HashSet<String>> {
        let keys = self.sets.remove(tag)?;

        for key in &keys {
            if let Some(tags) = self.tags_of.get_mut(key) {
                tags.remove(tag);
                if tags.is_empty() {
                    self.tags_of.remove(key);
                }
            }
        }

        Some(keys)
    }

    /// Drops `key` from every tag that lists it. A tag left without members
    /// is forgotten.
    pub fn forget_key(&mut self, key: &str) {
        let Some(tags) = self.tags_of.remove(key) else {
            return;
        };

        for tag in tags {
            if let Some(keys) = self.sets.get_mut(&tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.sets.remove(&tag);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.sets.clear();
        self.tags_of.clear();
    }
}
