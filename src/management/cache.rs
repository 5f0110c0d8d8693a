use std::{collections::HashMap, future::Future};

use crate::{
    backend::BackendError,
    types::{Album, Image, ImageFilter},
};

/// Category of cached data that can be invalidated as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Images,
    Years,
    Albums,
}

impl Partition {
    pub const ALL: [Partition; 3] = [Partition::Images, Partition::Years, Partition::Albums];
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Images {
        country_id: String,
        filter: ImageFilter,
    },
    Years {
        country_id: String,
    },
    Albums {
        country_id: String,
    },
}

impl CacheKey {
    pub fn images(country_id: &str, filter: ImageFilter) -> Self {
        CacheKey::Images {
            country_id: country_id.to_string(),
            filter,
        }
    }

    pub fn years(country_id: &str) -> Self {
        CacheKey::Years {
            country_id: country_id.to_string(),
        }
    }

    pub fn albums(country_id: &str) -> Self {
        CacheKey::Albums {
            country_id: country_id.to_string(),
        }
    }

    pub fn partition(&self) -> Partition {
        match self {
            CacheKey::Images { .. } => Partition::Images,
            CacheKey::Years { .. } => Partition::Years,
            CacheKey::Albums { .. } => Partition::Albums,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Images(Vec<Image>),
    Years(Vec<i32>),
    Albums(Vec<Album>),
}

/// Values the cache knows how to store.
pub trait Cacheable: Sized + Clone {
    fn wrap(self) -> CachedValue;
    fn unwrap_from(value: &CachedValue) -> Option<Self>;
}

impl Cacheable for Vec<Image> {
    fn wrap(self) -> CachedValue {
        CachedValue::Images(self)
    }

    fn unwrap_from(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Images(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl Cacheable for Vec<i32> {
    fn wrap(self) -> CachedValue {
        CachedValue::Years(self)
    }

    fn unwrap_from(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Years(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl Cacheable for Vec<Album> {
    fn wrap(self) -> CachedValue {
        CachedValue::Albums(self)
    }

    fn unwrap_from(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Albums(v) => Some(v.clone()),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Entry {
    value: Option<CachedValue>,
    generation: u64,
    failed: bool,
}

/// Result of a cache read.
///
/// `data` is whatever is best known for the key: the fresh value, or the
/// previous value when the fetch failed. `error` is set only when this read
/// issued a fetch and it failed.
#[derive(Debug)]
pub struct Lookup<T> {
    pub data: Option<T>,
    pub error: Option<BackendError>,
    pub from_cache: bool,
}

impl<T> Lookup<T> {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Key-based cache of backend reads with partition-level invalidation.
///
/// Staleness is tracked with one generation counter per partition: an entry
/// is fresh while it was stored under its partition's current generation.
/// Invalidating a partition bumps the counter, which makes every entry of
/// that partition stale without touching them.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<CacheKey, Entry>,
    generations: HashMap<Partition, u64>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self, partition: Partition) -> u64 {
        self.generations.get(&partition).copied().unwrap_or(0)
    }

    pub fn is_fresh(&self, key: &CacheKey) -> bool {
        self.entries.get(key).is_some_and(|e| {
            e.value.is_some() && !e.failed && e.generation == self.generation(key.partition())
        })
    }

    pub fn is_stale(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key) && !self.is_fresh(key)
    }

    /// Last known value for `key`, fresh or not.
    pub fn peek<T: Cacheable>(&self, key: &CacheKey) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|e| e.value.as_ref())
            .and_then(T::unwrap_from)
    }

    pub fn has_error(&self, key: &CacheKey) -> bool {
        self.entries.get(key).is_some_and(|e| e.failed)
    }

    /// Returns the cached value for `key` if fresh, otherwise awaits `fetcher`.
    ///
    /// A successful fetch replaces the entry. A failed one keeps the previous
    /// value, flags the entry and hands the error back; nothing is retried.
    pub async fn fetch<T, F, Fut>(&mut self, key: CacheKey, fetcher: F) -> Lookup<T>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        if self.is_fresh(&key) {
            return Lookup {
                data: self.peek(&key),
                error: None,
                from_cache: true,
            };
        }

        let generation = self.generation(key.partition());
        match fetcher().await {
            Ok(value) => {
                self.entries.insert(
                    key,
                    Entry {
                        value: Some(value.clone().wrap()),
                        generation,
                        failed: false,
                    },
                );
                Lookup {
                    data: Some(value),
                    error: None,
                    from_cache: false,
                }
            }
            Err(e) => {
                let entry = self.entries.entry(key).or_insert(Entry {
                    value: None,
                    generation,
                    failed: true,
                });
                entry.failed = true;
                Lookup {
                    data: entry.value.as_ref().and_then(T::unwrap_from),
                    error: Some(e),
                    from_cache: false,
                }
            }
        }
    }

    /// Marks every entry of `partition` stale.
    pub fn invalidate(&mut self, partition: Partition) {
        *self.generations.entry(partition).or_insert(0) += 1;
    }

    pub fn invalidate_all(&mut self) {
        for partition in Partition::ALL {
            self.invalidate(partition);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
