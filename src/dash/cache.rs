use std::time::{Duration, Instant};

use crate::dash::fetch::{FetchFailure, Fetcher};
use crate::dash::*;

/// A value with the time at which it was obtained.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub key: String,
    pub value: T,
    pub stored_at: Instant,
}

/// Holds at most one value, for a fixed time to live.
///
/// The clock is always passed by the caller, so that expiry does not depend on
/// the wall clock.
#[derive(Debug, Clone)]
pub struct FetchCache<T> {
    ttl: Duration,
    entry: Option<CacheEntry<T>>,
}

impl<T> FetchCache<T> {
    pub fn new(ttl: Duration) -> FetchCache<T> {
        FetchCache { ttl, entry: None }
    }

    /// True when there is no value or when the value is at least `ttl` old.
    pub fn is_expired(&self, now: Instant) -> bool {
        match &self.entry {
            Some(e) => now.saturating_duration_since(e.stored_at) >= self.ttl,
            None => true,
        }
    }

    /// The stored value, if it is still fresh and was stored under the same key.
    pub fn get(&self, key: &str, now: Instant) -> Option<&T> {
        if self.is_expired(now) {
            return None;
        }
        self.entry
            .as_ref()
            .filter(|e| e.key == key)
            .map(|e| &e.value)
    }

    pub fn put(&mut self, key: String, value: T, now: Instant) {
        self.entry = Some(CacheEntry {
            key,
            value,
            stored_at: now,
        });
    }
}

/// A fetcher whose successful results are kept for the time to live of the cache.
/// Failures are not kept: the next call tries again.
pub struct CachedFetcher {
    inner: Box<dyn Fetcher>,
    cache: FetchCache<Vec<u8>>,
}

impl CachedFetcher {
    pub fn new(inner: Box<dyn Fetcher>, ttl: Duration) -> CachedFetcher {
        CachedFetcher {
            inner,
            cache: FetchCache::new(ttl),
        }
    }

    pub fn location(&self) -> String {
        self.inner.location()
    }

    pub fn fetch_at(&mut self, now: Instant) -> Result<Vec<u8>, FetchFailure> {
        let key = self.inner.key();
        if let Some(bytes) = self.cache.get(&key, now) {
            debug!("fetch_at: serving {} cached bytes", bytes.len());
            return Ok(bytes.clone());
        }
        let bytes = self.inner.fetch()?;
        self.cache.put(key, bytes.clone(), now);
        Ok(bytes)
    }
}
