//! Caches for raw tile bytes.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Storage for fetched tile bytes, keyed by URL.
pub trait Cache: Send + Sync {
    fn get(&self, url: &str) -> Option<Vec<u8>>;
    fn put(&self, url: &str, bytes: &[u8]);
}

/// A cache that stores nothing. Every request goes to the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl Cache for NoCache {
    fn get(&self, _url: &str) -> Option<Vec<u8>> {
        None
    }

    fn put(&self, _url: &str, _bytes: &[u8]) {}
}

/// An unbounded in-memory cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries survive a panic on another thread holding the lock.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Cache for MemoryCache {
    fn get(&self, url: &str) -> Option<Vec<u8>> {
        self.entries().get(url).cloned()
    }

    fn put(&self, url: &str, bytes: &[u8]) {
        self.entries().insert(url.to_owned(), bytes.to_vec());
    }
}
