//! Hand-off of parsed product lists between upload and generation.
//!
//! Parsing happens once per upload; label generation may be requested many
//! times afterwards with different settings. The list is kept behind a
//! small get/set interface so the engine never owns it.
//!
//! Lists expire after a period without access. Every `get` refreshes the
//! clock, every `set` sweeps expired lists, and the server also sweeps
//! periodically through [`ProductSource::purge_expired`].

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::sheet::ProductRecord;

/// How long an untouched product list is kept.
pub const DEFAULT_LIST_TTL: Duration = Duration::from_secs(60 * 60);

/// Storage for parsed product lists, keyed by an opaque id.
pub trait ProductSource: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<ProductRecord>>;
    fn set(&self, key: &str, products: Vec<ProductRecord>);

    /// Drop expired lists, returning how many were removed.
    fn purge_expired(&self) -> usize {
        0
    }
}

#[derive(Debug)]
struct StoredList {
    products: Vec<ProductRecord>,
    last_accessed: Instant,
}

/// In-process [`ProductSource`] with idle expiry.
#[derive(Debug)]
pub struct MemoryProductStore {
    lists: RwLock<HashMap<String, StoredList>>,
    ttl: Duration,
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_LIST_TTL)
    }
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose lists expire after `ttl` without access.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            lists: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.lists.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop a stored list. Returns whether it existed.
    pub fn remove(&self, key: &str) -> bool {
        self.lists
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }

    fn is_expired(&self, list: &StoredList, now: Instant) -> bool {
        now.duration_since(list.last_accessed) >= self.ttl
    }
}

impl ProductSource for MemoryProductStore {
    fn get(&self, key: &str) -> Option<Vec<ProductRecord>> {
        let now = Instant::now();
        let mut lists = self.lists.write().unwrap_or_else(PoisonError::into_inner);

        let expired = self.is_expired(lists.get(key)?, now);
        if expired {
            lists.remove(key);
            return None;
        }

        let list = lists.get_mut(key)?;
        list.last_accessed = now;
        Some(list.products.clone())
    }

    fn set(&self, key: &str, products: Vec<ProductRecord>) {
        let now = Instant::now();
        let mut lists = self.lists.write().unwrap_or_else(PoisonError::into_inner);
        lists.retain(|_, list| !self.is_expired(list, now));
        lists.insert(
            key.to_string(),
            StoredList {
                products,
                last_accessed: now,
            },
        );
    }

    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut lists = self.lists.write().unwrap_or_else(PoisonError::into_inner);
        let before = lists.len();
        lists.retain(|_, list| !self.is_expired(list, now));
        before - lists.len()
    }
}
