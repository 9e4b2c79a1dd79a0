//! Process-wide cache of CMS resources keyed by their logical identity.
//!
//! Fetches are never cancelled. Each fetch takes a ticket before it starts
//! and may store its result only if no fetch with a newer ticket has stored
//! one already, so the last-started query wins per key regardless of the
//! order in which responses arrive.

use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Logical identity of a cached resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    CompanyInfo,
    Menus,
    Home,
    Page(String),
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::CompanyInfo => f.write_str("company-info"),
            CacheKey::Menus => f.write_str("site-menus"),
            CacheKey::Home => f.write_str("home-data"),
            CacheKey::Page(slug) => write!(f, "page:{}", slug),
        }
    }
}

/// Sequence number of one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Entry {
    ticket: Ticket,
    value: Arc<Value>,
}

#[derive(Debug, Default)]
pub struct ResourceCache {
    next_ticket: AtomicU64,
    entries: RwLock<HashMap<CacheKey, Entry>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<Value>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .map(|entry| Arc::clone(&entry.value))
    }

    /// Ticket for a fetch that is about to start.
    pub fn begin(&self) -> Ticket {
        Ticket(self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Store the result of the fetch holding `ticket`.
    ///
    /// Returns the value now cached for `key`: the new one, or the newer
    /// value that superseded it.
    pub fn complete(&self, key: CacheKey, ticket: Ticket, value: Value) -> Arc<Value> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(existing) = entries.get(&key) {
            if existing.ticket > ticket {
                debug!(
                    "Discarding stale result for {} ({:?} < {:?})",
                    key, ticket, existing.ticket
                );
                return Arc::clone(&existing.value);
            }
        }

        let value = Arc::new(value);
        entries.insert(
            key,
            Entry {
                ticket,
                value: Arc::clone(&value),
            },
        );
        value
    }

    pub fn invalidate(&self, key: &CacheKey) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    /// Cached value for `key`, fetching and storing it on a miss.
    pub async fn get_or_fetch<E, F, Fut>(&self, key: CacheKey, fetch: F) -> Result<Arc<Value>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        self.refresh(key, fetch).await
    }

    /// Fetch `key` unconditionally and store the result under a new ticket.
    pub async fn refresh<E, F, Fut>(&self, key: CacheKey, fetch: F) -> Result<Arc<Value>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        let ticket = self.begin();
        let value = fetch().await?;
        Ok(self.complete(key, ticket, value))
    }
}
