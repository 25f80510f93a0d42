use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

struct Entry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> Entry<T> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Keyed in-memory store whose entries expire a fixed time after insertion.
///
/// Expired entries are invisible to readers and dropped lazily on access or by
/// [`SessionStore::purge_expired`].
pub struct SessionStore<T> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<T>>>,
}

impl<T: Clone> SessionStore<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Inserts or overwrites an entry, restarting its lifetime.
    pub async fn insert(&self, key: impl Into<String>, value: T) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.lock().await.insert(key.into(), entry);
    }

    /// Swaps the value of a live entry without extending its lifetime.
    ///
    /// Returns false if there is no live entry for the key.
    pub async fn replace(&self, key: &str, value: T) -> bool {
        let mut entries = self.entries.lock().await;
        match entries.get_mut(key) {
            Some(entry) if !entry.is_expired(Instant::now()) => {
                entry.value = value;
                true
            }
            _ => false,
        }
    }

    pub async fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        if entries.get(key)?.is_expired(now) {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|e| e.value.clone())
    }

    /// Removes an entry, returning its value only if it was still live.
    pub async fn remove(&self, key: &str) -> Option<T> {
        let entry = self.entries.lock().await.remove(key)?;
        (!entry.is_expired(Instant::now())).then_some(entry.value)
    }

    /// Live entries at this moment, in no particular order.
    pub async fn snapshot(&self) -> Vec<(String, T)> {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .iter()
            .filter(|(_, e)| !e.is_expired(now))
            .map(|(k, e)| (k.clone(), e.value.clone()))
            .collect()
    }

    /// Drops expired entries and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .values()
            .filter(|e| !e.is_expired(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
