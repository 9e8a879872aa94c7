use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

struct Entry<T> {
    created: Instant,
    value: T,
}

/// In-memory map from opaque ULID tokens to values that expire after `ttl`.
/// Holds at most `capacity` live entries; the oldest one is evicted to make
/// room for a new one.
///
/// The lock is only held for plain map operations, never across `.await`.
pub struct TokenStore<T> {
    entries: Arc<Mutex<HashMap<String, Entry<T>>>>,
    ttl: Duration,
    capacity: usize,
}

impl<T> Clone for TokenStore<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
            capacity: self.capacity,
        }
    }
}

impl<T> TokenStore<T> {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `value` under a fresh token, pruning expired entries first.
    pub fn insert(&self, value: T) -> String {
        let token = ulid::Ulid::new().to_string();
        let mut entries = self.lock();
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.created.elapsed() < ttl);

        while entries.len() >= self.capacity {
            let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.created)
                .map(|(token, _)| token.clone())
            else {
                break;
            };
            tracing::warn!("token store full ({} entries), evicting oldest", self.capacity);
            entries.remove(&oldest);
        }

        entries.insert(
            token.clone(),
            Entry {
                created: Instant::now(),
                value,
            },
        );
        token
    }

    /// Removes and returns the value. A second call with the same token
    /// returns `None`.
    pub fn take(&self, token: &str) -> Option<T> {
        let entry = self.lock().remove(token)?;
        (entry.created.elapsed() < self.ttl).then_some(entry.value)
    }

    /// Runs `f` against a live value and returns its result.
    pub fn update<R>(&self, token: &str, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut entries = self.lock();
        let expired = entries
            .get(token)
            .is_some_and(|entry| entry.created.elapsed() >= self.ttl);
        if expired {
            entries.remove(token);
            return None;
        }
        entries.get_mut(token).map(|entry| f(&mut entry.value))
    }

    pub fn remove(&self, token: &str) {
        self.lock().remove(token);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }
}
