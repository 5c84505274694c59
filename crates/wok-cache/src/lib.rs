//! wok-cache
//!
//! Request cache with in-flight coalescing.
//!
//! Concurrent `get_or_fetch` calls for the same key share a single loader
//! run: the first caller starts the load, later callers await the same
//! future, and everyone gets the same result. Successful values stay cached
//! until [`RequestCache::invalidate`] / [`RequestCache::clear`]; failures
//! are never cached, so the next caller retries the loader.
//!
//! The cache is an owned value with an explicit lifecycle. Construct one,
//! share it (`Arc`) where needed, clear it when the session resets; there
//! is no ambient global state in this crate.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Mutex;

use futures_util::future::{BoxFuture, FutureExt, Shared};

type InFlight<V, E> = Shared<BoxFuture<'static, Result<V, E>>>;

enum Slot<V, E> {
    Ready(V),
    InFlight(InFlight<V, E>),
}

/// Keyed cache with request coalescing.
///
/// `V` and `E` must be `Clone` because every coalesced caller receives the
/// same result; wrap large values in `Arc`.
pub struct RequestCache<K, V, E> {
    slots: Mutex<HashMap<K, Slot<V, E>>>,
}

impl<K, V, E> Default for RequestCache<K, V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> RequestCache<K, V, E> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V, E> RequestCache<K, V, E>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Return the cached value for `key`, or run `loader` to produce it.
    ///
    /// If a load for `key` is already in flight, this call awaits that load
    /// instead of starting another. The loader runs at most once per cache
    /// miss regardless of caller count.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let shared = {
            let mut slots = self.slots.lock().expect("cache mutex poisoned");
            match slots.get(&key) {
                Some(Slot::Ready(value)) => return Ok(value.clone()),
                Some(Slot::InFlight(load)) => load.clone(),
                None => {
                    let load: InFlight<V, E> = loader().boxed().shared();
                    slots.insert(key.clone(), Slot::InFlight(load.clone()));
                    load
                }
            }
        };

        // Awaited without holding the lock; other keys stay usable.
        let result = shared.await;

        let mut slots = self.slots.lock().expect("cache mutex poisoned");
        match result {
            Ok(value) => {
                // Promote unless someone invalidated or replaced the slot
                // while the load ran.
                if matches!(slots.get(&key), Some(Slot::InFlight(_))) {
                    slots.insert(key, Slot::Ready(value.clone()));
                }
                Ok(value)
            }
            Err(err) => {
                // Failures are not cached; the next caller retries.
                if matches!(slots.get(&key), Some(Slot::InFlight(_))) {
                    slots.remove(&key);
                }
                Err(err)
            }
        }
    }

    /// Drop one key (cached value or in-flight marker).
    pub fn invalidate(&self, key: &K) {
        self.slots
            .lock()
            .expect("cache mutex poisoned")
            .remove(key);
    }

    /// Drop everything. The "full application reload" lifecycle point.
    pub fn clear(&self) {
        self.slots.lock().expect("cache mutex poisoned").clear();
    }

    pub fn len(&self) -> usize {
        self.slots.lock().expect("cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
