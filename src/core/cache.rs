use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheOutcome {
    Hit,
    Miss,
}

/// Remembers the most recent view only; any other key recomputes and replaces it.
pub(crate) struct ViewCache<K, V> {
    slot: Mutex<Option<(K, Arc<V>)>>,
}

impl<K: PartialEq, V> ViewCache<K, V> {
    pub(crate) fn new() -> Self {
        Self { slot: Mutex::new(None) }
    }

    pub(crate) fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> (Arc<V>, CacheOutcome) {
        if let Some((cached_key, view)) = self.lock().as_ref() {
            if *cached_key == key {
                return (Arc::clone(view), CacheOutcome::Hit);
            }
        }

        // Computed outside the lock; a concurrent miss on the same key just recomputes.
        let view = Arc::new(compute());
        *self.lock() = Some((key, Arc::clone(&view)));
        (view, CacheOutcome::Miss)
    }

    pub(crate) fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<(K, Arc<V>)>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn same_key_is_served_from_cache() {
        let cache = ViewCache::new();
        let runs = Cell::new(0);
        let compute = || {
            runs.set(runs.get() + 1);
            "view"
        };

        let (_, first) = cache.get_or_compute(("all", "7d"), compute);
        let (view, second) = cache.get_or_compute(("all", "7d"), compute);

        assert_eq!((first, second), (CacheOutcome::Miss, CacheOutcome::Hit));
        assert_eq!(*view, "view");
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn new_key_replaces_the_entry() {
        let cache = ViewCache::new();

        cache.get_or_compute(1, || "one");
        let (view, outcome) = cache.get_or_compute(2, || "two");
        assert_eq!((*view, outcome), ("two", CacheOutcome::Miss));

        let (view, outcome) = cache.get_or_compute(1, || "one again");
        assert_eq!((*view, outcome), ("one again", CacheOutcome::Miss));
    }

    #[test]
    fn clear_forces_recompute() {
        let cache = ViewCache::new();
        cache.get_or_compute(1, || 10);
        cache.clear();

        let (_, outcome) = cache.get_or_compute(1, || 11);
        assert_eq!(outcome, CacheOutcome::Miss);
    }
}
