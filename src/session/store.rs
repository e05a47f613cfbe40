use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{sync::RwLock, task::JoinHandle, time::Instant};
use uuid::Uuid;

struct Entry<T> {
    value: T,
    touched: Instant,
}

impl<T> Entry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            touched: Instant::now(),
        }
    }
}

/// In-memory state owned by one session (a cart, an admin console).
///
/// Nothing here outlives the process. Every read or write marks the session
/// as touched; [`SessionStore::evict_idle`] drops the ones left alone too long.
pub struct SessionStore<T> {
    inner: Arc<RwLock<HashMap<Uuid, Entry<T>>>>,
}

impl<T> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T> SessionStore<T> {
    pub async fn insert(&self, id: Uuid, value: T) {
        self.inner.write().await.insert(id, Entry::new(value));
    }

    pub async fn read<R>(&self, id: &Uuid, f: impl FnOnce(&T) -> R) -> Option<R> {
        // Write lock: reading counts as activity.
        let mut guard = self.inner.write().await;
        let entry = guard.get_mut(id)?;
        entry.touched = Instant::now();
        Some(f(&entry.value))
    }

    pub async fn update<R>(&self, id: &Uuid, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.inner.write().await;
        let entry = guard.get_mut(id)?;
        entry.touched = Instant::now();
        Some(f(&mut entry.value))
    }

    /// Runs `f` against the session, creating it with `init` on first use.
    pub async fn update_or_insert_with<R>(
        &self,
        id: Uuid,
        init: impl FnOnce() -> T,
        f: impl FnOnce(&mut T) -> R,
    ) -> R {
        let mut guard = self.inner.write().await;
        let entry = guard.entry(id).or_insert_with(|| Entry::new(init()));
        entry.touched = Instant::now();
        f(&mut entry.value)
    }

    pub async fn remove(&self, id: &Uuid) -> Option<T> {
        self.inner.write().await.remove(id).map(|entry| entry.value)
    }

    /// Drops every session untouched for longer than `max_idle`. Returns how
    /// many were dropped.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut guard = self.inner.write().await;
        let before = guard.len();
        guard.retain(|_, entry| now.duration_since(entry.touched) <= max_idle);
        before - guard.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl<T: Send + Sync + 'static> SessionStore<T> {
    /// Spawns a task that calls [`SessionStore::evict_idle`] every `every`
    /// until the runtime shuts down or the handle is aborted.
    pub fn spawn_sweeper(&self, name: &'static str, every: Duration, max_idle: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tracing::info!(
            store = name,
            interval_secs = every.as_secs(),
            max_idle_secs = max_idle.as_secs(),
            "session sweeper started"
        );
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let evicted = store.evict_idle(max_idle).await;
                if evicted > 0 {
                    tracing::info!(store = name, evicted, "idle sessions evicted");
                } else {
                    tracing::debug!(store = name, "no idle sessions");
                }
            }
        })
    }
}
