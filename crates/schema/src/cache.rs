//! Per-workspace schema cache with single-flight loading.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use apollo_compiler::Schema;
use tokio::sync::OnceCell;

use crate::{SchemaError, SchemaLoader};

type Slot = Arc<OnceCell<Arc<Schema>>>;

/// Schema cache keyed by workspace root.
///
/// Concurrent `get`s for the same root share one in-flight load. A failed
/// load leaves the slot empty, so the next `get` retries. `refresh` swaps in a
/// fresh slot: callers already holding the previous snapshot keep it, and
/// the last completed refresh wins.
pub struct SchemaCache<L> {
    loader: Arc<L>,
    slots: Mutex<HashMap<PathBuf, Slot>>,
}

impl<L: SchemaLoader> SchemaCache<L> {
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self {
            loader: Arc::new(loader),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Get the schema for `root`, loading it if it is not cached yet.
    ///
    /// Returns `None` if loading fails; the failure is logged.
    pub async fn get(&self, root: &Path) -> Option<Arc<Schema>> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(root.to_path_buf()).or_default())
        };
        self.load_into(&slot, root).await
    }

    /// Reload the schema for `root`, replacing any cached entry.
    pub async fn refresh(&self, root: &Path) -> Option<Arc<Schema>> {
        let slot: Slot = Arc::default();
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(root.to_path_buf(), Arc::clone(&slot));
        tracing::debug!(root = %root.display(), "Refreshing schema");
        self.load_into(&slot, root).await
    }

    /// Drop the cached entry for `root`.
    pub fn invalidate(&self, root: &Path) {
        let removed = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(root)
            .is_some();
        tracing::debug!(root = %root.display(), removed, "Invalidated schema");
    }

    /// The cached schema for `root`, without loading.
    #[must_use]
    pub fn cached(&self, root: &Path) -> Option<Arc<Schema>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(root)?.get().cloned()
    }

    async fn load_into(&self, slot: &OnceCell<Arc<Schema>>, root: &Path) -> Option<Arc<Schema>> {
        let result = slot
            .get_or_try_init(|| {
                let loader = Arc::clone(&self.loader);
                let root = root.to_path_buf();
                async move {
                    tokio::task::spawn_blocking(move || loader.load(&root))
                        .await
                        .map_err(|e| SchemaError::Task(e.to_string()))?
                        .map(Arc::new)
                }
            })
            .await;

        match result {
            Ok(schema) => Some(Arc::clone(schema)),
            Err(error) => {
                tracing::warn!(root = %root.display(), %error, "Failed to load schema");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::build_schema;

    fn schema_with(type_name: &str) -> Schema {
        build_schema(&[(
            PathBuf::from("schema.graphql"),
            format!("type Query {{ node: {type_name} }}\ntype {type_name} {{ id: ID }}"),
        )])
    }

    struct CountingLoader {
        calls: Arc<AtomicUsize>,
    }

    impl SchemaLoader for CountingLoader {
        fn load(&self, _root: &Path) -> crate::Result<Schema> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(20));
            Ok(schema_with(&format!("Version{call}")))
        }
    }

    fn counting() -> (SchemaCache<CountingLoader>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = SchemaCache::new(CountingLoader {
            calls: Arc::clone(&calls),
        });
        (cache, calls)
    }

    #[tokio::test]
    async fn concurrent_gets_share_one_load() {
        let (cache, calls) = counting();
        let root = Path::new("/workspace");

        let (a, b) = tokio::join!(cache.get(root), cache.get(root));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    }

    #[tokio::test]
    async fn get_reuses_cached_schema() {
        let (cache, calls) = counting();
        let root = Path::new("/workspace");

        cache.get(root).await.unwrap();
        cache.get(root).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.cached(root).is_some());
    }

    #[tokio::test]
    async fn roots_are_cached_independently() {
        let (cache, calls) = counting();

        cache.get(Path::new("/a")).await.unwrap();
        cache.get(Path::new("/b")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn refresh_replaces_the_snapshot() {
        let (cache, calls) = counting();
        let root = Path::new("/workspace");

        let before = cache.get(root).await.unwrap();
        let after = cache.refresh(root).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(before.types.contains_key("Version0"));
        assert!(after.types.contains_key("Version1"));
        assert!(cache.cached(root).unwrap().types.contains_key("Version1"));
    }

    #[tokio::test]
    async fn invalidate_forces_reload() {
        let (cache, calls) = counting();
        let root = Path::new("/workspace");

        cache.get(root).await.unwrap();
        cache.invalidate(root);
        assert!(cache.cached(root).is_none());

        cache.get(root).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_load_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let cache = SchemaCache::new(move |_root: &Path| -> crate::Result<Schema> {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(SchemaError::NoSchemaFiles)
            } else {
                Ok(schema_with("User"))
            }
        });
        let root = Path::new("/workspace");

        assert!(cache.get(root).await.is_none());
        assert!(cache.get(root).await.is_some());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
