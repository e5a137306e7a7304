//! Compute-once memoization of fetched collections.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;

use crate::error::Result;
use crate::models::{Cohort, Record};

/// A fetched collection shared read-only with every caller.
pub type Collection = Arc<Vec<Record>>;

/// Logical identity of a cached collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Laptops(Cohort),
    Users,
    Models,
    Manufacturers,
    Statuses,
}

/// Per-process cache of collections, each produced at most once.
///
/// Every key owns its own [`OnceCell`], so concurrent callers asking for the
/// same key wait on a single producer while different keys proceed
/// independently. A producer that fails leaves its key empty.
#[derive(Debug, Default)]
pub struct RecordCache {
    entries: Mutex<HashMap<CacheKey, Arc<OnceCell<Collection>>>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached collection for `key`, running `producer` on a miss.
    ///
    /// # Errors
    ///
    /// Propagates the producer's error; nothing is cached in that case.
    pub async fn get_or_fetch<F, Fut>(&self, key: CacheKey, producer: F) -> Result<Collection>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Record>>>,
    {
        let cell = self.cell(key);

        if let Some(collection) = cell.get() {
            tracing::debug!(?key, "cache hit");
            return Ok(Arc::clone(collection));
        }

        let collection = cell
            .get_or_try_init(|| async {
                tracing::debug!(?key, "cache miss");
                producer().await.map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(collection))
    }

    /// Whether `key` holds a collection.
    pub fn contains(&self, key: CacheKey) -> bool {
        self.lock()
            .get(&key)
            .is_some_and(|cell| cell.initialized())
    }

    /// Number of populated keys.
    pub fn len(&self) -> usize {
        self.lock().values().filter(|cell| cell.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, key: CacheKey) -> Arc<OnceCell<Collection>> {
        Arc::clone(self.lock().entry(key).or_default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Arc<OnceCell<Collection>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
