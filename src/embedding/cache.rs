//! Process-wide embedding memoization.
//!
//! Entries are keyed by a SHA-256 of the model id and the exact input, and
//! live as long as the cache. There is no eviction: an on-disk data change
//! produces new descriptors and therefore a new key, while the stale entry
//! simply stays unused.

use super::Embedder;
use crate::error::{AshaError, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, instrument};

/// Hit/miss counters for one cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe key to value memo table.
///
/// Lookups take a read lock; a miss computes outside any lock and then
/// inserts under a write lock. Two callers racing on the same key may both
/// compute, but only the first insert is kept and both receive it.
pub struct EmbeddingCache<V> {
    entries: RwLock<HashMap<String, Arc<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V> EmbeddingCache<V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a cached value without computing.
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// A failed computation stores nothing.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute().await?;

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(entries
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(value))
            .clone())
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

impl<V> Default for EmbeddingCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a cache key from the model id, the key kind and the exact payload.
pub fn content_key(model: &str, kind: &str, payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(model.as_bytes());
    hasher.update([0u8]);
    hasher.update(kind.as_bytes());
    hasher.update([0u8]);
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}

/// An [`Embedder`] fronted by query and corpus caches.
///
/// One instance is shared by every retrieval call in the process.
pub struct CachedEmbedder {
    embedder: Arc<dyn Embedder>,
    queries: EmbeddingCache<Vec<f32>>,
    corpora: EmbeddingCache<Vec<Vec<f32>>>,
}

impl CachedEmbedder {
    /// Wrap an embedder with empty caches.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            queries: EmbeddingCache::new(),
            corpora: EmbeddingCache::new(),
        }
    }

    /// Model identifier of the wrapped embedder.
    pub fn model(&self) -> &str {
        self.embedder.model()
    }

    /// Embed a single query string, memoized on the exact text.
    #[instrument(skip(self, query))]
    pub async fn embed_query(&self, query: &str) -> Result<Arc<Vec<f32>>> {
        let key = content_key(self.embedder.model(), "query", query);
        self.queries
            .get_or_compute(&key, || self.embedder.embed(query))
            .await
    }

    /// Embed an ordered descriptor list, memoized on the whole list.
    #[instrument(skip(self, descriptors), fields(count = descriptors.len()))]
    pub async fn embed_corpus(&self, descriptors: &[String]) -> Result<Arc<Vec<Vec<f32>>>> {
        let payload = serde_json::to_string(descriptors)?;
        let key = content_key(self.embedder.model(), "corpus", &payload);

        self.corpora
            .get_or_compute(&key, || async {
                let vectors = self.embedder.embed_batch(descriptors).await?;
                if vectors.len() != descriptors.len() {
                    return Err(AshaError::Embedding(format!(
                        "expected {} vectors, got {}",
                        descriptors.len(),
                        vectors.len()
                    )));
                }
                debug!("Embedded corpus of {} descriptors", vectors.len());
                Ok(vectors)
            })
            .await
    }

    /// Counters for the query cache.
    pub fn query_stats(&self) -> CacheStats {
        self.queries.stats()
    }

    /// Counters for the corpus cache.
    pub fn corpus_stats(&self) -> CacheStats {
        self.corpora.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::KeywordEmbedder;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn test_get_or_compute_returns_same_object() {
        let cache: EmbeddingCache<Vec<f32>> = EmbeddingCache::new();
        let calls = AtomicUsize::new(0);

        let compute = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1.0, 2.0])
        };

        let first = cache.get_or_compute("k", compute).await.unwrap();
        let second = cache
            .get_or_compute("k", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![1.0, 2.0])
            })
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1, entries: 1 });
    }

    #[tokio::test]
    async fn test_failed_compute_is_not_cached() {
        let cache: EmbeddingCache<Vec<f32>> = EmbeddingCache::new();

        let result = cache
            .get_or_compute("k", || async { Err(AshaError::Embedding("boom".to_string())) })
            .await;
        assert!(result.is_err());
        assert!(cache.is_empty());

        let value = cache.get_or_compute("k", || async { Ok(vec![0.5]) }).await.unwrap();
        assert_eq!(*value, vec![0.5]);
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_first_insert() {
        let cache: EmbeddingCache<Vec<f32>> = EmbeddingCache::new();

        let (a, b) = tokio::join!(
            cache.get_or_compute("k", || async {
                tokio::task::yield_now().await;
                Ok(vec![1.0])
            }),
            cache.get_or_compute("k", || async {
                tokio::task::yield_now().await;
                Ok(vec![2.0])
            }),
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, vec![1.0]);
        assert_eq!(cache.stats(), CacheStats { hits: 0, misses: 2, entries: 1 });
    }

    #[test]
    fn test_content_key_separates_model_and_kind() {
        let a = content_key("model-a", "query", "hello");
        assert_eq!(a, content_key("model-a", "query", "hello"));
        assert_ne!(a, content_key("model-b", "query", "hello"));
        assert_ne!(a, content_key("model-a", "corpus", "hello"));
        assert_eq!(a.len(), 64);
    }

    #[tokio::test]
    async fn test_cached_embedder_invokes_model_once() {
        let inner = Arc::new(KeywordEmbedder::new(&["python", "design"]));
        let cached = CachedEmbedder::new(inner.clone());

        let q1 = cached.embed_query("python jobs").await.unwrap();
        let q2 = cached.embed_query("python jobs").await.unwrap();
        assert!(Arc::ptr_eq(&q1, &q2));

        let corpus = vec!["Python dev".to_string(), "UX design".to_string()];
        let c1 = cached.embed_corpus(&corpus).await.unwrap();
        let c2 = cached.embed_corpus(&corpus).await.unwrap();
        assert!(Arc::ptr_eq(&c1, &c2));
        assert_eq!(c1.len(), 2);

        assert_eq!(inner.calls(), 2);
        assert_eq!(cached.query_stats().hits, 1);
        assert_eq!(cached.corpus_stats().misses, 1);
    }

    #[tokio::test]
    async fn test_corpus_order_changes_key() {
        let inner = Arc::new(KeywordEmbedder::new(&["a", "b"]));
        let cached = CachedEmbedder::new(inner.clone());

        cached.embed_corpus(&["a".to_string(), "b".to_string()]).await.unwrap();
        cached.embed_corpus(&["b".to_string(), "a".to_string()]).await.unwrap();

        assert_eq!(inner.calls(), 2);
        assert_eq!(cached.corpus_stats().entries, 2);
    }

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats { hits: 3, misses: 1, entries: 1 };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
