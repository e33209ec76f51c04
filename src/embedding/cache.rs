use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct CacheEntry {
    embedding: Vec<f32>,
    created_at: Instant,
}

/// Bounded TTL cache for per-text embeddings. When full, the oldest
/// entry is evicted.
pub struct EmbeddingCache {
    cache: RwLock<HashMap<String, CacheEntry>>,
    max_size: usize,
    ttl: Duration,
}

impl EmbeddingCache {
    pub fn new(max_size: usize, ttl_secs: u64) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            max_size,
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    pub fn get(&self, text: &str) -> Option<Vec<f32>> {
        let cache = self.cache.read();
        if let Some(entry) = cache.get(text) {
            if entry.created_at.elapsed() < self.ttl {
                return Some(entry.embedding.clone());
            }
        }
        None
    }

    pub fn set(&self, text: &str, embedding: Vec<f32>) {
        if self.max_size == 0 {
            return;
        }
        let mut cache = self.cache.write();
        if cache.len() >= self.max_size && !cache.contains_key(text) {
            if let Some(oldest_key) = cache
                .iter()
                .min_by_key(|(_, v)| v.created_at)
                .map(|(k, _)| k.clone())
            {
                cache.remove(&oldest_key);
            }
        }
        cache.insert(
            text.to_string(),
            CacheEntry {
                embedding,
                created_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}
