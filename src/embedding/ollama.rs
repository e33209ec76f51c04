use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::core::error::{Result, TesauroError};

use super::cache::EmbeddingCache;
use super::provider::EmbeddingProvider;

#[derive(Serialize)]
struct OllamaEmbeddingRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

/// Ollama embedding client. The embeddings endpoint takes one prompt per
/// request, so batches are issued sequentially.
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    client: Client,
    cache: EmbeddingCache,
}

impl OllamaEmbedder {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
        cache_size: usize,
        cache_ttl: u64,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let model = model.into();
        info!("Ollama embedder initialized (model={}, url={})", model, base_url);
        Ok(Self {
            base_url,
            model,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()?,
            cache: EmbeddingCache::new(cache_size, cache_ttl),
        })
    }

    pub fn localhost(model: impl Into<String>) -> Result<Self> {
        Self::new(
            crate::DEFAULT_OLLAMA_URL,
            model,
            30,
            crate::DEFAULT_CACHE_SIZE,
            crate::DEFAULT_CACHE_TTL,
        )
    }

    async fn request_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let request = OllamaEmbeddingRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| TesauroError::EmbeddingService(e.to_string()))?
            .error_for_status()
            .map_err(|e| TesauroError::EmbeddingService(e.to_string()))?
            .json::<OllamaEmbeddingResponse>()
            .await
            .map_err(|e| TesauroError::EmbeddingService(e.to_string()))?;

        if response.embedding.is_empty() {
            return Err(TesauroError::InvalidResponse(
                "Ollama returned an empty embedding".to_string(),
            ));
        }
        Ok(response.embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        if let Some(cached) = self.cache.get(text) {
            debug!("Cache HIT for: {}", crate::safe_truncate(text, 50));
            return Ok(cached);
        }
        let embedding = self.request_embedding(text).await?;
        self.cache.set(text, embedding.clone());
        Ok(embedding)
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.encode(text).await?);
        }
        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localhost_uses_default_url() {
        let embedder = OllamaEmbedder::localhost("nomic-embed-text").unwrap();
        assert_eq!(embedder.base_url, crate::DEFAULT_OLLAMA_URL);
        assert_eq!(embedder.model, "nomic-embed-text");
        assert!(embedder.cache.is_empty());
    }
}
