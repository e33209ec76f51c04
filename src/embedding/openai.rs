use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::core::error::{Result, TesauroError};

use super::cache::EmbeddingCache;
use super::provider::EmbeddingProvider;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct OpenAiEmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbeddingData>,
}

#[derive(Deserialize)]
struct OpenAiEmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

/// OpenAI-compatible embedding client. The endpoint accepts the whole
/// batch in one request; `base_url` allows pointing at compatible
/// gateways.
pub struct OpenAiEmbedder {
    api_url: String,
    api_key: String,
    model: String,
    client: Client,
    cache: EmbeddingCache,
}

impl OpenAiEmbedder {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: Option<String>,
        timeout_secs: u64,
        cache_size: usize,
        cache_ttl: u64,
    ) -> Result<Self> {
        let model = model.into();
        let api_url = base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        info!("OpenAI embedder initialized (model={}, url={})", model, api_url);
        Ok(Self {
            api_url,
            api_key: api_key.into(),
            model,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()?,
            cache: EmbeddingCache::new(cache_size, cache_ttl),
        })
    }

    async fn request_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = OpenAiEmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.api_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| TesauroError::EmbeddingService(e.to_string()))?
            .error_for_status()
            .map_err(|e| TesauroError::EmbeddingService(e.to_string()))?
            .json::<OpenAiEmbeddingResponse>()
            .await
            .map_err(|e| TesauroError::EmbeddingService(e.to_string()))?;

        if response.data.len() != texts.len() {
            return Err(TesauroError::InvalidResponse(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                response.data.len()
            )));
        }

        // The API documents order by `index`; sort rather than trust it.
        let mut data = response.data;
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        if let Some(cached) = self.cache.get(text) {
            debug!("Cache HIT for: {}", crate::safe_truncate(text, 50));
            return Ok(cached);
        }
        let mut vectors = self.request_embeddings(&[text.to_string()]).await?;
        let embedding = vectors
            .pop()
            .ok_or_else(|| TesauroError::InvalidResponse("No embedding in response".to_string()))?;
        self.cache.set(text, embedding.clone());
        Ok(embedding)
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts).await
    }
}
