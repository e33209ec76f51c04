pub mod cache;
pub mod ollama;
pub mod openai;
pub mod provider;

pub use cache::EmbeddingCache;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;
pub use provider::EmbeddingProvider;

use std::sync::Arc;

use crate::core::config::TesauroConfig;
use crate::core::error::{Result, TesauroError};

/// Cosine similarity between two vectors. Zero-norm or length-mismatched
/// inputs score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Builds the provider named by the configuration.
pub fn provider_from_config(config: &TesauroConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    match config.embedding_provider.to_lowercase().as_str() {
        "ollama" => Ok(Arc::new(OllamaEmbedder::new(
            &config.embedding_url,
            &config.embedding_model,
            config.timeout,
            config.cache_size,
            config.cache_ttl,
        )?)),
        "openai" => {
            let api_key = config.embedding_api_key.clone().ok_or_else(|| {
                TesauroError::Config("OpenAI embedding provider requires an API key".to_string())
            })?;
            Ok(Arc::new(OpenAiEmbedder::new(
                api_key,
                &config.embedding_model,
                config.embedding_base_url.clone(),
                config.timeout,
                config.cache_size,
                config.cache_ttl,
            )?))
        }
        other => Err(TesauroError::ProviderNotImplemented(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors() {
        let v = vec![0.5, 0.5, 0.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_norm_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_length_mismatch_is_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }
}
