use async_trait::async_trait;

use crate::core::error::Result;

/// The embedding service as the matcher consumes it. Injected so the
/// engine can be exercised with a deterministic in-memory provider.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds one text into a fixed-length vector.
    async fn encode(&self, text: &str) -> Result<Vec<f32>>;

    /// Embeds a batch of texts. The output is order-preserving and
    /// one-to-one with the input.
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
