use tracing::{info, warn};

use crate::core::error::{Result, TesauroError};
use crate::embedding::EmbeddingProvider;
use crate::thesaurus::AuthorityTable;

/// One indexed phrasing with its embedding.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub phrasing: String,
    pub vector: Vec<f32>,
}

/// Embeddings for every distinct phrasing in an authority table. Built
/// once, immutable afterwards; safe to share across concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct SemanticIndex {
    entries: Vec<IndexEntry>,
}

impl SemanticIndex {
    /// Embeds every distinct phrasing in one batch. An empty table yields
    /// an empty index without invoking the provider; the matcher then
    /// degrades to exact-only lookups.
    pub async fn build(
        table: &AuthorityTable,
        provider: &dyn EmbeddingProvider,
    ) -> Result<Self> {
        let phrasings = table.phrasings();
        if phrasings.is_empty() {
            warn!("Authority table is empty; semantic index will return no results");
            return Ok(Self::default());
        }

        let vectors = provider.encode_batch(&phrasings).await?;
        if vectors.len() != phrasings.len() {
            return Err(TesauroError::InvalidResponse(format!(
                "Expected {} vectors from batch encode, got {}",
                phrasings.len(),
                vectors.len()
            )));
        }

        let entries: Vec<IndexEntry> = phrasings
            .into_iter()
            .zip(vectors)
            .map(|(phrasing, vector)| IndexEntry { phrasing, vector })
            .collect();

        info!("Semantic index built: {} phrasings embedded", entries.len());
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
