pub mod core;
pub mod embedding;
pub mod matcher;
pub mod thesaurus;
pub mod utils;

pub use utils::{safe_truncate, safe_truncate_ellipsis};

pub use crate::core::config::TesauroConfig;
pub use crate::core::error::{Result, TesauroError};
pub use embedding::{cosine_similarity, EmbeddingProvider, OllamaEmbedder, OpenAiEmbedder};
pub use matcher::{SemanticIndex, TermMatch, TermSuggester};
pub use thesaurus::{normalize_phrase, parse, parse_file, AuthorityTable};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

pub const DEFAULT_CACHE_SIZE: usize = 1000;

pub const DEFAULT_CACHE_TTL: u64 = 300;

/// Recommended similarity threshold. Raise towards 0.7 for precision,
/// lower towards 0.5 for recall.
pub const RECOMMENDED_THRESHOLD: f32 = 0.6;
