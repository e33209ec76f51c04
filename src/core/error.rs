use thiserror::Error;

#[derive(Error, Debug)]
pub enum TesauroError {
    #[error("Thesaurus source not found: {0}")]
    SourceNotFound(String),

    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    #[error("Embedding provider not implemented: {0}")]
    ProviderNotImplemented(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TesauroError>;
