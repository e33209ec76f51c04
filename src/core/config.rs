use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TesauroConfig {
    pub thesaurus_path: String,

    pub embedding_provider: String,
    pub embedding_model: String,
    pub embedding_url: String,
    pub embedding_api_key: Option<String>,
    pub embedding_base_url: Option<String>,
    pub timeout: u64,

    pub cache_size: usize,
    pub cache_ttl: u64,

    pub default_threshold: f32,
}

impl TesauroConfig {
    pub fn new(thesaurus_path: &str) -> Self {
        Self {
            thesaurus_path: thesaurus_path.to_string(),

            embedding_provider: "ollama".to_string(),
            embedding_model: crate::DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_url: crate::DEFAULT_OLLAMA_URL.to_string(),
            embedding_api_key: None,
            embedding_base_url: None,
            timeout: 30,

            cache_size: crate::DEFAULT_CACHE_SIZE,
            cache_ttl: crate::DEFAULT_CACHE_TTL,

            default_threshold: crate::RECOMMENDED_THRESHOLD,
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::new(
            &std::env::var("TESAURO_THESAURUS_PATH").unwrap_or_else(|_| "thesaurus.txt".to_string()),
        );

        if let Ok(provider) = std::env::var("TESAURO_EMBEDDING_PROVIDER") {
            config.embedding_provider = provider;
        }
        if let Ok(model) = std::env::var("TESAURO_EMBEDDING_MODEL") {
            config.embedding_model = model;
        }
        if let Ok(url) = std::env::var("TESAURO_EMBEDDING_URL") {
            config.embedding_url = url;
        }
        if let Ok(key) = std::env::var("TESAURO_EMBEDDING_API_KEY") {
            config.embedding_api_key = Some(key);
        }
        if let Ok(url) = std::env::var("TESAURO_EMBEDDING_BASE_URL") {
            config.embedding_base_url = Some(url);
        }
        if let Ok(timeout) = std::env::var("TESAURO_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                config.timeout = t;
            }
        }
        if let Ok(size) = std::env::var("TESAURO_CACHE_SIZE") {
            if let Ok(s) = size.parse() {
                config.cache_size = s;
            }
        }
        if let Ok(ttl) = std::env::var("TESAURO_CACHE_TTL") {
            if let Ok(t) = ttl.parse() {
                config.cache_ttl = t;
            }
        }
        if let Ok(threshold) = std::env::var("TESAURO_THRESHOLD") {
            if let Ok(t) = threshold.parse() {
                config.default_threshold = t;
            }
        }

        config
    }
}

impl Default for TesauroConfig {
    fn default() -> Self {
        Self::new("thesaurus.txt")
    }
}
