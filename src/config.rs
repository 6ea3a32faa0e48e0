//! Environment-driven configuration for the real gateways.

use std::env;

use crate::chunking::ChunkParams;
use crate::ingestion::CollectionNames;
use crate::types::IngestError;

/// Connection and tuning settings resolved from the environment.
///
/// Recognized variables (unset falls back to the default):
///
/// * `OPENAI_API_KEY` — required
/// * `OPENAI_BASE_URL` — `https://api.openai.com/v1`
/// * `EMBEDDING_MODEL` — `text-embedding-3-small`
/// * `EMBEDDING_DIMENSIONS` — `512`
/// * `QDRANT_URL` — `http://localhost:6333`
/// * `QDRANT_API_KEY` — unset (no auth header)
/// * `ARTICLES_COLLECTION` — `articles`
/// * `POSTS_COLLECTION` — `linkedin-posts`
/// * `MAX_CHUNK_SIZE` — `500`
/// * `CHUNK_OVERLAP` — `50`
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub embedding_model: String,
    pub embedding_dimensions: usize,
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub collections: CollectionNames,
    pub chunk_params: ChunkParams,
}

impl PipelineConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, IngestError> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| IngestError::Validation("OPENAI_API_KEY is not set".into()))?;
        let embedding_dimensions = parse_var("EMBEDDING_DIMENSIONS", 512)?;
        let max_chunk_size = parse_var("MAX_CHUNK_SIZE", 500)?;
        let overlap_size = parse_var("CHUNK_OVERLAP", 50)?;

        Ok(Self {
            openai_api_key,
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            embedding_model: env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
            embedding_dimensions,
            qdrant_url: env::var("QDRANT_URL")
                .unwrap_or_else(|_| "http://localhost:6333".to_string()),
            qdrant_api_key: env::var("QDRANT_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            collections: CollectionNames {
                articles: env::var("ARTICLES_COLLECTION")
                    .unwrap_or_else(|_| "articles".to_string()),
                posts: env::var("POSTS_COLLECTION")
                    .unwrap_or_else(|_| "linkedin-posts".to_string()),
            },
            chunk_params: ChunkParams::new(max_chunk_size, overlap_size)?,
        })
    }
}

fn parse_var(name: &str, default: usize) -> Result<usize, IngestError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<usize>()
            .map_err(|err| IngestError::Validation(format!("{name} must be an integer: {err}"))),
        Err(_) => Ok(default),
    }
}
