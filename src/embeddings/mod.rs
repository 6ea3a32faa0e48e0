//! Embedding gateway abstractions and clients.
//!
//! * [`EmbeddingProvider`] — the seam the ingestion pipeline embeds through.
//! * [`OpenAiEmbedder`] — client for OpenAI-compatible `/embeddings`
//!   endpoints.
//! * [`MockEmbeddingProvider`] — deterministic offline provider for tests
//!   and demos.

mod openai;

pub use openai::OpenAiEmbedder;

use async_trait::async_trait;

use crate::types::IngestError;

/// Batch text-to-vector gateway.
///
/// Implementations must preserve order: `embed_batch(inputs)[i]` is the
/// vector for `inputs[i]`, and every returned vector has `dimensions()`
/// entries. Failures are opaque and propagated as-is; no retries happen at
/// this layer.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a batch of texts, one vector per input, in input order.
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, IngestError>;

    /// Fixed vector width produced by this provider.
    fn dimensions(&self) -> usize;

    /// Convenience wrapper for a single text.
    async fn embed_one(&self, input: &str) -> Result<Vec<f32>, IngestError> {
        let inputs = [input.to_string()];
        let mut vectors = self.embed_batch(&inputs).await?;
        if vectors.len() != 1 {
            return Err(IngestError::Gateway(format!(
                "embedding gateway returned {} vectors for a single input",
                vectors.len()
            )));
        }
        Ok(vectors.remove(0))
    }
}

/// Deterministic offline provider.
///
/// Vectors are derived from a hash of the input text, so identical text
/// always embeds identically and distinct text almost never collides.
#[derive(Debug, Clone)]
pub struct MockEmbeddingProvider {
    dimensions: usize,
}

impl MockEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new(8)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, IngestError> {
        Ok(inputs
            .iter()
            .map(|text| hash_to_vec(text, self.dimensions))
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn hash_to_vec(text: &str, dimensions: usize) -> Vec<f32> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    let seed = hasher.finish();
    (0..dimensions)
        .map(|i| {
            let bits = seed.rotate_left((i % 8) as u32 * 8) ^ ((i as u64) << 24);
            (bits as f32) / u32::MAX as f32
        })
        .collect()
}
