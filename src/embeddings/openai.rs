//! OpenAI-compatible embedding gateway client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::EmbeddingProvider;
use crate::types::IngestError;

/// Async embeddings client for OpenAI-compatible `/embeddings` endpoints.
///
/// The requested dimension count is sent with every call so the provider
/// returns vectors sized for the target collection, and response entries
/// are re-sorted by their `index` field before being returned in request
/// order.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbedder {
    /// Builds a client for `base_url`, e.g. `https://api.openai.com/v1`.
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: &str,
        dimensions: usize,
    ) -> Result<Self, IngestError> {
        if api_key.trim().is_empty() {
            return Err(IngestError::Validation("missing embedding API key".into()));
        }
        if model.trim().is_empty() {
            return Err(IngestError::Validation("missing embedding model name".into()));
        }
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|err| IngestError::Validation(format!("invalid embedding API key: {err}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .use_rustls_tls()
            .build()
            .map_err(|err| {
                IngestError::Gateway(format!("failed to build embedding HTTP client: {err}"))
            })?;
        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            model: model.to_string(),
            dimensions,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, IngestError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        let request = EmbeddingRequest {
            model: &self.model,
            input: inputs,
            dimensions: self.dimensions,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| IngestError::Gateway(format!("embedding request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(IngestError::Gateway(format!(
                "embedding request failed ({status}): {body}"
            )));
        }

        let mut parsed: EmbeddingResponse = response.json().await.map_err(|err| {
            IngestError::Gateway(format!("failed to parse embedding response: {err}"))
        })?;
        parsed.data.sort_by_key(|entry| entry.index);
        if parsed.data.len() != inputs.len() {
            return Err(IngestError::Gateway(format!(
                "embedding gateway returned {} vectors for {} inputs",
                parsed.data.len(),
                inputs.len()
            )));
        }
        Ok(parsed.data.into_iter().map(|entry| entry.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    dimensions: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
