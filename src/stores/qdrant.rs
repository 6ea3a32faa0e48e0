//! Qdrant REST implementation of [`VectorStore`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;

use super::{CollectionInfo, Distance, Point, VectorStore};
use crate::types::IngestError;

/// REST client for a Qdrant-compatible vector database.
#[derive(Clone)]
pub struct QdrantStore {
    client: Client,
    base_url: Url,
}

impl QdrantStore {
    /// Builds a store client for `base_url` (e.g. `http://localhost:6333`),
    /// sending the `api-key` header on every request when a key is given.
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self, IngestError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| IngestError::Validation(format!("invalid vector store URL: {err}")))?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key.map(str::trim).filter(|key| !key.is_empty()) {
            headers.insert(
                "api-key",
                HeaderValue::from_str(key).map_err(|err| {
                    IngestError::Validation(format!("invalid vector store API key: {err}"))
                })?,
            );
        }
        let client = Client::builder()
            .default_headers(headers)
            .use_rustls_tls()
            .build()
            .map_err(|err| {
                IngestError::Gateway(format!("failed to build vector store HTTP client: {err}"))
            })?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IngestError> {
        self.base_url
            .join(path)
            .map_err(|err| IngestError::Validation(format!("invalid store path '{path}': {err}")))
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn upsert(
        &self,
        collection: &str,
        points: Vec<Point>,
        wait: bool,
    ) -> Result<(), IngestError> {
        let url = self.endpoint(&format!("collections/{collection}/points"))?;
        debug!(collection, points = points.len(), wait, "upserting points");
        let response = self
            .client
            .put(url)
            .query(&[("wait", wait)])
            .json(&UpsertRequest { points })
            .send()
            .await
            .map_err(|err| IngestError::Gateway(format!("vector store upsert failed: {err}")))?;
        check_status("upsert", response).await?;
        Ok(())
    }

    async fn get_collection(&self, collection: &str) -> Result<CollectionInfo, IngestError> {
        let url = self.endpoint(&format!("collections/{collection}"))?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| IngestError::Gateway(format!("collection lookup failed: {err}")))?;
        let response = check_status("collection lookup", response).await?;
        let parsed: ApiResponse<CollectionInfo> = response.json().await.map_err(|err| {
            IngestError::Gateway(format!("failed to parse collection info: {err}"))
        })?;
        Ok(parsed.result.unwrap_or_default())
    }

    async fn create_collection(
        &self,
        collection: &str,
        vector_size: usize,
        distance: Distance,
    ) -> Result<(), IngestError> {
        let url = self.endpoint(&format!("collections/{collection}"))?;
        debug!(collection, vector_size, "creating vector store collection");
        let body = json!({
            "vectors": { "size": vector_size, "distance": distance },
        });
        let response = self
            .client
            .put(url)
            .json(&body)
            .send()
            .await
            .map_err(|err| IngestError::Gateway(format!("collection create failed: {err}")))?;
        check_status("collection create", response).await?;
        Ok(())
    }
}

async fn check_status(
    operation: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, IngestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<body unavailable>".to_string());
    Err(IngestError::Gateway(format!(
        "vector store {operation} failed ({status}): {body}"
    )))
}

#[derive(Serialize)]
struct UpsertRequest {
    points: Vec<Point>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    #[serde(default)]
    result: Option<T>,
}
