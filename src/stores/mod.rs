//! Vector store gateway abstractions.
//!
//! [`VectorStore`] is the seam between the ingestion pipeline and whatever
//! vector database actually persists points; [`qdrant::QdrantStore`] is the
//! REST implementation used in production. Collections are created lazily
//! with a fixed vector width and distance metric and are never reshaped
//! afterwards.

pub mod qdrant;

pub use qdrant::QdrantStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::IngestError;

/// Similarity metric fixed at collection creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    Cosine,
}

/// The atomic persisted unit: id, vector, and payload.
///
/// Ids are generated fresh per upload and never reused, so concurrent or
/// repeated writers cannot collide on a key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: serde_json::Value,
}

/// Minimal collection info surfaced by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub points_count: Option<u64>,
}

/// Gateway to a named-collection vector database.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Upserts `points` into `collection`. With `wait` set, a success
    /// return implies the write is durable, not merely accepted.
    async fn upsert(
        &self,
        collection: &str,
        points: Vec<Point>,
        wait: bool,
    ) -> Result<(), IngestError>;

    /// Fetches collection info. Callers treat any error as "the collection
    /// does not exist".
    async fn get_collection(&self, collection: &str) -> Result<CollectionInfo, IngestError>;

    /// Creates `collection` with a fixed vector width and distance metric.
    async fn create_collection(
        &self,
        collection: &str,
        vector_size: usize,
        distance: Distance,
    ) -> Result<(), IngestError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn point_serializes_to_flat_wire_shape() {
        let point = Point {
            id: Uuid::nil(),
            vector: vec![0.5, -0.25],
            payload: json!({"content": "hi", "contentType": "article"}),
        };
        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(value["vector"], json!([0.5, -0.25]));
        assert_eq!(value["payload"]["contentType"], "article");
    }

    #[test]
    fn distance_uses_qdrant_spelling() {
        assert_eq!(serde_json::to_value(Distance::Cosine).unwrap(), json!("Cosine"));
    }
}
