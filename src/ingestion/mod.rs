//! Ingestion orchestration: batch article uploads, single-post uploads, and
//! the per-item backfill run.
//!
//! * [`IngestPipeline`] — composes the chunker and extractor with the
//!   embedding and vector-store gateways.
//! * [`PointIdSource`] — injectable point identity generation.
//! * Request/receipt types mirroring the caller-facing contract.

mod pipeline;

pub use pipeline::{CollectionNames, IngestPipeline, IngestPipelineBuilder};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity source for new points.
///
/// Every upload gets a fresh id that is never reused, so reruns and
/// concurrent writers cannot overwrite unrelated data. Injectable so tests
/// can supply deterministic ids.
pub trait PointIdSource: Send + Sync {
    fn next_id(&self) -> Uuid;
}

/// Default id source: a random UUID v4 per point.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPointIds;

impl PointIdSource for RandomPointIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Metadata overrides applied uniformly to every chunk of an article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
    pub language: Option<String>,
}

/// Upload request for a long-form article (chunked before embedding).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleUpload {
    pub content: String,
    #[serde(default)]
    pub metadata: ArticleMetadata,
}

/// Optional attributes of a single post upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PostMetadata {
    pub url: Option<String>,
    pub date: Option<String>,
    pub likes: Option<u64>,
}

/// Upload request for a single un-chunked post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostUpload {
    pub content: String,
    #[serde(default)]
    pub metadata: PostMetadata,
}

/// Successful article ingestion receipt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleReceipt {
    pub success: bool,
    pub chunks_created: usize,
    pub vectors_uploaded: usize,
    pub content_length: usize,
}

/// Successful single-post ingestion receipt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostReceipt {
    pub success: bool,
    pub vectors_uploaded: usize,
    pub content_length: usize,
}

/// Tally of a per-item backfill run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackfillSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
}
