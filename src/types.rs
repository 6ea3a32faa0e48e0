//! Shared error taxonomy and content classification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of failure kinds the pipeline can surface.
///
/// Validation and empty-result failures are raised before any external call
/// is made. Gateway failures are fatal in batch mode and caught-and-counted
/// in per-item mode. Bootstrap failures abort a per-item run before any
/// record is processed.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Malformed or missing required input fields.
    #[error("invalid request: {0}")]
    Validation(String),
    /// Chunking or extraction produced nothing to embed.
    #[error("nothing to ingest: {0}")]
    EmptyResult(String),
    /// An embedding or vector-store call failed. Not retried.
    #[error("gateway failure: {0}")]
    Gateway(String),
    /// Collection existence-check/create failed during per-item setup.
    #[error("collection bootstrap failed: {0}")]
    Bootstrap(String),
    /// Filesystem access failed (batch-run input files).
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Stable category tag used in caller-facing error payloads.
    pub fn category(&self) -> &'static str {
        match self {
            IngestError::Validation(_) => "validation_error",
            IngestError::EmptyResult(_) => "empty_result",
            IngestError::Gateway(_) => "gateway_error",
            IngestError::Bootstrap(_) => "bootstrap_error",
            IngestError::Io(_) => "io_error",
        }
    }
}

/// Uniform error payload returned at the caller boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

impl From<&IngestError> for ErrorBody {
    fn from(err: &IngestError) -> Self {
        Self {
            error: err.category().to_string(),
            details: err.to_string(),
        }
    }
}

/// Kind of source a stored point originated from.
///
/// Persisted in every payload as `contentType` so mixed search results stay
/// attributable to their ingestion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    LinkedIn,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::LinkedIn => "linkedin",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_carries_category_and_message() {
        let err = IngestError::EmptyResult("no chunks created from content".into());
        let body = ErrorBody::from(&err);
        assert_eq!(body.error, "empty_result");
        assert_eq!(body.details, "nothing to ingest: no chunks created from content");
    }

    #[test]
    fn content_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(ContentKind::LinkedIn).unwrap(),
            serde_json::json!("linkedin")
        );
        assert_eq!(
            serde_json::to_value(ContentKind::Article).unwrap(),
            serde_json::json!("article")
        );
    }
}
