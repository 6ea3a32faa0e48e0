//! Fixed-window text chunking with overlap.
//!
//! The chunker is a pure function: identical inputs always yield identical
//! segments and no I/O happens here. Windows are measured in characters of
//! the normalized (trimmed) input, and every emitted chunk records the
//! half-open character span it was cut from so downstream consumers can
//! verify coverage.

use serde::{Deserialize, Serialize};

use crate::types::{ContentKind, IngestError};

/// Window geometry for [`chunk_text`].
///
/// Overlap keeps context continuity across window boundaries: large enough
/// to preserve a phrase spanning a boundary, small enough to avoid
/// near-duplicate segments. Both knobs are tunable, not policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkParams {
    max_chunk_size: usize,
    overlap_size: usize,
}

impl ChunkParams {
    /// Validates window geometry. `overlap_size` must be strictly smaller
    /// than `max_chunk_size`; anything else is a configuration error.
    pub fn new(max_chunk_size: usize, overlap_size: usize) -> Result<Self, IngestError> {
        if max_chunk_size == 0 || overlap_size >= max_chunk_size {
            return Err(IngestError::Validation(format!(
                "chunk overlap {overlap_size} must be smaller than window size {max_chunk_size}"
            )));
        }
        Ok(Self {
            max_chunk_size,
            overlap_size,
        })
    }

    /// Maximum characters per chunk.
    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    /// Characters shared between consecutive chunks.
    pub fn overlap_size(&self) -> usize {
        self.overlap_size
    }

    /// Characters the window start advances between chunks.
    pub fn stride(&self) -> usize {
        self.max_chunk_size - self.overlap_size
    }
}

impl Default for ChunkParams {
    /// Defaults sized for embedding short article passages: 500-character
    /// windows with 50 characters of overlap.
    fn default() -> Self {
        Self {
            max_chunk_size: 500,
            overlap_size: 50,
        }
    }
}

/// Positional and source metadata carried by every chunk.
///
/// Serialized with camelCase keys because chunk metadata lands verbatim in
/// persisted point payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    pub source: String,
    pub chunk_index: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// A bounded substring of source text, tagged and sized for embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    pub content: String,
    pub metadata: ChunkMetadata,
}

/// Splits `text` into overlapping windows attributed to `source`.
///
/// The window start advances by [`ChunkParams::stride`] characters each
/// step; the final window is truncated to the remaining text and still
/// emitted, never dropped. Offsets are absolute character positions in the
/// normalized text, `chunk_index` is contiguous from zero, and
/// `start_offset` is strictly increasing.
///
/// Empty (or whitespace-only) input yields an empty vector; callers treat
/// that as "nothing to ingest".
pub fn chunk_text(text: &str, params: ChunkParams, source: &str) -> Vec<Chunk> {
    let normalized = text.trim();
    if normalized.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = normalized.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0usize;

    loop {
        let end = (start + params.max_chunk_size()).min(chars.len());
        let content: String = chars[start..end].iter().collect();
        chunks.push(Chunk {
            content,
            metadata: ChunkMetadata {
                source: source.to_string(),
                chunk_index: chunks.len(),
                start_offset: start,
                end_offset: end,
                ..Default::default()
            },
        });
        // Terminating on the window that reached the end guarantees the
        // trailing segment is emitted exactly once and is never empty.
        if end == chars.len() {
            break;
        }
        start += params.stride();
    }

    chunks
}
