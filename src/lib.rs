//! Ingestion pipeline that turns raw text into embedded, payload-rich points
//! in a Qdrant-compatible vector store.
//!
//! ```text
//! Raw article text ──► chunking::chunk_text ──────► Vec<Chunk>
//!                                                       │
//! LinkedIn CSV ──► extract::extract_posts ──► Vec<PostRecord>
//!                                                       │
//!                     embeddings::EmbeddingProvider ◄───┤ (batch or per item,
//!                                                       │  order-preserving)
//!                     ingestion::IngestPipeline ────────┤
//!                                                       ▼
//!                     stores::VectorStore ──► waited upsert of Points
//! ```
//!
pub mod chunking;
pub mod config;
pub mod embeddings;
pub mod extract;
pub mod ingestion;
pub mod stores;
pub mod types;

pub use ingestion::{
    ArticleReceipt, ArticleUpload, BackfillSummary, IngestPipeline, PostReceipt, PostUpload,
};
pub use types::{ContentKind, ErrorBody, IngestError};
