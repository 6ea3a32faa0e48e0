//! The orchestrator tying chunking, embedding, and persistence together.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::chunking::{chunk_text, ChunkParams};
use crate::embeddings::EmbeddingProvider;
use crate::extract::{extract_posts, PostRecord};
use crate::stores::{Distance, Point, VectorStore};
use crate::types::{ContentKind, IngestError};

use super::{
    ArticleReceipt, ArticleUpload, BackfillSummary, PointIdSource, PostReceipt, PostUpload,
    RandomPointIds,
};

/// Names of the collections each content kind lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionNames {
    pub articles: String,
    pub posts: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            articles: "articles".to_string(),
            posts: "linkedin-posts".to_string(),
        }
    }
}

/// Composes the chunker and record extractor with the embedding and
/// vector-store gateways.
///
/// All collaborators are injected and their lifecycles belong to the
/// caller; the pipeline holds no global state. Batch mode (articles)
/// embeds every chunk in one call and upserts every point in one waited
/// call, so the whole request succeeds or fails as a unit. Per-item mode
/// (the post backfill) trades throughput for fault isolation: one record's
/// failure never aborts the run.
pub struct IngestPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    ids: Arc<dyn PointIdSource>,
    chunk_params: ChunkParams,
    collections: CollectionNames,
}

impl std::fmt::Debug for IngestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestPipeline")
            .field("chunk_params", &self.chunk_params)
            .field("collections", &self.collections)
            .finish_non_exhaustive()
    }
}

impl IngestPipeline {
    pub fn builder() -> IngestPipelineBuilder {
        IngestPipelineBuilder::default()
    }

    /// Batch mode: chunk an article, embed all chunks in one call, and
    /// persist every resulting point in a single waited upsert.
    ///
    /// Rejected before any external call when the content is empty or
    /// yields zero chunks. A failed embedding call fails the whole request;
    /// partial success is not representable in this mode.
    pub async fn ingest_article(&self, upload: ArticleUpload) -> Result<ArticleReceipt, IngestError> {
        let ArticleUpload { content, metadata } = upload;
        if content.is_empty() {
            return Err(IngestError::Validation(
                "article content must not be empty".into(),
            ));
        }

        let source = metadata
            .url
            .clone()
            .unwrap_or_else(|| "user-upload".to_string());
        let mut chunks = chunk_text(&content, self.chunk_params, &source);
        if chunks.is_empty() {
            return Err(IngestError::EmptyResult(
                "no chunks created from content".into(),
            ));
        }
        for chunk in &mut chunks {
            chunk.metadata.content_type = Some(ContentKind::Article);
            chunk.metadata.title = metadata.title.clone();
            chunk.metadata.author = metadata.author.clone();
            chunk.metadata.date = metadata.date.clone();
            chunk.metadata.language = metadata.language.clone();
        }

        let inputs: Vec<String> = chunks.iter().map(|chunk| chunk.content.clone()).collect();
        let vectors = self.embedder.embed_batch(&inputs).await?;
        if vectors.len() != chunks.len() {
            return Err(IngestError::Gateway(format!(
                "embedding gateway returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        // Zip strictly by position: the gateway contract guarantees the
        // response order matches the request order.
        let mut points = Vec::with_capacity(chunks.len());
        for (chunk, vector) in chunks.into_iter().zip(vectors) {
            let mut payload = serde_json::to_value(&chunk.metadata).map_err(|err| {
                IngestError::Validation(format!("unserializable chunk metadata: {err}"))
            })?;
            payload["content"] = json!(chunk.content);
            points.push(Point {
                id: self.ids.next_id(),
                vector,
                payload,
            });
        }

        let uploaded = points.len();
        self.store
            .upsert(&self.collections.articles, points, true)
            .await?;

        info!(
            chunks = uploaded,
            collection = %self.collections.articles,
            "article ingested"
        );
        Ok(ArticleReceipt {
            success: true,
            chunks_created: uploaded,
            vectors_uploaded: uploaded,
            content_length: content.chars().count(),
        })
    }

    /// Ingests one un-chunked post: one embedding call, one waited upsert.
    pub async fn ingest_post(&self, upload: PostUpload) -> Result<PostReceipt, IngestError> {
        let PostUpload { content, metadata } = upload;
        if content.trim().is_empty() {
            return Err(IngestError::Validation(
                "post content must not be empty".into(),
            ));
        }

        let vector = self.embedder.embed_one(&content).await?;
        let point = Point {
            id: self.ids.next_id(),
            vector,
            payload: json!({
                "content": content,
                "url": metadata.url.unwrap_or_default(),
                "date": metadata.date.unwrap_or_default(),
                "likes": metadata.likes.unwrap_or(0),
                "contentType": ContentKind::LinkedIn,
            }),
        };
        self.store
            .upsert(&self.collections.posts, vec![point], true)
            .await?;

        Ok(PostReceipt {
            success: true,
            vectors_uploaded: 1,
            content_length: content.chars().count(),
        })
    }

    /// Per-item mode: bootstrap the posts collection, then embed and upsert
    /// every record of a raw CSV export one at a time.
    ///
    /// A failed record is logged with its URL and counted; processing
    /// continues with the next record. Each upsert waits for persistence,
    /// so interrupting the loop between iterations leaves already-written
    /// points durable.
    pub async fn backfill_posts(&self, raw_csv: &str) -> Result<BackfillSummary, IngestError> {
        self.ensure_posts_collection().await?;

        let outcome = extract_posts(raw_csv);
        if outcome.skipped_rows > 0 {
            warn!(
                skipped = outcome.skipped_rows,
                "dropped malformed rows during extraction"
            );
        }

        let total = outcome.posts.len();
        info!(total, "starting post backfill");

        let mut summary = BackfillSummary {
            total,
            ..Default::default()
        };
        for post in &outcome.posts {
            match self.upload_post_record(post).await {
                Ok(()) => {
                    summary.succeeded += 1;
                    info!(uploaded = summary.succeeded, total, url = %post.url, "uploaded post");
                }
                Err(err) => {
                    summary.failed += 1;
                    warn!(url = %post.url, %err, "failed to upload post");
                }
            }
        }

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            total,
            "post backfill complete"
        );
        Ok(summary)
    }

    /// Idempotent bootstrap for the posts collection: any lookup failure is
    /// treated as "collection missing" and triggers creation; creation
    /// failure is fatal and precedes all record processing.
    pub async fn ensure_posts_collection(&self) -> Result<(), IngestError> {
        match self.store.get_collection(&self.collections.posts).await {
            Ok(_) => {
                info!(collection = %self.collections.posts, "collection already exists");
                Ok(())
            }
            Err(err) => {
                info!(collection = %self.collections.posts, %err, "collection missing, creating");
                self.store
                    .create_collection(
                        &self.collections.posts,
                        self.embedder.dimensions(),
                        Distance::Cosine,
                    )
                    .await
                    .map_err(|err| IngestError::Bootstrap(err.to_string()))
            }
        }
    }

    async fn upload_post_record(&self, post: &PostRecord) -> Result<(), IngestError> {
        let vector = self.embedder.embed_one(&post.text).await?;
        let point = Point {
            id: self.ids.next_id(),
            vector,
            payload: json!({
                "content": post.text,
                "url": post.url,
                "date": post.date,
                "likes": post.likes,
                "contentType": ContentKind::LinkedIn,
            }),
        };
        self.store
            .upsert(&self.collections.posts, vec![point], true)
            .await
    }
}

/// Builder wiring explicit dependencies into an [`IngestPipeline`].
pub struct IngestPipelineBuilder {
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn VectorStore>>,
    ids: Arc<dyn PointIdSource>,
    chunk_params: ChunkParams,
    collections: CollectionNames,
}

impl Default for IngestPipelineBuilder {
    fn default() -> Self {
        Self {
            embedder: None,
            store: None,
            ids: Arc::new(RandomPointIds),
            chunk_params: ChunkParams::default(),
            collections: CollectionNames::default(),
        }
    }
}

impl IngestPipelineBuilder {
    pub fn with_embedding_provider(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn with_vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_id_source(mut self, ids: Arc<dyn PointIdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_chunk_params(mut self, chunk_params: ChunkParams) -> Self {
        self.chunk_params = chunk_params;
        self
    }

    pub fn with_collections(mut self, collections: CollectionNames) -> Self {
        self.collections = collections;
        self
    }

    pub fn build(self) -> Result<IngestPipeline, IngestError> {
        let embedder = self.embedder.ok_or_else(|| {
            IngestError::Validation("pipeline requires an embedding provider".into())
        })?;
        let store = self
            .store
            .ok_or_else(|| IngestError::Validation("pipeline requires a vector store".into()))?;
        Ok(IngestPipeline {
            embedder,
            store,
            ids: self.ids,
            chunk_params: self.chunk_params,
            collections: self.collections,
        })
    }
}
