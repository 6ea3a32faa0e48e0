//! Backfills LinkedIn posts from a CSV export into the vector store.
//!
//! Posts are uploaded whole (no chunking): one embedding call and one
//! waited upsert per record, with per-record failures counted instead of
//! aborting the run. The exit code is non-zero only when setup or the
//! collection bootstrap fails.
//!
//! Usage: `backfill-linkedin path/to/posts.csv` (or set `LINKEDIN_CSV`).

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::fs;
use tracing_subscriber::FmtSubscriber;

use ragstash::config::PipelineConfig;
use ragstash::embeddings::OpenAiEmbedder;
use ragstash::ingestion::IngestPipeline;
use ragstash::stores::QdrantStore;
use ragstash::types::IngestError;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("backfill aborted: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), IngestError> {
    let csv_path = env::args()
        .nth(1)
        .or_else(|| env::var("LINKEDIN_CSV").ok())
        .ok_or_else(|| {
            IngestError::Validation("pass a CSV path as the first argument or set LINKEDIN_CSV".into())
        })?;

    let config = PipelineConfig::from_env()?;
    let embedder = OpenAiEmbedder::new(
        &config.openai_api_key,
        &config.openai_base_url,
        &config.embedding_model,
        config.embedding_dimensions,
    )?;
    let store = QdrantStore::new(&config.qdrant_url, config.qdrant_api_key.as_deref())?;

    let pipeline = IngestPipeline::builder()
        .with_embedding_provider(Arc::new(embedder))
        .with_vector_store(Arc::new(store))
        .with_chunk_params(config.chunk_params)
        .with_collections(config.collections)
        .build()?;

    let raw = fs::read_to_string(&csv_path).await?;
    let summary = pipeline.backfill_posts(&raw).await?;

    println!("\nBackfill summary:");
    println!("  succeeded: {}", summary.succeeded);
    println!("  failed   : {}", summary.failed);
    println!("  total    : {}", summary.total);

    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let subscriber = FmtSubscriber::builder().with_env_filter("info").finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
