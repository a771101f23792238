use std::sync::Arc;

use sqlx::PgPool;

use crate::listing::ListingExtractor;
use crate::llm_client::LlmClient;
use crate::tailoring::storage::ArtifactStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Uploaded PDFs and generated documents. Default: S3ArtifactStore.
    pub storage: Arc<dyn ArtifactStore>,
    pub llm: LlmClient,
    /// Render → extract pipeline. Default renderer: HeadlessRenderer.
    pub extractor: ListingExtractor,
}
