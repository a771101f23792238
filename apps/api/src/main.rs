mod config;
mod db;
mod document;
mod errors;
mod listing;
mod llm_client;
mod models;
mod routes;
mod state;
mod tailoring;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageConfig};
use crate::db::create_pool;
use crate::listing::{HeadlessRenderer, ListingExtractor};
use crate::llm_client::LlmClient;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;
use crate::tailoring::storage::S3ArtifactStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let storage_config = config.storage();
    let s3 = build_s3_client(&config, &storage_config).await;
    let storage = Arc::new(S3ArtifactStore::new(s3, &storage_config));
    info!("S3 artifact store initialized (bucket: {})", storage_config.bucket);

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize listing extractor (one headless browser per request)
    let fetch_config = config.fetch();
    info!(
        "Listing renderer: headless Chrome, {}s ceiling, sandbox={}",
        fetch_config.timeout.as_secs(),
        fetch_config.sandbox
    );
    let extractor = ListingExtractor::new(Arc::new(HeadlessRenderer::new(fetch_config)));

    // Build app state
    let state = AppState {
        db,
        storage,
        llm,
        extractor,
    };

    if config.cors_origins.is_empty() {
        warn!("CORS_ALLOWED_ORIGINS not set; accepting requests from any origin");
    }

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client for AWS, or for MinIO when `S3_ENDPOINT` is set.
async fn build_s3_client(config: &Config, storage: &StorageConfig) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "tailor-static",
    );

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(storage.region.clone()))
        .credentials_provider(credentials);
    if let Some(endpoint) = &storage.endpoint {
        loader = loader.endpoint_url(endpoint);
    }
    let sdk_config = loader.load().await;

    // MinIO only serves path-style URLs.
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(storage.endpoint.is_some())
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
