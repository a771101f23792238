// Listing Extractor
// Turns a job-listing URL into the requirement bullets found on the rendered page.
// Rendering is blocking (one headless browser per call) and runs inside tokio::task::spawn_blocking.

pub mod browser;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

pub use browser::HeadlessRenderer;
pub use extract::extract_bullets;

/// The page could not be retrieved or rendered. Never retried internally.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Browser could not be launched: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Rendering {url} exceeded the {secs}s ceiling")]
    Timeout { url: String, secs: u64 },

    #[error("Render task aborted: {0}")]
    Aborted(String),
}

/// Produces the fully rendered HTML of a page.
///
/// Implementations own whatever session they need for the duration of a single
/// call and release it before returning.
pub trait PageRenderer: Send + Sync {
    fn render(&self, url: &str) -> Result<String, FetchError>;
}

/// Render → extract pipeline shared by the route handlers.
#[derive(Clone)]
pub struct ListingExtractor {
    renderer: Arc<dyn PageRenderer>,
}

impl ListingExtractor {
    pub fn new(renderer: Arc<dyn PageRenderer>) -> Self {
        Self { renderer }
    }

    /// Renders `url` and extracts its bullets. Either the full sequence or a
    /// `FetchError` is returned; there is no partial result.
    pub async fn extract_bullets(&self, url: &str) -> Result<Vec<String>, FetchError> {
        let renderer = Arc::clone(&self.renderer);
        let target = url.to_string();

        let bullets = tokio::task::spawn_blocking(move || {
            let html = renderer.render(&target)?;
            Ok::<_, FetchError>(extract_bullets(&html))
        })
        .await
        .map_err(|e| FetchError::Aborted(e.to_string()))??;

        info!("Extracted {} bullets from {}", bullets.len(), url);
        Ok(bullets)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Serves canned HTML for every URL.
    pub struct StaticRenderer(pub String);

    impl PageRenderer for StaticRenderer {
        fn render(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.clone())
        }
    }

    /// Behaves like a page that never finishes loading within the ceiling.
    pub struct TimedOutRenderer;

    impl PageRenderer for TimedOutRenderer {
        fn render(&self, url: &str) -> Result<String, FetchError> {
            Err(FetchError::Timeout {
                url: url.to_string(),
                secs: 60,
            })
        }
    }
}
