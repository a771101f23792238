use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScrapeQuery {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub bullets: Vec<String>,
}

/// GET /api/v1/scrape
pub async fn handle_scrape(
    State(state): State<AppState>,
    Query(query): Query<ScrapeQuery>,
) -> Result<Json<ScrapeResponse>, AppError> {
    let url = require_url(query.url.as_deref())?;
    let bullets = state.extractor.extract_bullets(url).await?;
    Ok(Json(ScrapeResponse { bullets }))
}

/// Rejects a missing or blank `url` parameter.
pub fn require_url(url: Option<&str>) -> Result<&str, AppError> {
    url.map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Validation("Missing url parameter".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_url() {
        assert!(require_url(None).is_err());
        assert!(require_url(Some("  ")).is_err());
        assert_eq!(
            require_url(Some(" https://jobs.example.com/1 ")).unwrap(),
            "https://jobs.example.com/1"
        );
    }
}
