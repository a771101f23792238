use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::document::{build_document, DOCX_CONTENT_TYPE};
use crate::errors::AppError;
use crate::listing::handlers::require_url;
use crate::models::job::JobRow;
use crate::models::resume::{GeneratedResumeRow, UploadedResumeRow};
use crate::state::AppState;
use crate::tailoring::convert::to_resume_document;
use crate::tailoring::keywords::{identify_keywords, summarize_job};
use crate::tailoring::models::{JobKeywords, ResumeProfile};
use crate::tailoring::repository::{self, NewGenerated, NewUpload};
use crate::tailoring::rewrite::rewrite_profile;
use crate::tailoring::storage::{
    generated_filename, generated_resume_key, upload_file_name, uploaded_resume_key,
};
use crate::tailoring::upload::{ensure_pdf, extract_pdf_text, parse_resume, PDF_CONTENT_TYPE};

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Listing analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct KeywordsRequest {
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// POST /api/v1/listings/keywords
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(req): Json<KeywordsRequest>,
) -> Result<Json<JobKeywords>, AppError> {
    let keywords = identify_keywords(&req.bullets, &state.llm).await?;
    Ok(Json(keywords))
}

#[derive(Deserialize)]
pub struct CreateJobRequest {
    pub user_id: Uuid,
    pub job_url: String,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    let job_url = require_url(Some(req.job_url.as_str()))?;
    let bullets = state.extractor.extract_bullets(job_url).await?;
    let summary = summarize_job(job_url, &bullets, &state.llm).await?;

    let generation_id = Uuid::new_v4();
    let job = repository::insert_job(
        &state.db,
        generation_id,
        req.user_id,
        job_url,
        &summary,
        &bullets,
    )
    .await?;

    info!(
        "Created job {} for user {}: {} at {}",
        generation_id, req.user_id, job.job_title, job.company_name
    );
    Ok(Json(job))
}

/// GET /api/v1/jobs/:generation_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(generation_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<JobRow>, AppError> {
    let job = repository::get_job(&state.db, params.user_id, generation_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {generation_id} not found")))?;
    Ok(Json(job))
}

// ────────────────────────────────────────────────────────────────────────────
// Résumé intake
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UploadResponse {
    pub resume_id: Uuid,
    pub file_name: String,
    pub s3_key: String,
    pub profile: ResumeProfile,
}

/// POST /api/v1/resumes/upload (multipart: `user_id`, `file`)
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("user_id") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable user_id: {e}")))?;
                user_id = Some(
                    raw.trim()
                        .parse()
                        .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?,
                );
            }
            Some("file") => {
                let file_name = upload_file_name(field.file_name());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable file: {e}")))?;
                file = Some((file_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;
    let (file_name, bytes) =
        file.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    ensure_pdf(&bytes)?;

    let text = extract_pdf_text(bytes.clone()).await?;
    let profile = parse_resume(&text, &state.llm).await?;

    let resume_id = Uuid::new_v4();
    let s3_key = uploaded_resume_key(user_id, resume_id, &file_name);
    state.storage.put(&s3_key, bytes, PDF_CONTENT_TYPE).await?;

    let row = repository::insert_uploaded_resume(
        &state.db,
        NewUpload {
            id: resume_id,
            user_id,
            file_name: &file_name,
            s3_key: &s3_key,
            profile: &profile,
        },
    )
    .await?;

    info!("Stored résumé {} for user {}", row.id, user_id);
    Ok(Json(UploadResponse {
        resume_id: row.id,
        file_name: row.file_name,
        s3_key: row.s3_key,
        profile,
    }))
}

/// GET /api/v1/resumes/latest
pub async fn handle_latest_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<UploadedResumeRow>, AppError> {
    let row = repository::latest_uploaded_resume(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No résumé uploaded yet".to_string()))?;
    Ok(Json(row))
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub user_id: Uuid,
    pub generation_id: Uuid,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub resume: ResumeProfile,
    pub s3_key: String,
    pub filename: String,
    pub download_url: String,
}

/// POST /api/v1/resumes/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let upload = repository::latest_uploaded_resume(&state.db, req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No résumé uploaded yet".to_string()))?;
    let job = repository::get_job(&state.db, req.user_id, req.generation_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", req.generation_id)))?;

    let rewritten = rewrite_profile(&upload.profile, &job.summary(), &state.llm).await?;
    let bytes = build_document(&to_resume_document(&rewritten, &job.job_title))?;

    let filename = generated_filename(&job.company_name, &job.job_title);
    let s3_key = generated_resume_key(req.user_id, req.generation_id, &filename);
    state.storage.put(&s3_key, bytes, DOCX_CONTENT_TYPE).await?;

    repository::insert_generated_resume(
        &state.db,
        NewGenerated {
            generation_id: req.generation_id,
            user_id: req.user_id,
            resume: &rewritten,
            s3_key: &s3_key,
            filename: &filename,
        },
    )
    .await?;

    let download_url = state.storage.presign_get(&s3_key).await?;
    info!("Generated {} for job {}", filename, req.generation_id);

    Ok(Json(GenerateResponse {
        resume: rewritten,
        s3_key,
        filename,
        download_url,
    }))
}

#[derive(Deserialize)]
pub struct DownloadQuery {
    pub user_id: Uuid,
    pub generation_id: Uuid,
    pub filename: Option<String>,
}

#[derive(Serialize)]
pub struct DownloadResponse {
    pub url: String,
}

/// GET /api/v1/resumes/download
pub async fn handle_download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Json<DownloadResponse>, AppError> {
    let filename = require_stored_filename(query.filename.as_deref())?;
    let key = generated_resume_key(query.user_id, query.generation_id, filename);
    let url = state.storage.presign_get(&key).await?;
    Ok(Json(DownloadResponse { url }))
}

/// GET /api/v1/resumes/history
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<GeneratedResumeRow>>, AppError> {
    let rows = repository::list_generated_resumes(&state.db, params.user_id).await?;
    Ok(Json(rows))
}

/// A stored filename is a single path segment.
fn require_stored_filename(filename: Option<&str>) -> Result<&str, AppError> {
    let name = filename
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("filename is required".to_string()))?;
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(AppError::Validation("Invalid filename".to_string()));
    }
    Ok(name)
}
