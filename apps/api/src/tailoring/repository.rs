//! Postgres access for uploads, jobs, and generated documents. All tables are append-only.

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::job::JobRow;
use crate::models::resume::{GeneratedResumeRow, UploadedResumeRow};
use crate::tailoring::models::{JobSummary, ResumeProfile};

pub struct NewUpload<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: &'a str,
    pub s3_key: &'a str,
    pub profile: &'a ResumeProfile,
}

pub async fn insert_uploaded_resume(
    db: &PgPool,
    upload: NewUpload<'_>,
) -> Result<UploadedResumeRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO uploaded_resumes (id, user_id, file_name, s3_key, profile)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(upload.id)
    .bind(upload.user_id)
    .bind(upload.file_name)
    .bind(upload.s3_key)
    .bind(Json(upload.profile))
    .fetch_one(db)
    .await
}

pub async fn latest_uploaded_resume(
    db: &PgPool,
    user_id: Uuid,
) -> Result<Option<UploadedResumeRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM uploaded_resumes WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn insert_job(
    db: &PgPool,
    generation_id: Uuid,
    user_id: Uuid,
    job_url: &str,
    summary: &JobSummary,
    bullets: &[String],
) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO jobs
            (generation_id, user_id, job_url, company_name, job_title,
             summary, key_skills, key_requirements, bullets)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(generation_id)
    .bind(user_id)
    .bind(job_url)
    .bind(&summary.company_name)
    .bind(&summary.job_title)
    .bind(&summary.summary)
    .bind(&summary.key_skills)
    .bind(&summary.key_requirements)
    .bind(bullets)
    .fetch_one(db)
    .await
}

pub async fn get_job(
    db: &PgPool,
    user_id: Uuid,
    generation_id: Uuid,
) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM jobs WHERE generation_id = $1 AND user_id = $2")
        .bind(generation_id)
        .bind(user_id)
        .fetch_optional(db)
        .await
}

pub struct NewGenerated<'a> {
    pub generation_id: Uuid,
    pub user_id: Uuid,
    pub resume: &'a ResumeProfile,
    pub s3_key: &'a str,
    pub filename: &'a str,
}

pub async fn insert_generated_resume(
    db: &PgPool,
    generated: NewGenerated<'_>,
) -> Result<GeneratedResumeRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO generated_resumes (id, generation_id, user_id, resume, s3_key, filename)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(generated.generation_id)
    .bind(generated.user_id)
    .bind(Json(generated.resume))
    .bind(generated.s3_key)
    .bind(generated.filename)
    .fetch_one(db)
    .await
}

/// Newest first.
pub async fn list_generated_resumes(
    db: &PgPool,
    user_id: Uuid,
) -> Result<Vec<GeneratedResumeRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM generated_resumes WHERE user_id = $1 ORDER BY created_at DESC")
        .bind(user_id)
        .fetch_all(db)
        .await
}
