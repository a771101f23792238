use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::tailoring::models::ResumeProfile;

/// A PDF résumé as uploaded, plus the profile parsed from it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UploadedResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub s3_key: String,
    pub profile: Json<ResumeProfile>,
    pub created_at: DateTime<Utc>,
}

/// A tailored `.docx` produced for one job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedResumeRow {
    pub id: Uuid,
    pub generation_id: Uuid,
    pub user_id: Uuid,
    pub resume: Json<ResumeProfile>,
    pub s3_key: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}
