use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::tailoring::models::JobSummary;

/// An analysed job listing. `generation_id` ties it to the documents made for it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub generation_id: Uuid,
    pub user_id: Uuid,
    pub job_url: String,
    pub company_name: String,
    pub job_title: String,
    pub summary: String,
    pub key_skills: Vec<String>,
    pub key_requirements: Vec<String>,
    pub bullets: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl JobRow {
    pub fn summary(&self) -> JobSummary {
        JobSummary {
            company_name: self.company_name.clone(),
            job_title: self.job_title.clone(),
            summary: self.summary.clone(),
            key_skills: self.key_skills.clone(),
            key_requirements: self.key_requirements.clone(),
        }
    }
}
