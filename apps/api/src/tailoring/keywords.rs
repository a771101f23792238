//! Listing analysis — keyword identification and job summaries over extracted bullets.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::bullet_block;
use crate::llm_client::{JsonTask, LlmClient};
use crate::tailoring::models::{JobKeywords, JobSummary};
use crate::tailoring::prompts::{
    JOB_SUMMARY_PROMPT_TEMPLATE, KEYWORDS_PROMPT_TEMPLATE, LISTING_ANALYSIS_SYSTEM,
};

/// Identifies key skills and requirements in a listing's bullets.
pub async fn identify_keywords(bullets: &[String], llm: &LlmClient) -> Result<JobKeywords, AppError> {
    require_bullets(bullets)?;

    let prompt = keywords_prompt(bullets);
    let keywords: JobKeywords = llm
        .run(&JsonTask {
            name: "Keyword identification",
            system: LISTING_ANALYSIS_SYSTEM,
            prompt: &prompt,
        })
        .await?;

    info!(
        "Identified {} key skills and {} requirements",
        keywords.key_skills.len(),
        keywords.requirements.len()
    );
    Ok(keywords)
}

/// Summarises a listing. Blank company or title come back as placeholders.
///
/// A listing with no usable bullets is still summarised from its URL alone.
pub async fn summarize_job(
    job_url: &str,
    bullets: &[String],
    llm: &LlmClient,
) -> Result<JobSummary, AppError> {
    let prompt = summary_prompt(job_url, bullets);
    let summary: JobSummary = llm
        .run(&JsonTask {
            name: "Job summary",
            system: LISTING_ANALYSIS_SYSTEM,
            prompt: &prompt,
        })
        .await?;

    Ok(summary.with_placeholders())
}

pub fn require_bullets(bullets: &[String]) -> Result<(), AppError> {
    if bullets.iter().all(|b| b.trim().is_empty()) {
        return Err(AppError::Validation(
            "At least one non-empty bullet is required".to_string(),
        ));
    }
    Ok(())
}

fn keywords_prompt(bullets: &[String]) -> String {
    KEYWORDS_PROMPT_TEMPLATE.replace("{bullets}", &bullet_block(bullets))
}

fn summary_prompt(job_url: &str, bullets: &[String]) -> String {
    JOB_SUMMARY_PROMPT_TEMPLATE
        .replace("{job_url}", job_url)
        .replace("{bullets}", &bullet_block(bullets))
}
