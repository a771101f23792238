//! Résumé rewrite — tailors a profile to a job while preserving its bullet layout.
//!
//! The model is asked to keep exactly as many bullets per experience as the
//! source profile has. Answers that change the layout are retried with a
//! correction appended, up to [`MAX_BULLET_RETRIES`] times.

use std::future::Future;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::TRUTHFULNESS_INSTRUCTION;
use crate::llm_client::{JsonTask, LlmClient, LlmError};
use crate::tailoring::models::{JobSummary, ResumeProfile, RewrittenSections};
use crate::tailoring::prompts::{BULLET_COUNT_CORRECTION, REWRITE_PROMPT_TEMPLATE, REWRITE_SYSTEM};

/// Extra attempts after the first when bullet counts do not line up.
pub const MAX_BULLET_RETRIES: u32 = 2;

/// Rewrites `profile` for `job` through the LLM.
pub async fn rewrite_profile(
    profile: &ResumeProfile,
    job: &JobSummary,
    llm: &LlmClient,
) -> Result<ResumeProfile, AppError> {
    let base = rewrite_prompt(profile, job)?;
    let correction = BULLET_COUNT_CORRECTION.replace("{bullet_counts}", &counts_label(profile));

    rewrite_until_aligned(profile, |attempt| {
        let prompt = if attempt == 0 {
            base.clone()
        } else {
            format!("{base}{correction}")
        };
        async move {
            llm.run::<RewrittenSections>(&JsonTask {
                name: "Résumé rewrite",
                system: REWRITE_SYSTEM,
                prompt: &prompt,
            })
            .await
        }
    })
    .await
}

/// Drives `attempt` until the rewritten profile keeps the original bullet counts.
///
/// `attempt` receives the zero-based attempt number. LLM failures are not retried
/// here; the client already retries transport errors.
pub async fn rewrite_until_aligned<F, Fut>(
    original: &ResumeProfile,
    mut attempt: F,
) -> Result<ResumeProfile, AppError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<RewrittenSections, LlmError>>,
{
    let expected = original.bullet_counts();

    for n in 0..=MAX_BULLET_RETRIES {
        let sections = attempt(n).await?;
        let candidate = original.with_sections(sections);
        let actual = candidate.bullet_counts();

        if actual == expected {
            info!("Résumé rewrite accepted on attempt {}", n + 1);
            return Ok(candidate);
        }
        warn!(
            "Rewrite attempt {} changed bullet counts: expected {:?}, got {:?}",
            n + 1,
            expected,
            actual
        );
    }

    Err(AppError::Llm(format!(
        "Rewrite did not preserve bullet counts {:?} after {} attempts",
        expected,
        MAX_BULLET_RETRIES + 1
    )))
}

fn rewrite_prompt(profile: &ResumeProfile, job: &JobSummary) -> Result<String, AppError> {
    let prompt = REWRITE_PROMPT_TEMPLATE
        .replace("{company_name}", &job.company_name)
        .replace("{job_title}", &job.job_title)
        .replace("{summary}", &job.summary)
        .replace("{key_skills}", &job.key_skills.join(", "))
        .replace("{key_requirements}", &job.key_requirements.join("; "))
        .replace("{experience}", &to_json(&profile.professional_experience)?)
        .replace("{extra_curriculars}", &to_json(&profile.extra_curriculars)?)
        .replace("{technical_skills}", &to_json(&profile.technical_skills)?)
        .replace(
            "{tools_and_technologies}",
            &to_json(&profile.tools_and_technologies)?,
        )
        .replace("{bullet_counts}", &counts_label(profile));

    Ok(format!("{prompt}\n\n{TRUTHFULNESS_INSTRUCTION}"))
}

fn counts_label(profile: &ResumeProfile) -> String {
    format!("{:?}", profile.bullet_counts())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|e| AppError::Internal(e.into()))
}
