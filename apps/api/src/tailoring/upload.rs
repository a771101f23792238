//! Résumé intake — PDF text extraction and LLM parsing into a `ResumeProfile`.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::prompts::TRUTHFULNESS_INSTRUCTION;
use crate::llm_client::{JsonTask, LlmClient};
use crate::tailoring::models::ResumeProfile;
use crate::tailoring::prompts::{RESUME_PARSE_PROMPT_TEMPLATE, RESUME_PARSE_SYSTEM};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Rejects payloads that are not PDFs before any parsing is attempted.
pub fn ensure_pdf(bytes: &[u8]) -> Result<(), AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(
            "Invalid file type. Please upload a PDF".to_string(),
        ));
    }
    Ok(())
}

/// Extracts the text layer of a PDF on the blocking pool.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("PDF extraction aborted: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;

    let text = normalize_whitespace(&text);
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "PDF contains no extractable text".to_string(),
        ));
    }
    debug!("Extracted {} characters of résumé text", text.len());
    Ok(text)
}

/// Parses extracted résumé text into a structured profile.
pub async fn parse_resume(resume_text: &str, llm: &LlmClient) -> Result<ResumeProfile, AppError> {
    let prompt = format!(
        "{}\n\n{}",
        RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text),
        TRUTHFULNESS_INSTRUCTION
    );

    let profile: ResumeProfile = llm
        .run(&JsonTask {
            name: "Résumé parsing",
            system: RESUME_PARSE_SYSTEM,
            prompt: &prompt,
        })
        .await?;

    info!(
        "Parsed résumé: {} experiences, {} activities",
        profile.professional_experience.len(),
        profile.extra_curriculars.len()
    );
    Ok(profile)
}

/// Collapses runs of blank lines and trailing spaces left by PDF text extraction.
fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_pdf() {
        assert!(ensure_pdf(b"%PDF-1.7\n...").is_ok());
        assert!(matches!(ensure_pdf(b""), Err(AppError::Validation(_))));
        assert!(matches!(
            ensure_pdf(b"PK\x03\x04 docx"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_normalize_whitespace() {
        let raw = "Ada Lovelace   \n\n\n  Engineer\n   \nLondon";
        assert_eq!(normalize_whitespace(raw), "Ada Lovelace\n  Engineer\nLondon");
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_unprocessable() {
        let result = extract_pdf_text(b"%PDF-1.4 not really a pdf".to_vec()).await;
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }
}
