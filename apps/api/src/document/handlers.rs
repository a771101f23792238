//! Axum route handlers for the Document API.

use axum::{
    extract::Query,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::document::{
    build_document_with, ResumeDocument, SectionLabels, DEFAULT_FILENAME, DOCX_CONTENT_TYPE,
};
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct DocQuery {
    pub filename: Option<String>,
    /// `projects` selects the project-oriented headings; anything else is classic.
    pub labels: Option<String>,
}

/// POST /api/v1/doc
///
/// Renders a `ResumeDocument` body and returns it as a `.docx` attachment.
pub async fn handle_build_doc(
    Query(query): Query<DocQuery>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let doc = ResumeDocument::from_json(body)
        .map_err(|e| AppError::UnprocessableEntity(format!("Invalid resume document: {e}")))?;

    let bytes = build_document_with(&doc, &section_labels(query.labels.as_deref()))?;
    let filename = attachment_name(query.filename.as_deref());

    Ok(docx_attachment(bytes, &filename))
}

/// Wraps document bytes in a download response.
pub fn docx_attachment(bytes: Vec<u8>, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        bytes,
    )
        .into_response()
}

pub fn section_labels(requested: Option<&str>) -> SectionLabels {
    match requested.map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("projects") => SectionLabels::projects(),
        _ => SectionLabels::classic(),
    }
}

/// Sanitises a caller-chosen filename. Falls back to `resume.docx`.
pub fn attachment_name(requested: Option<&str>) -> String {
    let stem = requested
        .map(str::trim)
        .map(|name| name.strip_suffix(".docx").unwrap_or(name))
        .unwrap_or_default();

    if stem.is_empty() {
        return DEFAULT_FILENAME.to_string();
    }

    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{cleaned}.docx")
}
