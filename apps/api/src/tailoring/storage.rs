//! Artifact storage — uploaded PDFs and generated documents.
//!
//! `AppState` holds an `Arc<dyn ArtifactStore>`; the S3 implementation is used in
//! production (AWS or any S3-compatible endpoint such as MinIO).

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::StorageConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload of {key} failed: {message}")]
    Upload { key: String, message: String },

    #[error("Presigning {key} failed: {message}")]
    Presign { key: String, message: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Returns a time-limited GET URL for `key`.
    async fn presign_get(&self, key: &str) -> Result<String, StorageError>;
}

// ────────────────────────────────────────────────────────────────────────────
// S3ArtifactStore
// ────────────────────────────────────────────────────────────────────────────

pub struct S3ArtifactStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    presign_expiry: Duration,
}

impl S3ArtifactStore {
    pub fn new(client: aws_sdk_s3::Client, config: &StorageConfig) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            presign_expiry: config.presign_expiry,
        }
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        info!("Uploaded {} bytes to s3://{}/{}", size, self.bucket, key);
        Ok(())
    }

    async fn presign_get(&self, key: &str) -> Result<String, StorageError> {
        let presign_error = |message: String| StorageError::Presign {
            key: key.to_string(),
            message,
        };

        let presigning = PresigningConfig::expires_in(self.presign_expiry)
            .map_err(|e| presign_error(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| presign_error(e.to_string()))?;

        Ok(request.uri().to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Key layout
// ────────────────────────────────────────────────────────────────────────────

/// `{user_id}/resumes/{resume_id}/{file_name}`
pub fn uploaded_resume_key(user_id: Uuid, resume_id: Uuid, file_name: &str) -> String {
    format!("{user_id}/resumes/{resume_id}/{file_name}")
}

/// `{user_id}/generated-resumes/{generation_id}/{filename}`
pub fn generated_resume_key(user_id: Uuid, generation_id: Uuid, filename: &str) -> String {
    format!("{user_id}/generated-resumes/{generation_id}/{filename}")
}

/// `{Company}_{Title}_resume.docx` with every non-alphanumeric character as `_`.
pub fn generated_filename(company_name: &str, job_title: &str) -> String {
    format!(
        "{}_{}_resume.docx",
        sanitize_component(company_name),
        sanitize_component(job_title)
    )
}

pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Keeps the last path segment of a client-supplied upload name.
pub fn upload_file_name(raw: Option<&str>) -> String {
    let name = raw
        .and_then(|n| n.rsplit(['/', '\\']).next())
        .map(str::trim)
        .unwrap_or_default();
    if name.is_empty() {
        "resume.pdf".to_string()
    } else {
        name.to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryStore;
    use super::*;

    #[test]
    fn test_generated_filename_replaces_non_alphanumerics() {
        assert_eq!(
            generated_filename("Acme, Inc.", "Sr. Engineer (Rust)"),
            "Acme__Inc__Sr__Engineer__Rust__resume.docx"
        );
        assert_eq!(
            generated_filename("Unknown Company", "Unknown Position"),
            "Unknown_Company_Unknown_Position_resume.docx"
        );
    }

    #[test]
    fn test_key_layout() {
        let user = Uuid::nil();
        let other = Uuid::from_u128(1);
        assert_eq!(
            uploaded_resume_key(user, other, "cv.pdf"),
            format!("{user}/resumes/{other}/cv.pdf")
        );
        assert_eq!(
            generated_resume_key(user, other, "A_B_resume.docx"),
            format!("{user}/generated-resumes/{other}/A_B_resume.docx")
        );
    }

    #[test]
    fn test_upload_file_name_strips_directories() {
        assert_eq!(upload_file_name(Some("C:\\Users\\me\\cv.pdf")), "cv.pdf");
        assert_eq!(upload_file_name(Some("../../etc/cv.pdf")), "cv.pdf");
        assert_eq!(upload_file_name(Some("")), "resume.pdf");
        assert_eq!(upload_file_name(None), "resume.pdf");
    }

    #[tokio::test]
    async fn test_memory_store_records_uploads() {
        let store = MemoryStore::default();
        store
            .put("u/resumes/r/cv.pdf", vec![1, 2, 3], "application/pdf")
            .await
            .unwrap();
        let objects = store.objects.lock().unwrap();
        assert_eq!(objects["u/resumes/r/cv.pdf"].1, "application/pdf");
    }
}
