use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;

const DEFAULT_REGION: &str = "us-east-2";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;
const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 3600;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: Option<String>,
    pub aws_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub fetch_timeout_secs: u64,
    pub chrome_path: Option<PathBuf>,
    pub browser_sandbox: bool,
    pub presign_expiry_secs: u64,
    pub llm_timeout_secs: u64,
    /// Browser origins allowed by CORS. Empty means any origin.
    pub cors_origins: Vec<HeaderValue>,
}

/// Settings for the headless page renderer.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Ceiling for a single navigation-plus-load.
    pub timeout: Duration,
    pub chrome_path: Option<PathBuf>,
    pub sandbox: bool,
}

/// Settings for the artifact store.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub presign_expiry: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: optional_env("S3_ENDPOINT"),
            aws_region: optional_env("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            fetch_timeout_secs: parse_env("FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?,
            chrome_path: optional_env("CHROME_PATH").map(PathBuf::from),
            browser_sandbox: parse_env("BROWSER_SANDBOX", true)?,
            presign_expiry_secs: parse_env("PRESIGN_EXPIRY_SECS", DEFAULT_PRESIGN_EXPIRY_SECS)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?,
            cors_origins: parse_origins(optional_env("CORS_ALLOWED_ORIGINS").as_deref())?,
        })
    }

    pub fn fetch(&self) -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_secs(self.fetch_timeout_secs),
            chrome_path: self.chrome_path.clone(),
            sandbox: self.browser_sandbox,
        }
    }

    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            bucket: self.s3_bucket.clone(),
            region: self.aws_region.clone(),
            endpoint: self.s3_endpoint.clone(),
            presign_expiry: Duration::from_secs(self.presign_expiry_secs),
        }
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            chrome_path: None,
            sandbox: true,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
}

/// Splits a comma-separated origin list, skipping blank entries.
fn parse_origins(raw: Option<&str>) -> Result<Vec<HeaderValue>> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("CORS_ALLOWED_ORIGINS has invalid origin '{origin}'"))
        })
        .collect()
}
