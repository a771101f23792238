//! Anthropic Messages client for the tailoring pipeline.
//!
//! Every model call in Tailor is a [`JsonTask`]: a named system/user prompt pair
//! whose answer must decode into a typed value. Failures carry the task name, so
//! callers propagate them with `?` and the log says which step broke.
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in Tailor.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_ATTEMPTS: u32 = 3;

/// A model call that failed, tagged with the step that made it.
#[derive(Debug, Error)]
#[error("{task} failed: {cause}")]
pub struct LlmError {
    pub task: &'static str,
    #[source]
    pub cause: LlmFailure,
}

#[derive(Debug, Error)]
pub enum LlmFailure {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("gave up after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("model returned no text")]
    EmptyContent,

    #[error("answer was not the expected JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One named prompt whose answer is parsed as JSON.
pub struct JsonTask<'a> {
    pub name: &'static str,
    pub system: &'a str,
    pub prompt: &'a str,
}

impl JsonTask<'_> {
    fn fail(&self, cause: impl Into<LlmFailure>) -> LlmError {
        LlmError {
            task: self.name,
            cause: cause.into(),
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl MessagesResponse {
    fn into_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
    }
}

/// What to do with a non-success HTTP status.
#[derive(Debug, PartialEq, Eq)]
enum Disposition {
    Retry,
    Fail,
}

fn disposition(status: StatusCode) -> Disposition {
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        Disposition::Retry
    } else {
        Disposition::Fail
    }
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key })
    }

    /// Runs `task` and decodes the model's answer into `T`.
    pub async fn run<T: DeserializeOwned>(&self, task: &JsonTask<'_>) -> Result<T, LlmError> {
        let text = self.complete(task).await?;
        serde_json::from_str(strip_json_fences(&text)).map_err(|e| task.fail(e))
    }

    /// Sends the task, retrying rate limits, server errors and transport
    /// failures with exponential backoff. Returns the first text block.
    async fn complete(&self, task: &JsonTask<'_>) -> Result<String, LlmError> {
        let body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: task.system,
            messages: [UserMessage {
                role: "user",
                content: task.prompt,
            }],
        };

        let mut last_failure = None;
        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "{}: attempt {} failed, retrying in {}ms",
                    task.name,
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    last_failure = Some(LlmFailure::Transport(e));
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let raw = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                    .map(|envelope| envelope.error.message)
                    .unwrap_or(raw);
                let failure = LlmFailure::Api {
                    status: status.as_u16(),
                    message,
                };
                match disposition(status) {
                    Disposition::Retry => {
                        warn!("{}: API returned {status}", task.name);
                        last_failure = Some(failure);
                        continue;
                    }
                    Disposition::Fail => return Err(task.fail(failure)),
                }
            }

            let parsed: MessagesResponse = response.json().await.map_err(|e| task.fail(e))?;
            debug!(
                "{}: input_tokens={}, output_tokens={}",
                task.name, parsed.usage.input_tokens, parsed.usage.output_tokens
            );
            return parsed
                .into_text()
                .ok_or_else(|| task.fail(LlmFailure::EmptyContent));
        }

        Err(task.fail(last_failure.unwrap_or(LlmFailure::Exhausted {
            attempts: MAX_ATTEMPTS,
        })))
    }
}

/// Exponential backoff: 1s, 2s, 4s
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(1000 * (1 << (attempt.saturating_sub(1))))
}

/// Removes a surrounding Markdown code fence (tagged or not) from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
