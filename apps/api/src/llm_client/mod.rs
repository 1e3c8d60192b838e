//! LLM Client — the single point of entry for all Gemini API calls in learnpath.
//!
//! ARCHITECTURAL RULE: no other module may call the Gemini API directly.
//! Every model interaction goes through `ModelClient`, carried in `AppState`
//! as `Arc<dyn ModelClient>` so tests can swap in a mock.
//!
//! One call is one fresh conversation: no history, no retry. A failed call is
//! reported once to the caller; the pipeline never falls back to canned content.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all content generation.
/// Intentionally hardcoded to prevent accidental drift between deployments.
pub const MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Content blocked by safety settings: {reason}")]
    Blocked { reason: String },

    #[error("Model returned no text content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation parameters & safety settings
// ────────────────────────────────────────────────────────────────────────────

/// Sampling and output parameters. Fixed per deployment, never user-controlled,
/// and sent identically on every call so generations stay reproducible in kind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParameters {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    /// Always "application/json" — the prompt contract promises structured output.
    pub response_mime_type: String,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 20_000,
            response_mime_type: "application/json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

/// Provider-side content filter, pinned at the same threshold on every call.
fn safety_settings() -> Vec<SafetySetting> {
    const CATEGORIES: [&str; 4] = [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ];
    CATEGORIES
        .iter()
        .map(|&category| SafetySetting {
            category,
            threshold: "BLOCK_MEDIUM_AND_ABOVE",
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (generateContent REST API)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: SystemInstruction<'a>,
    contents: Vec<RequestContent<'a>>,
    generation_config: &'a GenerationParameters,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Extracts the generated text, or the reason no text came back.
    fn into_text(self) -> Result<String, ModelError> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(ModelError::Blocked { reason });
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(ModelError::EmptyContent)?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(ModelError::Blocked {
                reason: "SAFETY".to_string(),
            });
        }

        candidate
            .content
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .ok_or(ModelError::EmptyContent)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait + Gemini implementation
// ────────────────────────────────────────────────────────────────────────────

/// The model adapter trait. One system instruction + one user message in,
/// raw response text out. Implement this to swap providers (or mock in tests)
/// without touching the pipeline.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, ModelError>;
}

/// Gemini client over the `generateContent` REST API.
/// Holds no per-conversation state; each call starts a fresh session.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    params: GenerationParameters,
}

impl GeminiClient {
    pub fn new(api_key: String, params: GenerationParameters) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            params,
        }
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, ModelError> {
        let request_body = GenerateContentRequest {
            system_instruction: SystemInstruction {
                parts: vec![RequestPart {
                    text: system_instruction,
                }],
            },
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: user_message }],
            }],
            generation_config: &self.params,
            safety_settings: safety_settings(),
        };

        let url = format!("{GEMINI_API_BASE}/{MODEL}:generateContent");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Surface the provider's own message when the error body parses
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.into_text()?;

        debug!("Gemini call succeeded: {} chars returned", text.len());

        Ok(text)
    }
}
