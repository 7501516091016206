//! Google Gemini API client implementing [`TextGenerator`].
//!
//! Talks to the `generateContent` REST endpoint. When the request carries a
//! schema, the call is made in JSON mode with the schema passed as
//! `responseSchema`, so the model answers with a JSON object.
//!
//! # Example
//! ```no_run
//! use praise_box::backends::google::Google;
//! use praise_box::generation::{GenerationRequest, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Google::new(
//!         std::env::var("API_KEY").unwrap_or_default(),
//!         None, // Default model
//!         None, // Default base URL
//!         None, // No timeout
//!     )?;
//!
//!     let text = client.generate(&GenerationRequest::new("Hello!")).await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    error::PraiseError,
    generation::{GenerationRequest, TextGenerator},
};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Public Gemini API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for Google's Gemini API.
pub struct Google {
    /// API key sent in the `x-goog-api-key` header
    pub api_key: String,
    /// Model identifier (e.g. "gemini-2.5-flash")
    pub model: String,
    /// Scheme and host, without a trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// HTTP client for making API requests
    client: Client,
}

/// Request body for `generateContent`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleGenerateRequest<'a> {
    /// Conversation turns; a single user turn here
    contents: Vec<GoogleContent<'a>>,
    /// Optional generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GoogleGenerationConfig<'a>>,
}

#[derive(Serialize)]
struct GoogleContent<'a> {
    role: &'a str,
    parts: Vec<GoogleContentPart<'a>>,
}

#[derive(Serialize)]
struct GoogleContentPart<'a> {
    text: &'a str,
}

/// Configuration parameters for text generation
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleGenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    /// "application/json" to force JSON output
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a serde_json::Value>,
}

/// Response from `generateContent`
#[derive(Deserialize)]
struct GoogleGenerateResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
}

#[derive(Deserialize)]
struct GoogleCandidate {
    content: Option<GoogleResponseContent>,
}

#[derive(Deserialize)]
struct GoogleResponseContent {
    #[serde(default)]
    parts: Vec<GoogleResponsePart>,
}

#[derive(Deserialize)]
struct GoogleResponsePart {
    #[serde(default)]
    text: String,
}

impl Google {
    /// Creates a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key; an empty key is sent as-is and rejected remotely
    /// * `model` - Model identifier (defaults to [`DEFAULT_MODEL`])
    /// * `base_url` - API host (defaults to [`DEFAULT_BASE_URL`])
    /// * `timeout_seconds` - Request timeout; the client default when `None`
    pub fn new(
        api_key: impl Into<String>,
        model: Option<String>,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, PraiseError> {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Ok(Self {
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout_seconds,
            client: builder.build()?,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{base}/v1beta/models/{model}:generateContent",
            base = self.base_url,
            model = self.model
        )
    }
}

#[async_trait]
impl TextGenerator for Google {
    /// Sends one `generateContent` request and returns the text of the first
    /// candidate.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, PraiseError> {
        if self.api_key.is_empty() {
            log::warn!("Sending Gemini request without an API key");
        }

        let cfg = &request.config;
        let response_schema = request.schema.as_ref();
        let response_mime_type = request.response_mime_type();

        // Remove generation_config if empty to avoid validation errors
        let generation_config = if cfg.max_tokens.is_none()
            && cfg.temperature.is_none()
            && cfg.top_p.is_none()
            && cfg.top_k.is_none()
            && response_mime_type.is_none()
        {
            None
        } else {
            Some(GoogleGenerationConfig {
                max_output_tokens: cfg.max_tokens,
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                top_k: cfg.top_k,
                response_mime_type,
                response_schema,
            })
        };

        let body = GoogleGenerateRequest {
            contents: vec![GoogleContent {
                role: "user",
                parts: vec![GoogleContentPart {
                    text: &request.prompt,
                }],
            }],
            generation_config,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("Google request payload: {}", json);
            }
        }

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        log::debug!("Google HTTP status: {}", resp.status());

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(PraiseError::RemoteFailure(format!(
                "Google API returned {}: {}",
                status, error_text
            )));
        }

        let json_resp: GoogleGenerateResponse = resp.json().await?;
        let content = json_resp
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or_else(|| {
                PraiseError::RemoteFailure("No candidates returned by Google".to_string())
            })?;

        Ok(content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}
