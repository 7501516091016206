use async_trait::async_trait;
use serde_json::Value;

use crate::error::PraiseError;

/// Sampling parameters for a generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Top-p (nucleus) sampling parameter
    pub top_p: Option<f32>,
    /// Top-k sampling parameter
    pub top_k: Option<u32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl GenerationConfig {
    /// Sampling used for praise poems: warm but not erratic.
    pub fn poem_defaults() -> Self {
        Self {
            temperature: Some(0.8),
            top_p: Some(1.0),
            top_k: Some(40),
            max_tokens: None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::poem_defaults()
    }
}

/// One call to a text generator.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The instruction text
    pub prompt: String,
    /// Sampling parameters
    pub config: GenerationConfig,
    /// When set, the reply must be JSON matching this schema, written in
    /// the OpenAPI subset Gemini accepts as `responseSchema`
    pub schema: Option<Value>,
}

impl GenerationRequest {
    /// Creates a request with default sampling and no schema.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            config: GenerationConfig::default(),
            schema: None,
        }
    }

    pub fn config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    /// Enforces JSON output following `schema`.
    pub fn schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    /// MIME type to ask for: JSON when a schema is set, otherwise none.
    pub fn response_mime_type(&self) -> Option<&'static str> {
        self.schema.as_ref().map(|_| "application/json")
    }
}

/// A remote (or fake) service that turns a prompt into text.
///
/// This is the only seam between the poem adapter and the outside world, so
/// tests can swap in a substitute.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Performs exactly one generation call.
    ///
    /// # Returns
    ///
    /// The raw reply text, or a `RemoteFailure` for anything that went wrong
    /// on the way.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, PraiseError>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, PraiseError> {
        (**self).generate(request).await
    }
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<T> {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, PraiseError> {
        (**self).generate(request).await
    }
}
