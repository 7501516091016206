//! Builder for configuring and instantiating a [`PoemAdapter`].
//!
//! By default the adapter talks to Google Gemini; a custom
//! [`TextGenerator`] can be plugged in instead.
//!
//! ```no_run
//! use praise_box::builder::PoemAdapterBuilder;
//! use praise_box::config::Config;
//!
//! let adapter = PoemAdapterBuilder::from_config(&Config::from_env())
//!     .timeout_seconds(30)
//!     .build()
//!     .unwrap();
//! ```

use crate::{
    adapter::PoemAdapter,
    backends::google::Google,
    config::Config,
    error::PraiseError,
    generation::{GenerationConfig, TextGenerator},
};

/// Fluent configuration for a poem adapter.
#[derive(Default)]
pub struct PoemAdapterBuilder {
    /// API key for authentication with Gemini
    api_key: Option<String>,
    /// Base URL for API requests
    base_url: Option<String>,
    /// Model identifier/name to use
    model: Option<String>,
    /// Request timeout duration in seconds
    timeout_seconds: Option<u64>,
    /// Temperature parameter for controlling response randomness
    temperature: Option<f32>,
    /// Top-p (nucleus) sampling parameter
    top_p: Option<f32>,
    /// Top-k sampling parameter
    top_k: Option<u32>,
    /// Maximum tokens to generate in responses
    max_tokens: Option<u32>,
    /// Replaces the Gemini client when set
    generator: Option<Box<dyn TextGenerator>>,
}

impl PoemAdapterBuilder {
    /// Creates a new empty builder instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from environment-derived settings.
    pub fn from_config(config: &Config) -> Self {
        let mut builder = Self::new()
            .model(config.model.clone())
            .base_url(config.base_url.clone());
        if let Some(key) = &config.api_key {
            builder = builder.api_key(key.clone());
        }
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout_seconds(secs);
        }
        builder
    }

    /// Sets the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL for API requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model identifier to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Sets the temperature for controlling response randomness.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the top-p (nucleus) sampling parameter.
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Sets the top-k sampling parameter.
    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Uses `generator` instead of the Gemini client.
    ///
    /// Connection settings (key, model, URL, timeout) are then ignored.
    pub fn generator(mut self, generator: Box<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Builds the adapter.
    ///
    /// A missing API key is not an error here; the remote call will reject it.
    ///
    /// # Errors
    ///
    /// Returns `RemoteFailure` if the HTTP client cannot be created.
    pub fn build(self) -> Result<PoemAdapter, PraiseError> {
        let defaults = GenerationConfig::poem_defaults();
        let config = GenerationConfig {
            temperature: self.temperature.or(defaults.temperature),
            top_p: self.top_p.or(defaults.top_p),
            top_k: self.top_k.or(defaults.top_k),
            max_tokens: self.max_tokens.or(defaults.max_tokens),
        };

        let generator: Box<dyn TextGenerator> = match self.generator {
            Some(generator) => generator,
            None => Box::new(Google::new(
                self.api_key.unwrap_or_default(),
                self.model,
                self.base_url,
                self.timeout_seconds,
            )?),
        };

        Ok(PoemAdapter::with_config(generator, config))
    }
}
