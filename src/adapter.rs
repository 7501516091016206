//! Turns a name and a praise phrase into a poem by way of a [`TextGenerator`].
//!
//! The adapter owns the three steps around the remote call: checking the
//! name, building the prompt with its reply schema, and reading the poem back
//! out of the JSON reply. Every failure is reported as a [`PraiseError`]
//! whose kind tells the caller which message to show.
//!
//! # Example
//!
//! ```no_run
//! use praise_box::adapter::PoemAdapter;
//! use praise_box::backends::google::Google;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let google = Google::new(std::env::var("API_KEY").unwrap_or_default(), None, None, None)?;
//!     let adapter = PoemAdapter::new(Box::new(google));
//!     let poem = adapter.generate_poem("민수", "당신은 존재 자체로 빛나요").await?;
//!     println!("{}", poem);
//!     Ok(())
//! }
//! ```

use crate::error::PraiseError;
use crate::generation::{GenerationConfig, GenerationRequest, TextGenerator};
use crate::poem::prompt::{build_prompt, parse_reply, poem_schema};
use crate::poem::{PoemRequest, PoemResult};

/// Poem generation adapter around a boxed text generator.
pub struct PoemAdapter {
    /// The service that actually writes the poem
    generator: Box<dyn TextGenerator>,
    /// Sampling sent with every call
    config: GenerationConfig,
}

impl PoemAdapter {
    /// Creates an adapter using the default poem sampling (0.8 / 1.0 / 40).
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self::with_config(generator, GenerationConfig::poem_defaults())
    }

    /// Creates an adapter with custom sampling.
    pub fn with_config(generator: Box<dyn TextGenerator>, config: GenerationConfig) -> Self {
        Self { generator, config }
    }

    /// Sampling sent with every call.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Validates `name` and `praise`, then generates a poem.
    ///
    /// An invalid name or a blank phrase fails with `InvalidInput` before
    /// any call is made.
    pub async fn generate_poem(&self, name: &str, praise: &str) -> Result<PoemResult, PraiseError> {
        let request = PoemRequest::new(name, praise)?;
        self.generate(&request).await
    }

    /// Generates a poem for an already validated request.
    ///
    /// Makes exactly one generator call. Errors raised by the generator are
    /// reported as `RemoteFailure`; a reply that is not the agreed JSON is
    /// reported as `MalformedResponse`.
    pub async fn generate(&self, request: &PoemRequest) -> Result<PoemResult, PraiseError> {
        let generation = GenerationRequest::new(build_prompt(request))
            .config(self.config.clone())
            .schema(poem_schema());

        log::debug!(
            "Generating poem for {} character name with theme {:?}",
            request.name.char_count(),
            request.praise
        );

        let raw = self.generator.generate(&generation).await.map_err(|e| {
            log::error!("Error generating poem: {}", e);
            match e {
                PraiseError::RemoteFailure(_) => e,
                other => PraiseError::RemoteFailure(other.to_string()),
            }
        })?;

        parse_reply(&raw).map_err(|e| {
            log::error!("Error reading poem reply: {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::error::ErrorKind;

    /// Replays a fixed reply and records what it was asked.
    struct ScriptedGenerator {
        reply: Result<String, String>,
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Vec<GenerationRequest>>>,
    }

    impl ScriptedGenerator {
        fn new(reply: Result<&str, &str>) -> Self {
            Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                calls: Arc::new(AtomicUsize::new(0)),
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, PraiseError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request.clone());
            self.reply.clone().map_err(PraiseError::RemoteFailure)
        }
    }

    #[tokio::test]
    async fn test_invalid_name_skips_generator() {
        let generator = ScriptedGenerator::new(Ok("{\"poem\":\"A\\nB\"}"));
        let calls = generator.calls.clone();
        let adapter = PoemAdapter::new(Box::new(generator));

        for name in ["", "a", " 가 ", "여섯글자이름"] {
            let err = adapter.generate_poem(name, "칭찬").await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_praise_skips_generator() {
        let generator = ScriptedGenerator::new(Ok("{\"poem\":\"A\\nB\"}"));
        let calls = generator.calls.clone();
        let adapter = PoemAdapter::new(Box::new(generator));

        let err = adapter.generate_poem("민수", "  ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_request_carries_sampling_and_schema() {
        let generator = ScriptedGenerator::new(Ok("{\"poem\":\"민\\n수\"}"));
        let seen = generator.seen.clone();
        let adapter = PoemAdapter::new(Box::new(generator));

        adapter.generate_poem(" 민수 ", "따뜻한 마음").await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let request = &seen[0];
        assert_eq!(request.config.temperature, Some(0.8));
        assert_eq!(request.config.top_p, Some(1.0));
        assert_eq!(request.config.top_k, Some(40));
        assert_eq!(request.response_mime_type(), Some("application/json"));
        assert!(request.prompt.contains("'민수'"));
        assert!(request.prompt.contains("따뜻한 마음"));
        let schema = request.schema.as_ref().unwrap();
        assert_eq!(schema["required"][0], "poem");
    }

    #[tokio::test]
    async fn test_generator_error_is_remote_failure() {
        struct Mislabelled;

        #[async_trait]
        impl TextGenerator for Mislabelled {
            async fn generate(&self, _request: &GenerationRequest) -> Result<String, PraiseError> {
                Err(PraiseError::MalformedResponse("bad envelope".into()))
            }
        }

        let adapter = PoemAdapter::new(Box::new(Mislabelled));
        let err = adapter.generate_poem("민수", "칭찬").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteFailure);
        assert!(err.to_string().contains("bad envelope"));
    }
}
