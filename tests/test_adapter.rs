use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use praise_box::{
    async_trait,
    builder::PoemAdapterBuilder,
    generation::{GenerationRequest, TextGenerator},
    ErrorKind, PoemAdapter, PraiseError,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// What the fake service does when called.
#[derive(Clone)]
enum Reply {
    Text(&'static str),
    Transport(&'static str),
}

struct FakeService {
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl TextGenerator for FakeService {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, PraiseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Transport(msg) => Err(PraiseError::RemoteFailure(msg.to_string())),
        }
    }
}

fn adapter(reply: Reply) -> (PoemAdapter, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = FakeService {
        reply,
        calls: calls.clone(),
    };
    (PoemAdapter::new(Box::new(service)), calls)
}

#[tokio::test]
async fn test_out_of_range_names_make_no_call() {
    let (adapter, calls) = adapter(Reply::Text("{\"poem\":\"A\\nB\"}"));
    for name in ["", "a", "민", "  a  ", "abcdef", "김수한무거북"] {
        let err = adapter.generate_poem(name, "칭찬").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "name {name:?}");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_valid_names_return_poem_exactly() {
    let (adapter, calls) = adapter(Reply::Text("{\"poem\":\"A\\nB\"}"));
    for name in ["민수", "김민수", "abcd", "남궁민수다", "  ab  "] {
        let poem = adapter.generate_poem(name, "칭찬").await.unwrap();
        assert_eq!(poem.text, "A\nB", "name {name:?}");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_invalid_json_is_malformed() {
    let (adapter, calls) = adapter(Reply::Text("민수는 최고야"));
    let err = adapter.generate_poem("민수", "칭찬").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_or_empty_poem_is_malformed() {
    for reply in ["{}", "{\"text\":\"A\\nB\"}", "{\"poem\":\"\"}", "{\"poem\":\"  \\n \"}"] {
        let (adapter, _) = adapter(Reply::Text(reply));
        let err = adapter.generate_poem("민수", "칭찬").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse, "reply {reply:?}");
    }
}

#[tokio::test]
async fn test_transport_error_is_remote_failure() {
    let (adapter, calls) = adapter(Reply::Transport("connection reset by peer"));
    let err = adapter.generate_poem("민수", "칭찬").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RemoteFailure);
    // No retry
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_end_to_end_through_gemini_wire() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "\n {\"poem\": \" 민들레처럼 환한 미소\\n수줍은 듯 따뜻한 마음 \"} \n" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = PoemAdapterBuilder::new()
        .api_key("test-key")
        .base_url(server.uri())
        .build()?;
    let poem = adapter.generate_poem("민수", "칭찬").await?;
    assert_eq!(poem.text, "민들레처럼 환한 미소\n수줍은 듯 따뜻한 마음");
    Ok(())
}

#[tokio::test]
async fn test_non_json_body_from_gemini_is_malformed() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "민: 민들레\n수: 수선화" }] } }]
        })))
        .mount(&server)
        .await;

    let adapter = PoemAdapterBuilder::new()
        .api_key("test-key")
        .base_url(server.uri())
        .build()?;
    let err = adapter.generate_poem("민수", "칭찬").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    Ok(())
}
