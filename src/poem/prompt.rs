use serde_json::{json, Value};

use super::{PoemRequest, PoemResult};
use crate::error::PraiseError;

/// Name of the single field the model must fill in.
pub const POEM_FIELD: &str = "poem";

/// Builds the instruction sent to the model.
///
/// The text is fixed apart from the name, its length and the praise phrase,
/// so the same request always produces the same prompt.
pub fn build_prompt(request: &PoemRequest) -> String {
    let name = request.name.as_str();
    format!(
        "'{name}'(으)로 {count}행시를 지어줘. 이름이 {count}글자이니 정확히 {count}줄로 쓰고, \
         각 줄은 이름의 글자를 순서대로 하나씩 사용해서 그 글자로 시작해야 해. \
         전체적인 주제는 '{praise}'이고, 긍정적이고 따뜻한 칭찬의 내용으로 작성해줘. \
         결과는 \"{field}\" 필드 하나를 가진 JSON 객체로 돌려주고, 각 줄은 줄바꿈(\\n)으로 구분해줘.",
        name = name,
        count = request.name.char_count(),
        praise = request.praise,
        field = POEM_FIELD,
    )
}

/// Schema the reply must follow: an object with one required string `poem`.
///
/// Types are spelled the way the Gemini `responseSchema` expects them.
pub fn poem_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            POEM_FIELD: {
                "type": "STRING",
                "description": "각 행이 줄바꿈(\\n)으로 구분된 칭찬 시"
            }
        },
        "required": [POEM_FIELD]
    })
}

/// Extracts the poem from the raw model reply.
///
/// The reply is trimmed and parsed as JSON; it has to be an object whose
/// `poem` is a non-empty string. The poem is trimmed before being returned.
pub fn parse_reply(raw: &str) -> Result<PoemResult, PraiseError> {
    let reply: Value = serde_json::from_str(raw.trim())?;
    let poem = match reply.get(POEM_FIELD) {
        Some(Value::String(text)) => text.trim(),
        None | Some(Value::Null) => {
            return Err(PraiseError::MalformedResponse(format!(
                "reply has no `{POEM_FIELD}` field"
            )))
        }
        Some(other) => {
            return Err(PraiseError::MalformedResponse(format!(
                "`{POEM_FIELD}` is not a string: {other}"
            )))
        }
    };
    if poem.is_empty() {
        return Err(PraiseError::MalformedResponse(format!(
            "`{POEM_FIELD}` is empty"
        )));
    }
    Ok(PoemResult::new(poem))
}
