use std::fmt;

/// Category of a failure, used to pick the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The name did not pass the length check; nothing was sent
    InvalidInput,
    /// The remote service answered, but not with the agreed JSON shape
    MalformedResponse,
    /// Transport, HTTP status, authentication or any other service failure
    RemoteFailure,
    /// Writing to the clipboard failed
    ClipboardFailure,
}

impl ErrorKind {
    /// Human-readable text shown in place of the poem.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "이름은 2자 이상, 5자 이하로 입력해주세요.",
            ErrorKind::MalformedResponse => {
                "AI 응답을 처리하는 중 오류가 발생했습니다. 다시 시도해주세요."
            }
            ErrorKind::RemoteFailure => {
                "칭찬 삼행시를 만드는 데 실패했어요. 잠시 후 다시 시도해주세요."
            }
            ErrorKind::ClipboardFailure => "복사에 실패했습니다.",
        }
    }
}

/// Error types that can occur while generating or copying a praise poem.
#[derive(Debug)]
pub enum PraiseError {
    /// Name length out of range
    InvalidInput(String),
    /// Reply was not JSON, or `poem` was missing or empty
    MalformedResponse(String),
    /// Network, HTTP or provider errors
    RemoteFailure(String),
    /// Clipboard unavailable or write rejected
    ClipboardFailure(String),
}

impl PraiseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PraiseError::InvalidInput(_) => ErrorKind::InvalidInput,
            PraiseError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            PraiseError::RemoteFailure(_) => ErrorKind::RemoteFailure,
            PraiseError::ClipboardFailure(_) => ErrorKind::ClipboardFailure,
        }
    }

    /// Shorthand for `self.kind().user_message()`.
    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }
}

impl fmt::Display for PraiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PraiseError::InvalidInput(e) => write!(f, "Invalid Input: {}", e),
            PraiseError::MalformedResponse(e) => write!(f, "Malformed Response: {}", e),
            PraiseError::RemoteFailure(e) => write!(f, "Remote Failure: {}", e),
            PraiseError::ClipboardFailure(e) => write!(f, "Clipboard Failure: {}", e),
        }
    }
}

impl std::error::Error for PraiseError {}

/// Converts reqwest HTTP errors into PraiseErrors
impl From<reqwest::Error> for PraiseError {
    fn from(err: reqwest::Error) -> Self {
        PraiseError::RemoteFailure(err.to_string())
    }
}

/// Converts JSON parse errors into PraiseErrors
impl From<serde_json::Error> for PraiseError {
    fn from(err: serde_json::Error) -> Self {
        PraiseError::MalformedResponse(err.to_string())
    }
}
