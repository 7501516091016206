//! Domain types for a single poem generation: the validated name, the request
//! sent through the adapter, and the resulting poem.

use std::fmt;

use crate::error::PraiseError;

/// Prompt template and reply schema for acrostic poems.
pub mod prompt;

/// Minimum number of characters in a name, after trimming.
pub const NAME_MIN_CHARS: usize = 2;
/// Maximum number of characters in a name, after trimming.
pub const NAME_MAX_CHARS: usize = 5;

/// Returns true if `input`, once trimmed, has an acceptable character count.
///
/// Characters are counted as Unicode scalar values, so "민수" counts as 2.
pub fn is_valid_name(input: &str) -> bool {
    let len = input.trim().chars().count();
    (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len)
}

/// A trimmed name whose length has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    /// Trims and validates a user-supplied name.
    pub fn parse(input: &str) -> Result<Self, PraiseError> {
        if !is_valid_name(input) {
            return Err(PraiseError::InvalidInput(format!(
                "name must be {}-{} characters, got {}",
                NAME_MIN_CHARS,
                NAME_MAX_CHARS,
                input.trim().chars().count()
            )));
        }
        Ok(Self(input.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters, which is also the number of poem lines asked for.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A name paired with the praise phrase chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemRequest {
    /// Who the poem is for
    pub name: Name,
    /// Theme of the poem
    pub praise: String,
}

impl PoemRequest {
    /// Builds a request, rejecting names outside the allowed length and a
    /// blank praise phrase.
    pub fn new(name: &str, praise: impl Into<String>) -> Result<Self, PraiseError> {
        let name = Name::parse(name)?;
        let praise = praise.into();
        if praise.trim().is_empty() {
            return Err(PraiseError::InvalidInput(
                "praise phrase must not be empty".to_string(),
            ));
        }
        Ok(Self { name, praise })
    }
}

/// Poem text as returned by the model, one line per character of the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemResult {
    /// Lines separated by `\n`
    pub text: String,
}

impl PoemResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

impl fmt::Display for PoemResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_name_counts_characters_not_bytes() {
        let name = Name::parse("김민수").unwrap();
        assert_eq!(name.char_count(), 3);
        assert_eq!("김민수".len(), 9);
    }

    #[test]
    fn test_name_is_trimmed() {
        let name = Name::parse("  민수 ").unwrap();
        assert_eq!(name.as_str(), "민수");
    }

    #[test]
    fn test_name_bounds() {
        assert!(Name::parse("ab").is_ok());
        assert!(Name::parse("abcde").is_ok());
        for bad in ["", " ", "a", "  가  ", "abcdef", "가나다라마바"] {
            let err = Name::parse(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "input {bad:?}");
        }
    }

    #[test]
    fn test_request_needs_praise() {
        assert!(PoemRequest::new("민수", "빛나요").is_ok());
        for blank in ["", "   ", "\n"] {
            let err = PoemRequest::new("민수", blank).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "praise {blank:?}");
        }
    }

    #[test]
    fn test_poem_lines() {
        let poem = PoemResult::new("민: 민들레처럼\n수: 수줍게 웃는");
        assert_eq!(poem.lines().count(), 2);
    }
}
