//! The fixed catalog of praise phrases and random selection from it.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::PraiseError;

/// Praise phrases a poem can be themed on. Order is stable.
pub static PRAISE_PHRASES: &[&str] = &[
    "당신의 미소는 주변을 환하게 밝혀줘요",
    "당신은 존재 자체로 충분히 빛나요",
    "오늘도 최선을 다한 당신이 정말 멋져요",
    "당신의 따뜻한 마음이 많은 사람을 위로해요",
    "당신의 노력은 결코 헛되지 않아요",
    "당신과 함께하면 언제나 즐거워요",
    "당신의 긍정적인 에너지는 모두에게 힘이 돼요",
    "당신은 누구보다 용기 있는 사람이에요",
    "당신의 배려 덕분에 세상이 조금 더 따뜻해져요",
    "당신의 꿈을 응원해요, 분명 이루어질 거예요",
    "당신의 성실함은 모두의 본보기예요",
    "당신의 웃음소리는 최고의 선물이에요",
];

/// An immutable, non-empty list of phrases.
#[derive(Debug, Clone, Copy)]
pub struct PraiseCatalog {
    phrases: &'static [&'static str],
}

impl PraiseCatalog {
    /// Wraps a phrase list; an empty list is rejected.
    pub fn new(phrases: &'static [&'static str]) -> Result<Self, PraiseError> {
        if phrases.is_empty() {
            return Err(PraiseError::InvalidInput(
                "praise catalog must contain at least one phrase".to_string(),
            ));
        }
        if phrases.iter().any(|p| p.trim().is_empty()) {
            return Err(PraiseError::InvalidInput(
                "praise catalog must not contain blank phrases".to_string(),
            ));
        }
        Ok(Self { phrases })
    }

    pub fn phrases(&self) -> &'static [&'static str] {
        self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Picks one phrase uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        // Non-empty by construction.
        self.phrases.choose(rng).copied().unwrap_or(self.phrases[0])
    }
}

impl Default for PraiseCatalog {
    fn default() -> Self {
        Self {
            phrases: PRAISE_PHRASES,
        }
    }
}
