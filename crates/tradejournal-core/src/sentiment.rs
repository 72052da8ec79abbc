//! Word-list sentiment scoring.
//!
//! Text is lower-cased and split on every run of non-word characters
//! (anything but ASCII letters, digits and `_`). Each token found in the
//! positive list adds one point, each token in the negative list removes one.
//! There is no stemming, negation handling or weighting.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Lexicon;

const KEY_WORD_LIMIT: usize = 5;
const KEY_WORD_MIN_LEN: usize = 4;

/// Coarse sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn from_score(score: i64) -> Self {
        match score {
            s if s > 0 => Self::Positive,
            s if s < 0 => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Up to five distinct tokens longer than three characters, in order of
/// first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyWords(Vec<String>);

impl KeyWords {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for KeyWords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Everything the scorer derives from one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub sentiment: Sentiment,
    pub score: i64,
    pub positive_hits: usize,
    pub negative_hits: usize,
    pub key_words: KeyWords,
}

pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Lower-cases `text` and splits it into non-empty word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|ch: char| !is_word_char(ch))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct SentimentScorer {
    lexicon: Lexicon,
}

impl SentimentScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn score(&self, text: &str) -> i64 {
        tokenize(text)
            .iter()
            .map(|token| i64::from(self.lexicon.polarity(token)))
            .sum()
    }

    pub fn classify(&self, text: &str) -> Sentiment {
        Sentiment::from_score(self.score(text))
    }

    pub fn key_words(&self, text: &str) -> KeyWords {
        let mut seen = HashSet::new();
        let words = tokenize(text)
            .into_iter()
            .filter(|token| token.chars().count() >= KEY_WORD_MIN_LEN)
            .filter(|token| seen.insert(token.clone()))
            .take(KEY_WORD_LIMIT)
            .collect();
        KeyWords(words)
    }

    pub fn analyze(&self, text: &str) -> SentimentReport {
        let (positive_hits, negative_hits) =
            tokenize(text).iter().fold((0, 0), |(pos, neg), token| {
                match self.lexicon.polarity(token) {
                    1 => (pos + 1, neg),
                    -1 => (pos, neg + 1),
                    _ => (pos, neg),
                }
            });
        let score = positive_hits as i64 - negative_hits as i64;

        tracing::debug!(score, positive_hits, negative_hits, "scored text");

        SentimentReport {
            sentiment: Sentiment::from_score(score),
            score,
            positive_hits,
            negative_hits,
            key_words: self.key_words(text),
        }
    }
}
