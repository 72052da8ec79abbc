//! Positive/negative word lists used by the sentiment scorer.
//!
//! Lexicon files are JSON or YAML documents of the form
//! `{ "positive": [...], "negative": [...] }`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sentiment::is_word_char;
use crate::ValidationError;

const DEFAULT_POSITIVE: [&str; 8] = [
    "good",
    "great",
    "excellent",
    "profit",
    "gain",
    "up",
    "bullish",
    "confident",
];

const DEFAULT_NEGATIVE: [&str; 7] = [
    "bad",
    "poor",
    "loss",
    "down",
    "bearish",
    "worried",
    "concerned",
];

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lexicon '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unsupported lexicon format '{extension}', expected .json, .yaml or .yml")]
    UnsupportedFormat { extension: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Two disjoint sets of lower-case words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLexicon")]
pub struct Lexicon {
    positive: BTreeSet<String>,
    negative: BTreeSet<String>,
}

#[derive(Deserialize)]
struct RawLexicon {
    #[serde(default)]
    positive: Vec<String>,
    #[serde(default)]
    negative: Vec<String>,
}

impl TryFrom<RawLexicon> for Lexicon {
    type Error = ValidationError;

    fn try_from(raw: RawLexicon) -> Result<Self, Self::Error> {
        Self::new(raw.positive, raw.negative)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive: DEFAULT_POSITIVE.iter().map(|w| (*w).to_owned()).collect(),
            negative: DEFAULT_NEGATIVE.iter().map(|w| (*w).to_owned()).collect(),
        }
    }
}

impl Lexicon {
    pub fn new<P, N>(positive: P, negative: N) -> Result<Self, ValidationError>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let positive = normalize_words(positive)?;
        let negative = normalize_words(negative)?;

        if let Some(word) = positive.intersection(&negative).next() {
            return Err(ValidationError::LexiconOverlap { word: word.clone() });
        }

        Ok(Self { positive, negative })
    }

    /// Loads a lexicon file, choosing the parser from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let parse_error = |message: String| LexiconError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let content = match extension.as_str() {
            "json" | "yaml" | "yml" => {
                fs::read_to_string(path).map_err(|source| LexiconError::Io {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            _ => return Err(LexiconError::UnsupportedFormat { extension }),
        };

        let lexicon = if extension == "json" {
            serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        };

        tracing::debug!(path = %path.display(), "loaded lexicon");
        Ok(lexicon)
    }

    pub fn positive(&self) -> &BTreeSet<String> {
        &self.positive
    }

    pub fn negative(&self) -> &BTreeSet<String> {
        &self.negative
    }

    /// +1 for a positive word, -1 for a negative word, 0 otherwise.
    pub fn polarity(&self, token: &str) -> i8 {
        if self.positive.contains(token) {
            1
        } else if self.negative.contains(token) {
            -1
        } else {
            0
        }
    }
}

fn normalize_words<I>(words: I) -> Result<BTreeSet<String>, ValidationError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    words
        .into_iter()
        .map(|word| {
            let normalized = word.as_ref().trim().to_lowercase();
            if normalized.is_empty() {
                return Err(ValidationError::EmptyLexiconWord);
            }
            if !normalized.chars().all(is_word_char) {
                return Err(ValidationError::LexiconWordNotToken { word: normalized });
            }
            Ok(normalized)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_lexicon_carries_builtin_lists() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.positive().len(), 8);
        assert_eq!(lexicon.negative().len(), 7);
        assert_eq!(lexicon.polarity("bullish"), 1);
        assert_eq!(lexicon.polarity("bearish"), -1);
        assert_eq!(lexicon.polarity("sideways"), 0);
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let lexicon = Lexicon::new([" Moon "], ["Rekt"]).expect("valid lexicon");
        assert!(lexicon.positive().contains("moon"));
        assert!(lexicon.negative().contains("rekt"));
    }

    #[test]
    fn rejects_overlapping_lists() {
        let err = Lexicon::new(["flat"], ["FLAT"]).expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::LexiconOverlap {
                word: String::from("flat")
            }
        );
    }

    #[test]
    fn rejects_words_that_cannot_match_a_token() {
        let err = Lexicon::new(["to the moon"], Vec::<String>::new()).expect_err("must fail");
        assert!(matches!(err, ValidationError::LexiconWordNotToken { .. }));
    }

    #[test]
    fn loads_yaml_lexicon_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("tempfile");
        writeln!(file, "positive: [rally, breakout]\nnegative: [dump]").expect("write");

        let lexicon = Lexicon::from_path(file.path()).expect("lexicon should load");
        assert_eq!(lexicon.polarity("rally"), 1);
        assert_eq!(lexicon.polarity("dump"), -1);
        assert_eq!(lexicon.polarity("good"), 0);
    }

    #[test]
    fn loads_json_lexicon_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        write!(file, r#"{{"positive":["win"],"negative":["miss"]}}"#).expect("write");

        let lexicon = Lexicon::from_path(file.path()).expect("lexicon should load");
        assert_eq!(lexicon.polarity("win"), 1);
    }

    #[test]
    fn invalid_lexicon_file_is_a_parse_error() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        write!(file, r#"{{"positive":["same"],"negative":["same"]}}"#).expect("write");

        let err = Lexicon::from_path(file.path()).expect_err("must fail");
        assert!(matches!(err, LexiconError::Parse { .. }));
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = Lexicon::from_path("words.txt").expect_err("must fail");
        assert!(matches!(err, LexiconError::UnsupportedFormat { .. }));
    }
}
