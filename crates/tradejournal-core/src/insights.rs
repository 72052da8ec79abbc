use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EntryId, JournalEntry, KeyWords, Sentiment, SentimentScorer, Symbol, TradeAction};

/// Summary shown after an entry is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightReport {
    pub entry_id: EntryId,
    pub sentiment: Sentiment,
    pub key_words: KeyWords,
    pub action: TradeAction,
    pub quantity: u64,
    pub symbol: Symbol,
    pub price: Decimal,
    pub next_step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_analysis: Option<String>,
}

impl InsightReport {
    pub fn generate(entry: &JournalEntry, scorer: &SentimentScorer) -> Self {
        let combined = entry.combined_text();
        let sentiment = scorer.classify(&combined);
        let key_words = scorer.key_words(&combined);

        let voice_analysis = (!entry.voice_input().is_empty()).then(|| {
            format!(
                "The trader's voice input suggests {} sentiment. Key points mentioned: {}. \
This aligns with the {} action taken on {}.",
                sentiment.as_str().to_lowercase(),
                key_words,
                entry.action(),
                entry.symbol(),
            )
        });

        Self {
            entry_id: entry.id(),
            sentiment,
            key_words,
            action: entry.action(),
            quantity: entry.quantity(),
            symbol: entry.symbol().clone(),
            price: entry.price(),
            next_step: next_step(sentiment).to_owned(),
            voice_analysis,
        }
    }
}

pub fn next_step(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "Consider taking profits",
        Sentiment::Negative => "Monitor closely for exit opportunities",
        Sentiment::Neutral => "Continue to observe market conditions",
    }
}

impl Display for InsightReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sentiment Analysis: {}", self.sentiment)?;
        writeln!(f, "Key words: {}", self.key_words)?;
        writeln!(
            f,
            "Action taken: {} {} shares of {} at ${}",
            self.action, self.quantity, self.symbol, self.price
        )?;
        write!(f, "Potential next steps: {}", self.next_step)?;

        if let Some(voice) = &self.voice_analysis {
            write!(f, "\n\nVoice Input Analysis:\n{voice}")?;
        }
        Ok(())
    }
}
