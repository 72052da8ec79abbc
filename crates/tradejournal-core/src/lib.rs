//! Core contracts for tradejournal.
//!
//! This crate contains:
//! - Validated journal entries and the append-only in-memory journal
//! - Lexicon-driven sentiment scoring and per-entry insight reports
//! - Per-symbol position aggregation
//! - The speech capture session and the session state reducer
//! - Response envelope, structured errors and configuration

pub mod capture;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod insights;
pub mod journal;
pub mod lexicon;
pub mod positions;
pub mod sentiment;
pub mod session;

pub use capture::{CaptureCapability, CaptureError, CaptureSession, TranscriptSegment};
pub use config::{ConfigError, JournalConfig};
pub use domain::{
    EntryDraft, EntryId, FormField, JournalEntry, Symbol, TradeAction, TradeDate, TradeTicket,
    UtcDateTime, MAX_QUANTITY,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, SCHEMA_VERSION};
pub use error::ValidationError;
pub use insights::InsightReport;
pub use journal::Journal;
pub use lexicon::{Lexicon, LexiconError};
pub use positions::{aggregate, chart_rows, ChartRow, PositionError, PositionSummary};
pub use sentiment::{KeyWords, Sentiment, SentimentReport, SentimentScorer};
pub use session::{Action, AppState, JournalSession, Outcome, SessionError, Tab, TabView};
