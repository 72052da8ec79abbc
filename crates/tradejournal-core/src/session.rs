//! Application state for one journaling session.
//!
//! All state lives in [`JournalSession`] and changes only through
//! [`JournalSession::dispatch`]. Front-ends translate user input into
//! [`Action`]s and render [`JournalSession::view`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::{CaptureCapability, CaptureError, CaptureSession, TranscriptSegment};
use crate::positions::{aggregate, chart_rows, ChartRow, PositionError};
use crate::{
    EntryDraft, EntryId, FormField, InsightReport, Journal, JournalEntry, SentimentScorer,
    ValidationError,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("entry rejected: {0}")]
    Rejected(#[from] ValidationError),

    #[error(transparent)]
    Capture(CaptureError),

    #[error(transparent)]
    Positions(#[from] PositionError),
}

/// Top-level view of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Journal,
    Insights,
    Performance,
    History,
}

impl Tab {
    pub const ALL: [Self; 4] = [Self::Journal, Self::Insights, Self::Performance, Self::History];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Insights => "insights",
            Self::Performance => "performance",
            Self::History => "history",
        }
    }
}

impl Display for Tab {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == normalized)
            .ok_or_else(|| {
                format!("unknown tab '{value}', expected one of journal, insights, performance, history")
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectTab(Tab),
    EditField(FormField, String),
    EditVoiceInput(String),
    StartRecording,
    Transcript(Vec<TranscriptSegment>),
    StopRecording,
    Submit,
}

/// What a dispatched action did, for front-end feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    RecordingStarted,
    /// Capture is unavailable; the session carries on without it.
    CaptureUnavailable,
    RecordingStopped { transcript: String },
    /// Stop pressed while not recording.
    Ignored,
    Recorded(EntryId),
}

/// Mutable UI state, separate from the journal itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub active_tab: Tab,
    pub draft: EntryDraft,
    pub voice_input: String,
    pub is_recording: bool,
    pub insights: Option<InsightReport>,
}

/// Render model for the active tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum TabView<'a> {
    Journal {
        draft: &'a EntryDraft,
        voice_input: &'a str,
        is_recording: bool,
        capture: CaptureCapability,
    },
    Insights {
        report: Option<&'a InsightReport>,
    },
    Performance {
        rows: Vec<ChartRow>,
    },
    History {
        entries: &'a [JournalEntry],
    },
}

#[derive(Debug)]
pub struct JournalSession {
    state: AppState,
    journal: Journal,
    scorer: SentimentScorer,
    capture: CaptureSession,
}

impl JournalSession {
    pub fn new(scorer: SentimentScorer, capability: CaptureCapability) -> Self {
        Self {
            state: AppState::default(),
            journal: Journal::new(),
            scorer,
            capture: CaptureSession::new(capability),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, SessionError> {
        match action {
            Action::SelectTab(tab) => {
                self.state.active_tab = tab;
                Ok(Outcome::Updated)
            }
            Action::EditField(field, value) => {
                self.state.draft.set(field, value);
                Ok(Outcome::Updated)
            }
            Action::EditVoiceInput(text) => {
                self.state.voice_input = text;
                Ok(Outcome::Updated)
            }
            Action::StartRecording => match self.capture.start() {
                Ok(()) => {
                    self.state.is_recording = true;
                    Ok(Outcome::RecordingStarted)
                }
                Err(CaptureError::Unsupported) => Ok(Outcome::CaptureUnavailable),
                Err(err) => Err(SessionError::Capture(err)),
            },
            Action::Transcript(batch) => {
                self.capture.ingest(&batch);
                Ok(Outcome::Updated)
            }
            Action::StopRecording => match self.capture.stop() {
                Some(transcript) => {
                    self.state.is_recording = false;
                    self.state.voice_input = transcript.clone();
                    Ok(Outcome::RecordingStopped { transcript })
                }
                None => Ok(Outcome::Ignored),
            },
            Action::Submit => self.submit(),
        }
    }

    fn submit(&mut self) -> Result<Outcome, SessionError> {
        let entry = self
            .journal
            .record(&self.state.draft, &self.state.voice_input)?;
        let id = entry.id();
        self.state.insights = Some(InsightReport::generate(entry, &self.scorer));
        self.state.draft = EntryDraft::default();
        self.state.voice_input.clear();
        Ok(Outcome::Recorded(id))
    }

    /// Render model of the active tab.
    ///
    /// Only the performance tab can fail, when position totals overflow.
    pub fn view(&self) -> Result<TabView<'_>, SessionError> {
        let view = match self.state.active_tab {
            Tab::Journal => TabView::Journal {
                draft: &self.state.draft,
                voice_input: &self.state.voice_input,
                is_recording: self.state.is_recording,
                capture: self.capture.capability(),
            },
            Tab::Insights => TabView::Insights {
                report: self.state.insights.as_ref(),
            },
            Tab::Performance => TabView::Performance {
                rows: chart_rows(&aggregate(self.journal.entries())?),
            },
            Tab::History => TabView::History {
                entries: self.journal.entries(),
            },
        };
        Ok(view)
    }
}
