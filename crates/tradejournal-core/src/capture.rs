//! Speech capture session.
//!
//! The recognizer itself lives outside this crate. It pushes result batches
//! into [`CaptureSession::ingest`] while recording; callers only ever see the
//! transcript handed back by [`CaptureSession::stop`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    #[error("speech recognition is not supported on this host")]
    Unsupported,
    #[error("capture is already recording")]
    AlreadyRecording,
}

/// Whether the host provides a speech recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureCapability {
    Available,
    Unsupported,
}

/// One recognizer result; interim results may later be revised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub is_final: bool,
}

impl TranscriptSegment {
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }
}

#[derive(Debug)]
pub struct CaptureSession {
    capability: CaptureCapability,
    recording: bool,
    buffer: String,
    final_transcript: Option<String>,
    diagnostic_reported: bool,
}

impl CaptureSession {
    pub fn new(capability: CaptureCapability) -> Self {
        Self {
            capability,
            recording: false,
            buffer: String::new(),
            final_transcript: None,
            diagnostic_reported: false,
        }
    }

    pub fn capability(&self) -> CaptureCapability {
        self.capability
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.capability == CaptureCapability::Unsupported {
            if !self.diagnostic_reported {
                tracing::warn!("speech recognition is not supported on this host; recording controls are disabled");
                self.diagnostic_reported = true;
            }
            return Err(CaptureError::Unsupported);
        }
        if self.recording {
            return Err(CaptureError::AlreadyRecording);
        }

        self.buffer.clear();
        self.recording = true;
        tracing::debug!("capture started");
        Ok(())
    }

    /// Replaces the buffered transcript with this batch: its final segments
    /// when it has any, otherwise its interim segments.
    pub fn ingest(&mut self, batch: &[TranscriptSegment]) {
        if !self.recording {
            tracing::debug!(segments = batch.len(), "ignoring transcript batch while idle");
            return;
        }

        let join = |is_final: bool| -> String {
            batch
                .iter()
                .filter(|segment| segment.is_final == is_final)
                .map(|segment| segment.text.as_str())
                .collect()
        };

        let finished = join(true);
        self.buffer = if finished.is_empty() {
            join(false)
        } else {
            finished
        };
    }

    /// Ends recording and returns the latest transcript; `None` when idle.
    pub fn stop(&mut self) -> Option<String> {
        if !self.recording {
            return None;
        }

        self.recording = false;
        let transcript = std::mem::take(&mut self.buffer);
        tracing::debug!(chars = transcript.len(), "capture stopped");
        self.final_transcript = Some(transcript.clone());
        Some(transcript)
    }

    pub fn final_transcript(&self) -> Option<&str> {
        self.final_transcript.as_deref()
    }
}
