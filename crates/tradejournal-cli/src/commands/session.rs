use std::io::{self, BufRead, Write};

use tradejournal_core::{
    aggregate, Action, CaptureCapability, FormField, JournalSession, Outcome, Tab,
    TranscriptSegment,
};

use crate::cli::SessionArgs;
use crate::error::CliError;
use crate::views;

use super::{CommandResult, Context};

const HELP: &str = "\
commands:
  set <field> <value>   edit a form field (date, symbol, action, price, quantity, notes)
  voice <text>          replace the voice input text
  record start|stop     start or stop speech capture
  hear <text>           interim speech result (while recording)
  heard <text>          final speech result (while recording)
  submit                record the entry
  tab <name>            switch to journal, insights, performance or history
  show                  render the current tab
  help                  this text
  quit                  end the session";

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionCommand {
    Dispatch(Action),
    Show,
    Help,
    Quit,
}

impl SessionCommand {
    /// `Ok(None)` for blank lines and `#` comments.
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(String::from("usage: set <field> <value>"));
                }
                let field: FormField = field.parse()?;
                Self::Dispatch(Action::EditField(field, value.trim().to_owned()))
            }
            "voice" => Self::Dispatch(Action::EditVoiceInput(rest.to_owned())),
            "record" => match rest.to_ascii_lowercase().as_str() {
                "start" => Self::Dispatch(Action::StartRecording),
                "stop" => Self::Dispatch(Action::StopRecording),
                _ => return Err(String::from("usage: record start|stop")),
            },
            "hear" => Self::Dispatch(Action::Transcript(vec![TranscriptSegment::interim(rest)])),
            "heard" => Self::Dispatch(Action::Transcript(vec![TranscriptSegment::finished(rest)])),
            "submit" => Self::Dispatch(Action::Submit),
            "tab" => Self::Dispatch(Action::SelectTab(rest.parse::<Tab>()?)),
            "show" => Self::Show,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command '{other}', type 'help'")),
        };

        Ok(Some(command))
    }
}

/// Counters reported once the session ends.
#[derive(Debug, Default, PartialEq, Eq)]
struct SessionStats {
    recorded: usize,
    rejected: usize,
}

pub fn run(args: &SessionArgs, context: Context) -> Result<CommandResult, CliError> {
    let capability = if args.no_speech {
        CaptureCapability::Unsupported
    } else {
        CaptureCapability::Available
    };
    let mut session = JournalSession::new(context.scorer, capability);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stats = drive(stdin.lock(), stdout.lock(), &mut session)?;

    summarize(&session, &stats)
}

fn drive<R: BufRead, W: Write>(
    input: R,
    mut out: W,
    session: &mut JournalSession,
) -> Result<SessionStats, CliError> {
    let mut stats = SessionStats::default();
    writeln!(out, "tradejournal session, type 'help' for commands")?;

    for line in input.lines() {
        let line = line?;
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "? {message}")?;
                continue;
            }
        };

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Show => show(&mut out, session)?,
            SessionCommand::Dispatch(action) => {
                let switches_tab = matches!(action, Action::SelectTab(_));
                match session.dispatch(action) {
                    Ok(outcome) => {
                        report_outcome(&mut out, session, &outcome)?;
                        if matches!(outcome, Outcome::Recorded(_)) {
                            stats.recorded += 1;
                        }
                        if switches_tab {
                            show(&mut out, session)?;
                        }
                    }
                    Err(err) => {
                        if matches!(err, tradejournal_core::SessionError::Rejected(_)) {
                            stats.rejected += 1;
                        }
                        writeln!(out, "! {err}")?;
                    }
                }
            }
        }
    }

    out.flush()?;
    Ok(stats)
}

/// Prints the active tab, or the reason it cannot be drawn.
fn show<W: Write>(out: &mut W, session: &JournalSession) -> Result<(), CliError> {
    match session.view() {
        Ok(view) => writeln!(out, "{}", views::render(&view))?,
        Err(err) => writeln!(out, "! {err}")?,
    }
    Ok(())
}

fn report_outcome<W: Write>(
    out: &mut W,
    session: &JournalSession,
    outcome: &Outcome,
) -> Result<(), CliError> {
    match outcome {
        Outcome::Updated | Outcome::Ignored => {}
        Outcome::RecordingStarted => writeln!(out, "recording...")?,
        Outcome::CaptureUnavailable => {
            writeln!(out, "speech recognition is not available; type the voice input instead")?
        }
        Outcome::RecordingStopped { transcript } => {
            writeln!(out, "voice input: {transcript}")?
        }
        Outcome::Recorded(id) => {
            writeln!(out, "recorded {id}")?;
            if let Some(report) = &session.state().insights {
                writeln!(out, "{report}")?;
            }
        }
    }
    Ok(())
}

fn summarize(session: &JournalSession, stats: &SessionStats) -> Result<CommandResult, CliError> {
    let entries = session.journal().entries();
    let positions = aggregate(entries)?;

    let data = serde_json::json!({
        "recorded": stats.recorded,
        "rejected": stats.rejected,
        "entries": entries,
        "positions": positions,
    });

    let mut result = CommandResult::ok(data).with_text(format!(
        "session ended: {} recorded, {} rejected",
        stats.recorded, stats.rejected
    ));
    if stats.rejected > 0 {
        result = result.with_warning(format!(
            "{} submission(s) were rejected during the session",
            stats.rejected
        ));
    }
    Ok(result)
}
