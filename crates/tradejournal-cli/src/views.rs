use tradejournal_core::{CaptureCapability, FormField, JournalEntry, TabView};

use crate::chart;

/// Plain-text rendering of the active session tab.
pub fn render(view: &TabView<'_>) -> String {
    match view {
        TabView::Journal {
            draft,
            voice_input,
            is_recording,
            capture,
        } => {
            let mut lines = vec![String::from("[journal]")];
            for field in FormField::ALL {
                let marker = if field.is_required() { "*" } else { " " };
                lines.push(format!(
                    "{marker}{:<9}: {}",
                    field.as_str(),
                    draft.field(field)
                ));
            }
            lines.push(format!(" {:<9}: {voice_input}", "voice"));
            let status = match (*capture, *is_recording) {
                (CaptureCapability::Unsupported, _) => "unavailable",
                (CaptureCapability::Available, true) => "recording",
                (CaptureCapability::Available, false) => "idle",
            };
            lines.push(format!(" {:<9}: {status}", "speech"));
            lines.join("\n")
        }
        TabView::Insights { report } => match report {
            Some(report) => format!("[insights]\n{report}"),
            None => String::from("[insights]\n(no insights yet, submit an entry first)"),
        },
        TabView::Performance { rows } => format!("[performance]\n{}", chart::render(rows)),
        TabView::History { entries } => {
            if entries.is_empty() {
                return String::from("[history]\n(no entries yet)");
            }
            let blocks: Vec<String> = entries.iter().map(history_block).collect();
            format!("[history]\n{}", blocks.join("\n\n"))
        }
    }
}

fn history_block(entry: &JournalEntry) -> String {
    let mut block = format!(
        "{} - {}\nAction: {}\nPrice: ${}\nQuantity: {}\nNotes: {}",
        entry.date(),
        entry.symbol(),
        entry.action(),
        entry.price(),
        entry.quantity(),
        entry.notes(),
    );
    if !entry.voice_input().is_empty() {
        block.push_str(&format!("\nVoice Input: {}", entry.voice_input()));
    }
    block
}

#[cfg(test)]
mod tests {
    use tradejournal_core::{EntryDraft, Journal};

    use super::*;

    fn draft(symbol: &str, notes: &str) -> EntryDraft {
        EntryDraft {
            date: "2024-03-01".into(),
            symbol: symbol.into(),
            action: "buy".into(),
            price: "12.50".into(),
            quantity: "4".into(),
            notes: notes.into(),
        }
    }

    #[test]
    fn journal_view_marks_required_fields_and_capture_state() {
        let draft = draft("ABC", "");
        let text = render(&TabView::Journal {
            draft: &draft,
            voice_input: "",
            is_recording: false,
            capture: CaptureCapability::Unsupported,
        });

        assert!(text.contains("*symbol   : ABC"));
        assert!(text.contains(" notes    : "));
        assert!(text.ends_with(" speech   : unavailable"));
    }

    #[test]
    fn history_lists_newest_first_with_voice_input() {
        let mut journal = Journal::new();
        journal.record(&draft("ABC", "first"), "").expect("first");
        journal
            .record(&draft("XYZ", "second"), "sounded bullish")
            .expect("second");

        let text = render(&TabView::History {
            entries: journal.entries(),
        });

        let xyz = text.find("2024-03-01 - XYZ").expect("xyz");
        let abc = text.find("2024-03-01 - ABC").expect("abc");
        assert!(xyz < abc);
        assert!(text.contains("Price: $12.5\nQuantity: 4\nNotes: second\nVoice Input: sounded bullish"));
        assert!(!text.ends_with("Voice Input: "));
    }

    #[test]
    fn empty_insights_has_placeholder() {
        let text = render(&TabView::Insights { report: None });
        assert!(text.contains("no insights yet"));
    }
}
