use crate::{EntryDraft, EntryId, JournalEntry, UtcDateTime, ValidationError};

/// Append-only, in-memory list of entries, newest first.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
    last_id: EntryId,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `draft` and records it with the next id.
    pub fn record(
        &mut self,
        draft: &EntryDraft,
        voice_input: &str,
    ) -> Result<&JournalEntry, ValidationError> {
        let ticket = draft.validate()?;
        let id = self.last_id.next();
        let entry = JournalEntry::new(id, ticket, voice_input, UtcDateTime::now());

        tracing::info!(
            id = id.get(),
            symbol = %entry.symbol(),
            action = %entry.action(),
            quantity = entry.quantity(),
            price = %entry.price(),
            "recorded journal entry"
        );

        self.last_id = id;
        self.entries.insert(0, entry);
        Ok(&self.entries[0])
    }

    /// Entries in newest-first order.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&JournalEntry> {
        self.entries.first()
    }

    pub fn get(&self, id: EntryId) -> Option<&JournalEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
