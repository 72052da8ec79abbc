//! # Domain Models
//!
//! Validated journal types.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`JournalEntry`] | One recorded buy or sell, immutable once created |
//! | [`EntryDraft`] | Raw form input, validated into a [`TradeTicket`] |
//! | [`TradeAction`] | Buy or sell |
//! | [`EntryId`] | Monotonic creation-order id |
//! | [`Symbol`] | Instrument identifier, case kept as typed |
//! | [`TradeDate`] | Calendar date of the trade |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! ```rust,ignore
//! use tradejournal_core::{EntryDraft, FormField, ValidationError};
//!
//! let mut draft = EntryDraft::default();
//! draft.set(FormField::Date, "2024-05-01");
//! // symbol, action, price and quantity are still blank
//! assert!(matches!(draft.validate(), Err(ValidationError::MissingField { field: "symbol" })));
//! ```

mod dates;
mod entry;
mod symbol;

pub use dates::{TradeDate, UtcDateTime};
pub use entry::{
    EntryDraft, EntryId, FormField, JournalEntry, TradeAction, TradeTicket, MAX_QUANTITY,
};
pub use symbol::Symbol;
