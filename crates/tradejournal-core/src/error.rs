use thiserror::Error;

/// Validation and contract errors exposed by `tradejournal-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' is required")]
    MissingField { field: &'static str },

    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains whitespace at index {index}")]
    SymbolContainsWhitespace { index: usize },

    #[error("date must be a calendar date (YYYY-MM-DD): '{value}'")]
    InvalidDate { value: String },
    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("invalid action '{value}', expected one of buy, sell")]
    InvalidAction { value: String },
    #[error("price must be a decimal number: '{value}'")]
    InvalidPrice { value: String },
    #[error("price must be greater than zero")]
    NonPositivePrice,
    #[error("quantity must be a whole number of units: '{value}'")]
    InvalidQuantity { value: String },
    #[error("quantity must be greater than zero")]
    ZeroQuantity,
    #[error("quantity {value} exceeds max {max}")]
    QuantityTooLarge { value: u64, max: u64 },
    #[error("price {price} times quantity {quantity} is too large to represent")]
    NotionalTooLarge { price: String, quantity: u64 },

    #[error("lexicon word cannot be empty")]
    EmptyLexiconWord,
    #[error("lexicon word '{word}' contains non-word characters")]
    LexiconWordNotToken { word: String },
    #[error("lexicon word '{word}' appears in both the positive and negative lists")]
    LexiconOverlap { word: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}
