use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

pub const SCHEMA_VERSION: &str = "v1.0.0";

/// Standard response envelope for all `tradejournal` machine-readable outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self {
            meta,
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(
        meta: EnvelopeMeta,
        data: T,
        errors: Vec<EnvelopeError>,
    ) -> Result<Self, ValidationError> {
        meta.validate()?;
        for error in &errors {
            error.validate()?;
        }

        Ok(Self { meta, data, errors })
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub schema_version: String,
    pub command: String,
    pub generated_at: UtcDateTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        schema_version: impl Into<String>,
        command: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let meta = Self {
            request_id: request_id.into(),
            schema_version: schema_version.into(),
            command: command.into(),
            generated_at: UtcDateTime::now(),
            warnings: Vec::new(),
        };
        meta.validate()?;
        Ok(meta)
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_id.trim().len() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }

        if !is_valid_schema_version(&self.schema_version) {
            return Err(ValidationError::InvalidSchemaVersion {
                value: self.schema_version.clone(),
            });
        }

        Ok(())
    }
}

/// Structured error payload for partial or failed responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    /// Position of the offending record in a batch input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl EnvelopeError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let error = Self {
            code: code.into(),
            message: message.into(),
            index: None,
        };
        error.validate()?;
        Ok(error)
    }

    /// Envelope form of a rejected record.
    pub fn rejected(index: usize, error: &ValidationError) -> Self {
        Self {
            code: String::from(error_code(error)),
            message: error.to_string(),
            index: Some(index),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyErrorCode);
        }

        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyErrorMessage);
        }

        Ok(())
    }
}

/// Stable machine-readable code for a validation failure.
pub fn error_code(error: &ValidationError) -> &'static str {
    match error {
        ValidationError::MissingField { .. } => "missing_field",
        ValidationError::EmptySymbol
        | ValidationError::SymbolTooLong { .. }
        | ValidationError::SymbolContainsWhitespace { .. } => "invalid_symbol",
        ValidationError::InvalidDate { .. } | ValidationError::TimestampNotUtc { .. } => {
            "invalid_date"
        }
        ValidationError::InvalidAction { .. } => "invalid_action",
        ValidationError::InvalidPrice { .. } | ValidationError::NonPositivePrice => "invalid_price",
        ValidationError::InvalidQuantity { .. }
        | ValidationError::ZeroQuantity
        | ValidationError::QuantityTooLarge { .. } => "invalid_quantity",
        ValidationError::NotionalTooLarge { .. } => "notional_too_large",
        ValidationError::EmptyLexiconWord
        | ValidationError::LexiconWordNotToken { .. }
        | ValidationError::LexiconOverlap { .. } => "invalid_lexicon",
        ValidationError::InvalidRequestId
        | ValidationError::InvalidSchemaVersion { .. }
        | ValidationError::EmptyErrorCode
        | ValidationError::EmptyErrorMessage => "invalid_envelope",
    }
}

fn is_valid_schema_version(value: &str) -> bool {
    let Some(version) = value.strip_prefix('v') else {
        return false;
    };

    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_meta() {
        let meta = EnvelopeMeta::new("request-12345", SCHEMA_VERSION, "sentiment")
            .expect("meta should be valid");
        assert_eq!(meta.schema_version, "v1.0.0");
        assert_eq!(meta.command, "sentiment");
    }

    #[test]
    fn rejects_bad_schema_version() {
        let err = EnvelopeMeta::new("request-12345", "1.0.0", "positions").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidSchemaVersion { .. }));
    }

    #[test]
    fn rejects_short_request_id() {
        let err = EnvelopeMeta::new("req", SCHEMA_VERSION, "positions").expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidRequestId);
    }

    #[test]
    fn rejects_empty_error_code() {
        let err = EnvelopeError::new("", "message").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyErrorCode));
    }

    #[test]
    fn rejected_record_carries_index_and_code() {
        let error = EnvelopeError::rejected(3, &ValidationError::ZeroQuantity);
        assert_eq!(error.code, "invalid_quantity");
        assert_eq!(error.index, Some(3));
        assert!(error.validate().is_ok());
    }

    #[test]
    fn omits_empty_errors_when_serialized() {
        let meta = EnvelopeMeta::new("request-12345", SCHEMA_VERSION, "lexicon").expect("meta");
        let envelope = Envelope::success(meta, serde_json::json!({"ok": true}));
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert!(value.get("errors").is_none());
        assert_eq!(value["data"]["ok"], true);
    }
}
