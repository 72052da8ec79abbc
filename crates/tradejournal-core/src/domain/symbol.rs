use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Instrument identifier as typed by the trader.
///
/// Surrounding whitespace is trimmed but case is kept as-is, so `abc` and
/// `ABC` are distinct positions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let len = trimmed.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some(index) = trimmed.chars().position(char::is_whitespace) {
            return Err(ValidationError::SymbolContainsWhitespace { index });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_but_keeps_case() {
        let parsed = Symbol::parse(" aapl ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "aapl");
        assert_ne!(parsed, Symbol::parse("AAPL").expect("symbol should parse"));
    }

    #[test]
    fn rejects_blank_symbol() {
        let err = Symbol::parse("   ").expect_err("must fail");
        assert_eq!(err, ValidationError::EmptySymbol);
    }

    #[test]
    fn rejects_interior_whitespace() {
        let err = Symbol::parse("BRK B").expect_err("must fail");
        assert_eq!(err, ValidationError::SymbolContainsWhitespace { index: 3 });
    }

    #[test]
    fn rejects_overlong_symbol() {
        let err = Symbol::parse("ABCDEFGHIJKLMNOP").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolTooLong { len: 16, .. }));
    }
}
