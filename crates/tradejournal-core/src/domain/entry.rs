use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Symbol, TradeDate, UtcDateTime, ValidationError};

/// Largest quantity whose units still fit a signed net position.
pub const MAX_QUANTITY: u64 = i64::MAX as u64;

/// Side of a logged trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl Display for TradeAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeAction {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(ValidationError::InvalidAction {
                value: other.to_owned(),
            }),
        }
    }
}

/// Creation-order identifier assigned by the journal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The validated trade fields of a submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeTicket {
    pub date: TradeDate,
    pub symbol: Symbol,
    pub action: TradeAction,
    pub price: Decimal,
    pub quantity: u64,
    pub notes: String,
}

/// One logged trade. Immutable once the journal has recorded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    id: EntryId,
    date: TradeDate,
    symbol: Symbol,
    action: TradeAction,
    price: Decimal,
    quantity: u64,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    voice_input: String,
    recorded_at: UtcDateTime,
}

impl JournalEntry {
    pub fn new(
        id: EntryId,
        ticket: TradeTicket,
        voice_input: impl Into<String>,
        recorded_at: UtcDateTime,
    ) -> Self {
        let TradeTicket {
            date,
            symbol,
            action,
            price,
            quantity,
            notes,
        } = ticket;

        Self {
            id,
            date,
            symbol,
            action,
            price,
            quantity,
            notes,
            voice_input: voice_input.into(),
            recorded_at,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn date(&self) -> TradeDate {
        self.date
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn action(&self) -> TradeAction {
        self.action
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn voice_input(&self) -> &str {
        &self.voice_input
    }

    pub fn recorded_at(&self) -> UtcDateTime {
        self.recorded_at
    }

    /// Notes and voice transcript joined with a single space.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.notes, self.voice_input)
    }

    /// `quantity * price`, the cash value moved by this trade.
    ///
    /// `None` only for entries built without [`EntryDraft::validate`].
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Field of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Date,
    Symbol,
    Action,
    Price,
    Quantity,
    Notes,
}

impl FormField {
    pub const ALL: [Self; 6] = [
        Self::Date,
        Self::Symbol,
        Self::Action,
        Self::Price,
        Self::Quantity,
        Self::Notes,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Symbol => "symbol",
            Self::Action => "action",
            Self::Price => "price",
            Self::Quantity => "quantity",
            Self::Notes => "notes",
        }
    }

    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Notes)
    }
}

impl Display for FormField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| {
                format!("unknown field '{value}', expected one of date, symbol, action, price, quantity, notes")
            })
    }
}

/// Raw, unvalidated form input.
///
/// Numeric fields may be given as numbers or strings when deserialized from
/// JSON/YAML; they are kept as text until [`EntryDraft::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryDraft {
    #[serde(deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub symbol: String,
    #[serde(deserialize_with = "lenient_text")]
    pub action: String,
    #[serde(deserialize_with = "lenient_text")]
    pub price: String,
    #[serde(deserialize_with = "lenient_text")]
    pub quantity: String,
    #[serde(deserialize_with = "lenient_text")]
    pub notes: String,
}

impl EntryDraft {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Symbol => &self.symbol,
            FormField::Action => &self.action,
            FormField::Price => &self.price,
            FormField::Quantity => &self.quantity,
            FormField::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Date => self.date = value,
            FormField::Symbol => self.symbol = value,
            FormField::Action => self.action = value,
            FormField::Price => self.price = value,
            FormField::Quantity => self.quantity = value,
            FormField::Notes => self.notes = value,
        }
    }

    /// First required field left blank, in form order.
    pub fn missing_field(&self) -> Option<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .find(|field| self.field(*field).trim().is_empty())
    }

    /// Checks presence of required fields, then parses each one.
    pub fn validate(&self) -> Result<TradeTicket, ValidationError> {
        if let Some(field) = self.missing_field() {
            return Err(ValidationError::MissingField {
                field: field.as_str(),
            });
        }

        let date = TradeDate::parse(&self.date)?;
        let symbol = Symbol::parse(&self.symbol)?;
        let action = self.action.parse()?;
        let price = parse_price(&self.price)?;
        let quantity = parse_quantity(&self.quantity)?;
        if price.checked_mul(Decimal::from(quantity)).is_none() {
            return Err(ValidationError::NotionalTooLarge {
                price: price.to_string(),
                quantity,
            });
        }

        Ok(TradeTicket {
            date,
            symbol,
            action,
            price,
            quantity,
            notes: self.notes.clone(),
        })
    }
}

fn parse_price(input: &str) -> Result<Decimal, ValidationError> {
    let price = Decimal::from_str(input.trim()).map_err(|_| ValidationError::InvalidPrice {
        value: input.to_owned(),
    })?;
    if price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice);
    }
    Ok(price.normalize())
}

fn parse_quantity(input: &str) -> Result<u64, ValidationError> {
    let quantity = input
        .trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidQuantity {
            value: input.to_owned(),
        })?;
    if quantity == 0 {
        return Err(ValidationError::ZeroQuantity);
    }
    if quantity > MAX_QUANTITY {
        return Err(ValidationError::QuantityTooLarge {
            value: quantity,
            max: MAX_QUANTITY,
        });
    }
    Ok(quantity)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawField {
        Text(String),
        Integer(i64),
        Float(f64),
        Missing(()),
    }

    Ok(match RawField::deserialize(deserializer)? {
        RawField::Text(text) => text,
        RawField::Integer(value) => value.to_string(),
        RawField::Float(value) => value.to_string(),
        RawField::Missing(()) => String::new(),
    })
}
