//! Per-symbol position aggregation.
//!
//! Buys and sells are folded into separate non-negative running sums and
//! only netted at the end, so both the result and any overflow are
//! independent of entry order. Sums are kept in [`Decimal`], which is exact
//! while they stay within 28 significant digits.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{JournalEntry, Symbol, TradeAction};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("position totals for '{symbol}' exceed the representable range")]
    Overflow { symbol: Symbol },
}

/// Net position of one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSummary {
    /// Units bought, summed over all buy entries.
    pub buys: u64,
    /// Units sold, summed over all sell entries.
    pub sells: u64,
    /// `buys - sells`; negative for a net short.
    pub quantity: i64,
    /// Buy notional minus sell notional.
    pub total_cost: Decimal,
    /// `total_cost / quantity`, or `None` when the position is flat.
    pub average_cost: Option<Decimal>,
}

impl PositionSummary {
    /// True when buys and sells cancel out.
    pub fn is_flat(&self) -> bool {
        self.quantity == 0
    }
}

/// Running sums for one symbol; `None` once any of them overflowed.
#[derive(Debug, Default)]
struct Totals {
    buys: u64,
    sells: u64,
    buy_cost: Decimal,
    sell_cost: Decimal,
}

impl Totals {
    fn apply(mut self, entry: &JournalEntry) -> Option<Self> {
        let notional = entry.notional()?;
        let units = entry.quantity();

        match entry.action() {
            TradeAction::Buy => {
                self.buys = self.buys.checked_add(units)?;
                self.buy_cost = self.buy_cost.checked_add(notional)?;
            }
            TradeAction::Sell => {
                self.sells = self.sells.checked_add(units)?;
                self.sell_cost = self.sell_cost.checked_add(notional)?;
            }
        }
        Some(self)
    }

    fn finish(self) -> Option<PositionSummary> {
        let quantity = i64::try_from(i128::from(self.buys) - i128::from(self.sells)).ok()?;
        let total_cost = self.buy_cost.checked_sub(self.sell_cost)?;
        let average_cost = if quantity == 0 {
            None
        } else {
            Some(total_cost.checked_div(Decimal::from(quantity))?.normalize())
        };

        Some(PositionSummary {
            buys: self.buys,
            sells: self.sells,
            quantity,
            total_cost,
            average_cost,
        })
    }
}

/// Folds entries into per-symbol summaries, ordered by symbol.
///
/// Fails with the first symbol, in symbol order, whose totals cannot be
/// represented.
pub fn aggregate<'a, I>(entries: I) -> Result<BTreeMap<Symbol, PositionSummary>, PositionError>
where
    I: IntoIterator<Item = &'a JournalEntry>,
{
    let mut folded: BTreeMap<Symbol, Option<Totals>> = BTreeMap::new();
    let mut count = 0_usize;

    for entry in entries {
        let slot = folded
            .entry(entry.symbol().clone())
            .or_insert_with(|| Some(Totals::default()));
        *slot = slot.take().and_then(|totals| totals.apply(entry));
        count += 1;
    }

    tracing::debug!(entries = count, symbols = folded.len(), "aggregated positions");

    folded
        .into_iter()
        .map(|(symbol, totals)| match totals.and_then(Totals::finish) {
            Some(summary) => Ok((symbol, summary)),
            None => {
                tracing::warn!(symbol = %symbol, "position totals overflowed");
                Err(PositionError::Overflow { symbol })
            }
        })
        .collect()
}

/// One row of the position chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRow {
    pub symbol: Symbol,
    pub quantity: i64,
    pub average_cost: Option<Decimal>,
}

/// Flattens per-symbol summaries into chart rows, ordered by symbol.
pub fn chart_rows(summaries: &BTreeMap<Symbol, PositionSummary>) -> Vec<ChartRow> {
    summaries
        .iter()
        .map(|(symbol, summary)| ChartRow {
            symbol: symbol.clone(),
            quantity: summary.quantity,
            average_cost: summary.average_cost,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{EntryId, TradeDate, TradeTicket, UtcDateTime};

    fn entry(id: u64, symbol: &str, action: TradeAction, price: Decimal, quantity: u64) -> JournalEntry {
        let ticket = TradeTicket {
            date: TradeDate::parse("2024-01-02").expect("date"),
            symbol: Symbol::parse(symbol).expect("symbol"),
            action,
            price,
            quantity,
            notes: String::new(),
        };
        JournalEntry::new(EntryId::new(id), ticket, "", UtcDateTime::now())
    }

    #[test]
    fn single_buy_sets_quantity_and_average_cost() {
        let entries = [entry(1, "ABC", TradeAction::Buy, dec!(10), 5)];
        let summaries = aggregate(&entries).expect("aggregate");
        let abc = &summaries[&Symbol::parse("ABC").expect("symbol")];
        assert_eq!(abc.quantity, 5);
        assert_eq!(abc.average_cost, Some(dec!(10)));
    }

    #[test]
    fn flat_position_has_no_average_cost() {
        let entries = [
            entry(1, "ABC", TradeAction::Buy, dec!(10), 5),
            entry(2, "ABC", TradeAction::Sell, dec!(12), 5),
        ];
        let summaries = aggregate(&entries).expect("aggregate");
        let abc = &summaries[&Symbol::parse("ABC").expect("symbol")];
        assert_eq!((abc.buys, abc.sells, abc.quantity), (5, 5, 0));
        assert_eq!(abc.total_cost, dec!(-10));
        assert_eq!(abc.average_cost, None);
        assert!(abc.is_flat());
    }

    #[test]
    fn buys_average_to_weighted_mean_price() {
        let entries = [
            entry(1, "XYZ", TradeAction::Buy, dec!(10), 1),
            entry(2, "XYZ", TradeAction::Buy, dec!(20), 3),
        ];
        let summaries = aggregate(&entries).expect("aggregate");
        let xyz = &summaries[&Symbol::parse("XYZ").expect("symbol")];
        assert_eq!(xyz.quantity, 4);
        assert_eq!(xyz.average_cost, Some(dec!(17.5)));
    }

    #[test]
    fn net_short_divides_by_negative_quantity() {
        let entries = [
            entry(1, "ABC", TradeAction::Buy, dec!(10), 2),
            entry(2, "ABC", TradeAction::Sell, dec!(15), 4),
        ];
        let summaries = aggregate(&entries).expect("aggregate");
        let abc = &summaries[&Symbol::parse("ABC").expect("symbol")];
        assert_eq!(abc.quantity, -2);
        // (20 - 60) / -2
        assert_eq!(abc.average_cost, Some(dec!(20)));
    }

    #[test]
    fn symbols_are_case_sensitive_and_sorted() {
        let entries = [
            entry(1, "msft", TradeAction::Buy, dec!(1), 1),
            entry(2, "MSFT", TradeAction::Buy, dec!(1), 1),
            entry(3, "AAPL", TradeAction::Buy, dec!(1), 1),
        ];
        let rows = chart_rows(&aggregate(&entries).expect("aggregate"));
        let symbols: Vec<_> = rows.iter().map(|row| row.symbol.as_str()).collect();
        assert_eq!(symbols, ["AAPL", "MSFT", "msft"]);
    }

    #[test]
    fn no_entries_no_summaries() {
        assert!(aggregate(&Vec::<JournalEntry>::new())
            .expect("aggregate")
            .is_empty());
    }

    #[test]
    fn overflowing_costs_are_an_error_in_any_order() {
        let big = dec!(50000000000000000000000000000);
        let entries = [
            entry(1, "ABC", TradeAction::Buy, big, 1),
            entry(2, "ABC", TradeAction::Sell, dec!(1), 1),
            entry(3, "ABC", TradeAction::Buy, big, 1),
            entry(4, "XYZ", TradeAction::Buy, dec!(1), 1),
        ];
        let expected = Err(PositionError::Overflow {
            symbol: Symbol::parse("ABC").expect("symbol"),
        });

        assert_eq!(aggregate(&entries), expected);
        assert_eq!(aggregate(entries.iter().rev()), expected);
    }

    #[test]
    fn unit_overflow_does_not_depend_on_sell_position() {
        let max = i64::MAX as u64;
        let entries = [
            entry(1, "ABC", TradeAction::Buy, dec!(1), max),
            entry(2, "ABC", TradeAction::Sell, dec!(1), 1),
            entry(3, "ABC", TradeAction::Buy, dec!(1), 1),
        ];

        // netted only at the end, so the intermediate order never matters
        let forward = aggregate(&entries).expect("aggregate");
        let backward = aggregate(entries.iter().rev()).expect("aggregate");
        assert_eq!(forward, backward);
        assert_eq!(forward[&Symbol::parse("ABC").expect("symbol")].quantity, i64::MAX);

        let too_long = [
            entry(1, "ABC", TradeAction::Buy, dec!(1), max),
            entry(2, "ABC", TradeAction::Buy, dec!(1), 1),
        ];
        assert!(aggregate(&too_long).is_err());
    }
}
