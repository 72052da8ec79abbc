use rust_decimal::prelude::ToPrimitive;
use tradejournal_core::ChartRow;

const BAR_WIDTH: usize = 30;

/// Text bar chart of net quantity and average cost per symbol.
pub fn render(rows: &[ChartRow]) -> String {
    if rows.is_empty() {
        return String::from("no positions recorded");
    }

    let label_width = rows
        .iter()
        .map(|row| row.symbol.as_str().len())
        .max()
        .unwrap_or(0)
        .max("symbol".len());

    let max_quantity = rows
        .iter()
        .map(|row| row.quantity.unsigned_abs())
        .max()
        .unwrap_or(0);
    let max_cost = rows
        .iter()
        .filter_map(|row| row.average_cost.and_then(|cost| cost.abs().to_f64()))
        .fold(0.0, f64::max);

    let mut result = String::from("Quantity\n");
    result.push_str(&"-".repeat(label_width + BAR_WIDTH + 16));
    result.push('\n');
    for row in rows {
        let len = scaled(row.quantity.unsigned_abs() as f64, max_quantity as f64);
        result.push_str(&format!(
            "{:<label_width$} | {:>10} |{}\n",
            row.symbol.as_str(),
            row.quantity,
            "#".repeat(len)
        ));
    }

    result.push_str("\nAverage cost\n");
    result.push_str(&"-".repeat(label_width + BAR_WIDTH + 16));
    result.push('\n');
    for row in rows {
        let line = match row.average_cost {
            Some(cost) => {
                let len = scaled(cost.abs().to_f64().unwrap_or(0.0), max_cost);
                format!(
                    "{:<label_width$} | {:>10} |{}",
                    row.symbol.as_str(),
                    format!("${cost}"),
                    "#".repeat(len)
                )
            }
            None => format!("{:<label_width$} | {:>10} |", row.symbol.as_str(), "n/a (flat)"),
        };
        result.push_str(&line);
        result.push('\n');
    }

    result.truncate(result.trim_end().len());
    result
}

fn scaled(value: f64, max: f64) -> usize {
    if max <= 0.0 {
        return 0;
    }
    ((value / max) * BAR_WIDTH as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use tradejournal_core::Symbol;

    use super::*;

    fn row(symbol: &str, quantity: i64, average_cost: Option<rust_decimal::Decimal>) -> ChartRow {
        ChartRow {
            symbol: Symbol::parse(symbol).expect("symbol"),
            quantity,
            average_cost,
        }
    }

    #[test]
    fn largest_value_gets_full_bar() {
        let chart = render(&[row("ABC", 10, Some(dec!(15))), row("XYZ", 5, Some(dec!(30)))]);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[2], format!("ABC    |         10 |{}", "#".repeat(BAR_WIDTH)));
        assert_eq!(lines[3], format!("XYZ    |          5 |{}", "#".repeat(BAR_WIDTH / 2)));
        assert!(chart.contains(&format!("XYZ    |        $30 |{}", "#".repeat(BAR_WIDTH))));
    }

    #[test]
    fn flat_position_has_no_cost_bar() {
        let chart = render(&[row("ABC", 0, None)]);
        assert!(chart.ends_with("ABC    | n/a (flat) |"));
    }

    #[test]
    fn short_position_is_scaled_by_magnitude() {
        let chart = render(&[row("ABC", -4, Some(dec!(20))), row("XYZ", 2, Some(dec!(5)))]);
        assert!(chart.contains(&format!("ABC    |         -4 |{}", "#".repeat(BAR_WIDTH))));
    }

    #[test]
    fn negative_average_cost_is_scaled_by_magnitude() {
        let chart = render(&[row("AAA", 1, Some(dec!(-100))), row("BBB", 1, Some(dec!(10)))]);

        assert!(chart.contains(&format!("AAA    |      $-100 |{}\n", "#".repeat(BAR_WIDTH))));
        assert!(chart.ends_with(&format!("BBB    |        $10 |{}", "#".repeat(3))));
        assert!(chart
            .lines()
            .all(|line| line.matches('#').count() <= BAR_WIDTH));
    }

    #[test]
    fn empty_journal_has_placeholder() {
        assert_eq!(render(&[]), "no positions recorded");
    }
}
