//! Pricing

use rust_decimal::Decimal;

use crate::items::CartLine;

/// Calculates the total price of a list of lines: Σ(unit price × quantity).
///
/// An empty list totals zero.
pub fn total_price(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.line_total()))
}

/// Counts the units across a list of lines: Σ quantity.
pub fn item_count(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}
