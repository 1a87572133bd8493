//! Order summary

use std::io;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, settings::Settings};

/// Errors that can occur when building or rendering an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// An amount is too large to represent.
    #[error("amount out of range: {0}")]
    AmountOutOfRange(Decimal),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Amounts due for a cart at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    subtotal: Decimal,
    shipping: Decimal,
    tax: Decimal,
    total: Decimal,
    item_count: u64,
    currency: &'static Currency,
}

impl OrderSummary {
    /// Build the summary for `cart`.
    ///
    /// Tax is charged on the subtotal only and rounded to the cent, midpoint
    /// away from zero.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::AmountOutOfRange`] if an amount overflows.
    pub fn for_cart(cart: &Cart, settings: &Settings) -> Result<Self, SummaryError> {
        let subtotal = cart.total();

        let tax = (settings.tax_rate * Decimal::ONE)
            .checked_mul(subtotal)
            .ok_or(SummaryError::AmountOutOfRange(subtotal))?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let total = subtotal
            .checked_add(settings.shipping)
            .and_then(|value| value.checked_add(tax))
            .ok_or(SummaryError::AmountOutOfRange(subtotal))?;

        Ok(Self {
            subtotal,
            shipping: settings.shipping,
            tax,
            total,
            item_count: cart.item_count(),
            currency: settings.currency,
        })
    }

    /// Cart total before shipping and tax
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Shipping charge
    pub fn shipping(&self) -> Decimal {
        self.shipping
    }

    /// Tax charged on the subtotal
    pub fn tax(&self) -> Decimal {
        self.tax
    }

    /// Amount due
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Number of units ordered
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Currency used to display amounts
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the cart lines and the amounts due.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be displayed or writing fails.
    pub fn write_to(&self, mut out: impl io::Write, cart: &Cart) -> Result<(), SummaryError> {
        write_cart_table(&mut out, cart, self.currency)?;

        let shipping = if self.shipping.is_zero() {
            "Free".to_string()
        } else {
            format_amount(self.shipping, self.currency)?
        };

        let rows = [
            (" Subtotal:", format_amount(self.subtotal, self.currency)?),
            (" Shipping:", shipping),
            (" Tax:", format_amount(self.tax, self.currency)?),
            (" Total:", format_amount(self.total, self.currency)?),
        ];

        write_summary_lines(&mut out, &rows)
    }
}

/// Writes a table of the cart lines followed by the subtotal and item count.
///
/// # Errors
///
/// Returns an error if an amount cannot be displayed or writing fails.
pub fn write_cart(
    mut out: impl io::Write,
    cart: &Cart,
    currency: &'static Currency,
) -> Result<(), SummaryError> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty").map_err(|_err| SummaryError::IO);
    }

    write_cart_table(&mut out, cart, currency)?;

    let rows = [
        (" Items:", cart.item_count().to_string()),
        (" Subtotal:", format_amount(cart.total(), currency)?),
    ];

    write_summary_lines(&mut out, &rows)
}

/// Convert a decimal amount to money, rounding to minor units.
///
/// # Errors
///
/// Returns [`SummaryError::AmountOutOfRange`] if the amount does not fit in
/// minor units.
pub fn to_money(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, SummaryError> {
    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| {
            value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .ok_or(SummaryError::AmountOutOfRange(amount))?;

    Ok(Money::from_minor(minor_units, currency))
}

fn format_amount(amount: Decimal, currency: &'static Currency) -> Result<String, SummaryError> {
    Ok(to_money(amount, currency)?.to_string())
}

fn write_cart_table(
    out: &mut impl io::Write,
    cart: &Cart,
    currency: &'static Currency,
) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Unit Price", "Line Total"]);

    for line in cart.lines() {
        builder.push_record([
            line.name.clone(),
            line.quantity.to_string(),
            format_amount(line.unit_price, currency)?,
            format_amount(line.line_total(), currency)?,
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..4), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)
}

/// Writes label/value pairs with right-aligned labels and values.
fn write_summary_lines(
    out: &mut impl io::Write,
    rows: &[(&str, String)],
) -> Result<(), SummaryError> {
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, "{label:>label_width$}  {value:>value_width$}")
            .map_err(|_err| SummaryError::IO)?;
    }

    writeln!(out).map_err(|_err| SummaryError::IO)
}
