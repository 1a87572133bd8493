//! Cart
//!
//! The [`Cart`] entity and its reducer. [`Cart::apply`] is the only way the
//! line list changes; it has no storage dependency.

use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    items::{CartLine, NewCartLine},
    pricing::{item_count, total_price},
};

/// Errors raised when a list of lines breaks a cart invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Two lines share the same id.
    #[error("duplicate line for id {0}")]
    DuplicateLine(String),

    /// A line has a quantity of zero.
    #[error("line {0} has a quantity of zero")]
    ZeroQuantity(String),

    /// A line has a negative unit price.
    #[error("line {0} has a negative price")]
    NegativePrice(String),
}

/// A state transition for a [`Cart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of an item, inserting a line if the id is new. Items with
    /// a negative unit price are ignored.
    AddItem(NewCartLine),

    /// Delete the line with this id.
    RemoveItem(String),

    /// Replace a line's quantity. Zero or negative removes the line.
    UpdateQuantity {
        /// Line id
        id: String,

        /// New quantity
        quantity: i64,
    },

    /// Remove every line.
    Clear,
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create a new, empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from previously stored lines.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the lines contain a duplicate id, a zero
    /// quantity or a negative price.
    pub fn try_from_lines(lines: impl Into<Vec<CartLine>>) -> Result<Self, CartError> {
        let lines = lines.into();
        let mut seen = HashSet::with_capacity(lines.len());

        lines.iter().try_for_each(|line| {
            if !seen.insert(line.id.as_str()) {
                return Err(CartError::DuplicateLine(line.id.clone()));
            }

            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.id.clone()));
            }

            if line.unit_price < Decimal::ZERO {
                return Err(CartError::NegativePrice(line.id.clone()));
            }

            Ok(())
        })?;

        Ok(Self { lines })
    }

    /// Apply an action to the cart, returning `true` if the lines changed.
    pub fn apply(&mut self, action: CartAction) -> bool {
        match action {
            CartAction::AddItem(item) => self.add_item(item),
            CartAction::RemoveItem(id) => self.remove_item(&id),
            CartAction::UpdateQuantity { id, quantity } => self.update_quantity(&id, quantity),
            CartAction::Clear => self.clear(),
        }
    }

    fn add_item(&mut self, item: NewCartLine) -> bool {
        if item.unit_price < Decimal::ZERO {
            return false;
        }

        match self.lines.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::from_new(item)),
        }

        true
    }

    fn remove_item(&mut self, id: &str) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.id != id);

        self.lines.len() != before
    }

    fn update_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        match self.lines.iter_mut().find(|line| line.id == id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            Some(_) | None => false,
        }
    }

    fn clear(&mut self) -> bool {
        let changed = !self.lines.is_empty();

        self.lines.clear();

        changed
    }

    /// Get the lines in the cart, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line with the given id.
    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Sum of unit price × quantity over all lines.
    pub fn total(&self) -> Decimal {
        total_price(&self.lines)
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        item_count(&self.lines)
    }

    /// Get the number of distinct lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
