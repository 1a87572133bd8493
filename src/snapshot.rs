//! Snapshot
//!
//! A cart is stored as a JSON array of lines under [`CART_STORAGE_KEY`].

use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    items::CartLine,
};

/// Key under which the cart snapshot is stored.
pub const CART_STORAGE_KEY: &str = "cart";

/// Errors encoding or decoding a cart snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot is not a JSON array of cart lines.
    #[error("malformed cart snapshot")]
    Json(#[from] serde_json::Error),

    /// The snapshot parsed but its lines break a cart invariant.
    #[error(transparent)]
    InvalidCart(#[from] CartError),
}

/// Serialize a cart to its stored JSON form.
///
/// # Errors
///
/// Returns a [`SnapshotError::Json`] if serialization fails.
pub fn encode(cart: &Cart) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(cart.lines())?)
}

/// Rebuild a cart from its stored JSON form.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if the value is not a JSON array of lines or
/// if the lines break a cart invariant.
pub fn decode(value: &str) -> Result<Cart, SnapshotError> {
    let lines: Vec<CartLine> = serde_json::from_str(value)?;

    Ok(Cart::try_from_lines(lines)?)
}
