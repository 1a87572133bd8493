//! Cart store
//!
//! [`CartStore`] owns the in-memory [`Cart`] and writes a snapshot to its
//! [`KeyValueStore`] after every mutation. Storage failures are logged and
//! swallowed: the in-memory cart stays the source of truth until the next
//! successful write.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::{Cart, CartAction},
    items::{CartLine, NewCartLine},
    settings::Settings,
    snapshot::{self, CART_STORAGE_KEY},
    storage::KeyValueStore,
    summary::{OrderSummary, SummaryError},
};

/// Errors raised by [`CartStore::checkout`].
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to check out.
    #[error("cart is empty")]
    EmptyCart,

    /// The order summary could not be calculated.
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Holds the shopper's cart and keeps it synchronised with storage.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
    cart: Cart,
    storage: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open a store, hydrating the cart from `storage`.
    ///
    /// A missing, unreadable or malformed snapshot yields an empty cart.
    pub fn open(storage: S) -> Self {
        let cart = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(value)) => snapshot::decode(&value).unwrap_or_else(|error| {
                warn!(%error, "discarding stored cart");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!(%error, "failed to read stored cart");
                Cart::new()
            }
        };

        debug!(lines = cart.len(), "opened cart store");

        Self { cart, storage }
    }

    /// Apply an action and persist the result, returning `true` if the lines
    /// changed.
    pub fn dispatch(&mut self, action: CartAction) -> bool {
        debug!(?action, "applying cart action");

        let changed = self.cart.apply(action);

        debug!(changed, lines = self.cart.len(), "applied cart action");

        self.persist();

        changed
    }

    /// Add one unit of `item`, inserting a new line if its id is not present.
    ///
    /// Items with a negative unit price are rejected and logged.
    pub fn add_item(&mut self, item: NewCartLine) {
        let id = item.id.clone();
        let price = item.unit_price;

        if !self.dispatch(CartAction::AddItem(item)) {
            warn!(%id, %price, "rejected item with negative price");
        }
    }

    /// Alias of [`CartStore::add_item`].
    pub fn add_to_cart(&mut self, item: NewCartLine) {
        self.add_item(item);
    }

    /// Remove the line with `id`, if present.
    pub fn remove_item(&mut self, id: &str) {
        self.dispatch(CartAction::RemoveItem(id.to_string()));
    }

    /// Set the quantity of the line with `id`. Zero or negative removes it.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        self.dispatch(CartAction::UpdateQuantity {
            id: id.to_string(),
            quantity,
        });
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    /// Summarise the cart for an order, then clear it.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy, or
    /// [`CheckoutError::Summary`] if the summary cannot be calculated. The
    /// cart is left untouched on error.
    pub fn checkout(&mut self, settings: &Settings) -> Result<OrderSummary, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let summary = OrderSummary::for_cart(&self.cart, settings)?;

        info!(
            lines = self.cart.len(),
            items = self.cart.item_count(),
            total = %summary.total(),
            "checked out cart"
        );

        self.clear_cart();

        Ok(summary)
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The current lines.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Sum of unit price × quantity.
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Consume the store, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) {
        let value = match snapshot::encode(&self.cart) {
            Ok(value) => value,
            Err(error) => {
                warn!(%error, "failed to encode cart");
                return;
            }
        };

        if let Err(error) = self.storage.set(CART_STORAGE_KEY, &value) {
            warn!(%error, "failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use crate::storage::{MemoryStore, MockKeyValueStore, StorageError};

    use super::*;

    fn item(id: &str, price: Decimal) -> NewCartLine {
        NewCartLine::new(id, id.to_uppercase(), price, "")
    }

    fn io_error() -> StorageError {
        StorageError::Io(std::io::Error::other("disk unavailable"))
    }

    #[test]
    fn opens_empty_when_nothing_stored() {
        let store = CartStore::open(MemoryStore::new());

        assert!(store.cart().is_empty());
    }

    #[test]
    fn opens_empty_when_snapshot_is_corrupt() {
        let store = CartStore::open(MemoryStore::with_value(CART_STORAGE_KEY, "{oops"));

        assert!(store.cart().is_empty());
        assert_eq!(store.total(), Decimal::ZERO);
    }

    #[test]
    fn opens_empty_when_storage_read_fails() {
        let mut storage = MockKeyValueStore::new();
        storage
            .expect_get()
            .withf(|key| key == CART_STORAGE_KEY)
            .times(1)
            .returning(|_| Err(io_error()));

        let store = CartStore::open(storage);

        assert!(store.cart().is_empty());
    }

    #[test]
    fn hydrates_from_stored_snapshot() -> TestResult {
        let stored = r#"[{"id":"a","name":"A","price":2.5,"image":"","quantity":4}]"#;

        let store = CartStore::open(MemoryStore::with_value(CART_STORAGE_KEY, stored));

        assert_eq!(store.item_count(), 4);
        assert_eq!(store.total(), dec!(10));
        assert_eq!(store.lines().first().ok_or("missing line")?.name, "A");

        Ok(())
    }

    #[test]
    fn every_mutation_writes_a_snapshot() -> TestResult {
        let mut store = CartStore::open(MemoryStore::new());

        store.add_item(item("a", dec!(1)));
        let storage = store.into_storage();
        assert!(storage.get(CART_STORAGE_KEY)?.is_some_and(|v| v.contains("\"a\"")));

        let mut store = CartStore::open(storage);
        store.remove_item("missing");
        store.clear_cart();
        let storage = store.into_storage();

        assert_eq!(storage.get(CART_STORAGE_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn negative_price_does_not_poison_stored_cart() {
        let mut store = CartStore::open(MemoryStore::new());
        store.add_item(item("good", dec!(10)));
        store.add_item(item("refund", dec!(-1)));

        assert_eq!(store.lines().len(), 1);

        let reopened = CartStore::open(store.into_storage());

        assert_eq!(reopened.lines().len(), 1);
        assert!(reopened.cart().get("good").is_some());
        assert_eq!(reopened.total(), dec!(10));
    }

    #[test]
    fn write_failures_keep_in_memory_state() {
        let mut storage = MockKeyValueStore::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .times(3)
            .returning(|_, _| Err(io_error()));

        let mut store = CartStore::open(storage);
        store.add_item(item("a", dec!(10)));
        store.add_item(item("a", dec!(10)));
        store.update_quantity("a", 3);

        assert_eq!(store.total(), dec!(30));
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn writes_are_whole_cart_replacements() {
        let mut storage = MockKeyValueStore::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .withf(|key, value| {
                key == CART_STORAGE_KEY && value.starts_with('[') && value.ends_with(']')
            })
            .times(2)
            .returning(|_, _| Ok(()));

        let mut store = CartStore::open(storage);
        store.add_item(item("a", dec!(1)));
        store.add_to_cart(item("b", dec!(2)));

        assert_eq!(store.lines().len(), 2);
    }

    #[test]
    fn checkout_summarises_then_clears() -> TestResult {
        let mut store = CartStore::open(MemoryStore::new());
        store.add_item(item("a", dec!(10)));
        store.add_item(item("a", dec!(10)));

        let summary = store.checkout(&Settings::default())?;

        assert_eq!(summary.subtotal(), dec!(20));
        assert_eq!(summary.tax(), dec!(2.00));
        assert_eq!(summary.total(), dec!(22.00));
        assert!(store.cart().is_empty());

        let storage = store.into_storage();
        assert_eq!(storage.get(CART_STORAGE_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn checkout_rejects_empty_cart() {
        let mut store = CartStore::open(MemoryStore::new());

        let result = store.checkout(&Settings::default());

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }
}
