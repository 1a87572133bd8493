//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartAction, CartError},
    items::{CartLine, NewCartLine},
    settings::{Settings, SettingsError},
    snapshot::{CART_STORAGE_KEY, SnapshotError},
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
    store::{CartStore, CheckoutError},
    summary::{OrderSummary, SummaryError},
};
