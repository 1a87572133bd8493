//! Trolley
//!
//! Trolley is a shopping cart store: a pure cart reducer with derived totals,
//! persisted as a JSON snapshot in a pluggable key-value store after every
//! mutation.

pub mod cart;
pub mod items;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod settings;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod summary;
