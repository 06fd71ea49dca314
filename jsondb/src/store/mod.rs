//! Persistence adapters.
//!
//! The document store hands its whole collection to a [`StoreProvider`]
//! on commit and close, and reads it back on open and rollback. Two
//! providers ship with the crate:
//!
//! - [`JsonFileStore`] keeps the collection in one JSON file
//! - [`InMemoryStore`] keeps it in memory, for tests and scratch databases

mod codec;
mod file;
mod memory;
mod store_provider;

pub use codec::SaveOptions;
pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use store_provider::*;
