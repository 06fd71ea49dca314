//! # jsondb - Embedded JSON Document Store
//!
//! jsondb keeps one ordered collection of schema-less JSON documents in a
//! single file and gives create/read/update/delete access to it through a
//! small condition language.
//!
//! ## Key Features
//!
//! - **Embedded**: the whole collection lives in memory, one file on disk
//! - **Conditions**: direct matches and `$lt`/`$lte`/`$gt`/`$gte` comparisons,
//!   each with an inverted form
//! - **Explicit persistence**: `commit`, `rollback` and `close` decide when
//!   the file changes
//! - **Pluggable storage**: a JSON file by default, any [StoreProvider](store::StoreProvider)
//!   otherwise
//!
//! ## Quick Start
//!
//! ```rust
//! use jsondb::doc;
//! use jsondb::jsondb::JsonDb;
//!
//! # fn main() -> jsondb::errors::JsonDbResult<()> {
//! # let dir = tempfile::tempdir().unwrap();
//! # let path = dir.path().join("people");
//! let mut db = JsonDb::builder().file_path(&path).open_or_create()?;
//!
//! db.insert_one(doc! { name: "Alice", age: 31 })?;
//! db.insert_one(doc! { name: "Bob", age: 17 })?;
//!
//! let adults = db.find(&doc! { "$gte": { age: 18 } }, false)?;
//! assert_eq!(adults.count(), 1);
//!
//! db.delete_many(&doc! { name: "Bob" })?;
//! db.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [collection]: documents and write results
//! - [common]: the value model and shared constants
//! - [errors]: error type and kinds
//! - [filter]: condition grammar and the filter engine
//! - [store]: persistence adapters
//! - [jsondb], [jsondb_builder], [jsondb_config]: the database itself

pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod jsondb;
pub mod jsondb_builder;
pub mod jsondb_config;
pub mod store;

pub use crate::jsondb::{ConnectionState, JsonDb};
pub use crate::jsondb_builder::JsonDbBuilder;
