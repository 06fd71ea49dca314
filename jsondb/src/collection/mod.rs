//! Documents and write results.
//!
//! A [`Document`] is a key-value map where keys are strings and values are
//! [`Value`](crate::common::Value)s, including nested documents and arrays.
//!
//! ```rust
//! use jsondb::collection::Document;
//!
//! let mut doc = Document::new();
//! doc.put("name", "Alice").unwrap();
//! doc.put("age", 30).unwrap();
//! assert_eq!(doc.size(), 2);
//! ```
//!
//! Every mutating store operation reports a [`WriteResult`].

mod document;
mod write_result;

pub use document::*;
pub use write_result::*;
