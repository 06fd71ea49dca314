//! The condition grammar and the filter engine.
//!
//! A condition is itself a [`Document`](crate::collection::Document):
//!
//! - `{}` matches every document
//! - `{"name": "Alice", "age": 30}` matches documents holding every pair
//! - `{"$lt": {"age": 30}}` compares fields against thresholds; the
//!   operators are `$lt`, `$lte`, `$gt` and `$gte`
//!
//! [`compile`] turns a condition into a [`Filter`];
//! [`filter_documents`] runs a condition over an ordered slice of
//! documents and returns a [`MatchResult`].
//!
//! ```rust
//! use jsondb::doc;
//! use jsondb::filter::filter_documents;
//!
//! let docs = vec![doc! { age: 20 }, doc! { age: 40 }];
//! let young = filter_documents(&doc! { "$lt": { age: 30 } }, &docs, false).unwrap();
//! assert_eq!(young.count(), 1);
//! ```

mod filter;

mod basic_filters;
mod range_filters;
mod scan;

pub(crate) use basic_filters::*;
pub use filter::*;
pub use range_filters::ComparisonMode;
pub(crate) use range_filters::ComparisonFilter;
pub use scan::MatchResult;
pub use scan::filter_documents;
pub(crate) use scan::{first_position, matching_positions};
