//! Common types shared by every layer of the store.
//!
//! - [`Value`] - the value model documents are made of
//! - constants for the condition grammar and the backing store

mod constants;
mod value;

pub use constants::*;
pub use value::*;
