//! jsondb Benchmark Library
//!
//! Data generators and database factories shared by the benchmarks.

pub mod data_gen;
pub mod stores;
