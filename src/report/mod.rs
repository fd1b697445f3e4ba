//! Aggregation and line rendering for both tools.

pub mod disk;
pub mod memory;
