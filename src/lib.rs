//! Aggregation and ranking engine behind the laptop specification
//! dashboard: load a laptop table once, then answer per-page requests
//! (group means, frequency counts, top-N rankings, filtered views).

pub mod config;
pub mod data;
pub mod pages;
pub mod report;
pub mod state;
