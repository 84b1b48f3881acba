// Analyzer module: joins current variant data with historical snapshots.

pub mod aggregator;

// Re-export the main Aggregator implementation for ease of use.
pub use aggregator::{Aggregator, AggregatorImpl, FamilySummary};
