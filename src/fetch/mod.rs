// Fetch steps: each one owns a single provider request and never fails past its boundary.

pub mod details;
pub mod history;
pub mod resolver;

pub use details::VariantDetailFetcher;
pub use history::HistoricalSnapshotFetcher;
pub use resolver::VariantResolver;
