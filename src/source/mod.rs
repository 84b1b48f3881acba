pub mod client;
pub mod payload;
#[cfg(test)]
pub mod stub;
pub mod traits;

pub use client::KeepaClient;
pub use traits::{ProductQuery, ProductSource, QueryWindow};
