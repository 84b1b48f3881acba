// Core structs: Asin, VariantRecord, HistoricalSnapshot, AggregatedVariant
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Base URL for product images, keyed by the asset ids from `imagesCSV`.
pub const IMAGE_BASE_URL: &str = "https://images-na.ssl-images-amazon.com/images/I";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asin(pub String);

impl Asin {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Asin {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Asin {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Current state of one variant, normalized from a provider product entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    pub asin: Asin,
    pub images: Vec<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Current price in cents for every offer that reported one, in offer order.
    pub offer_prices: Vec<i64>,
    pub offer_count: usize,
    /// Cheapest current offer in dollars, two decimals. `None` iff there are no offers.
    pub lowest_price: Option<String>,
    pub total_ratings: i64,
    pub total_reviews: i64,
    pub monthly_sales: Option<i64>,
    pub rating_history: Vec<i64>,
    pub review_history: Vec<i64>,
}

impl VariantRecord {
    pub fn primary_image_url(&self) -> Option<String> {
        self.images
            .first()
            .map(|id| format!("{}/{}.jpg", IMAGE_BASE_URL, id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalSnapshot {
    pub asin: Asin,
    pub last_month_ratings: i64,
    pub last_month_reviews: i64,
}

/// A variant record joined with its month-ago snapshot.
///
/// The differences are `None` when no snapshot was found for the variant:
/// the baseline is unknown, so no delta is reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedVariant {
    #[serde(flatten)]
    pub record: VariantRecord,
    pub rating_difference: Option<i64>,
    pub review_difference: Option<i64>,
}

/// Result of one fetch step.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Fetched(Vec<T>),
    /// Nothing to ask for; no request was issued.
    Skipped,
    Failed(FetchError),
}

impl<T> FetchOutcome<T> {
    pub fn items(&self) -> &[T] {
        match self {
            FetchOutcome::Fetched(items) => items,
            FetchOutcome::Skipped | FetchOutcome::Failed(_) => &[],
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            FetchOutcome::Fetched(items) => items,
            FetchOutcome::Skipped | FetchOutcome::Failed(_) => Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider responded [{status}]: {body}")]
    Status { status: u16, body: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("product {0} missing from response")]
    MissingProduct(Asin),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing config value: {0}")]
    Missing(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("pipeline cancelled")]
    Cancelled,
}
