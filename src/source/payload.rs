// Keepa product endpoint response shapes.
//
// Per-product fields fall back to their default when absent or of the wrong
// type; only a malformed top level fails the whole response. Defaults are
// interpreted where the value is consumed, not here.
use crate::timeseries::TimeSeries;
use serde::Deserialize;
use serde_with::{DefaultOnError, serde_as};

#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Entries that are not product objects become empty products.
    #[serde_as(deserialize_as = "Vec<DefaultOnError>")]
    #[serde(default)]
    pub products: Vec<RawProduct>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub tokens_left: Option<i64>,
    pub error: Option<RawApiError>,
}

impl ProductResponse {
    pub fn products(self) -> Vec<RawProduct> {
        self.products
    }
}

#[derive(Debug, Deserialize)]
pub struct RawApiError {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
}

impl RawApiError {
    pub fn describe(&self) -> String {
        match (&self.kind, &self.message) {
            (Some(kind), Some(message)) => format!("{}: {}", kind, message),
            (Some(kind), None) => kind.clone(),
            (None, Some(message)) => message.clone(),
            (None, None) => "unspecified error".to_string(),
        }
    }
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub asin: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, rename = "imagesCSV")]
    pub images_csv: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub size: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub color: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError<Option<Vec<DefaultOnError>>>")]
    #[serde(default)]
    pub offers: Option<Vec<RawOffer>>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub reviews: Option<RawReviews>,
    #[serde_as(deserialize_as = "DefaultOnError<Option<Vec<DefaultOnError>>>")]
    #[serde(default)]
    pub variations: Option<Vec<RawVariation>>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub monthly_sold: Option<i64>,
}

impl RawProduct {
    /// The ASIN, if present and non-empty.
    pub fn asin(&self) -> Option<&str> {
        self.asin.as_deref().filter(|a| !a.is_empty())
    }

    pub fn rating_series(&self) -> TimeSeries {
        self.reviews
            .as_ref()
            .and_then(|r| r.rating_count.clone())
            .unwrap_or_default()
    }

    pub fn review_series(&self) -> TimeSeries {
        self.reviews
            .as_ref()
            .and_then(|r| r.review_count.clone())
            .unwrap_or_default()
    }
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RawOffer {
    /// Repeating (keepa-time, price, shipping) triples.
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, rename = "offerCSV")]
    pub offer_csv: Option<Vec<i64>>,
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReviews {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub rating_count: Option<TimeSeries>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub review_count: Option<TimeSeries>,
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RawVariation {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub asin: Option<String>,
}
