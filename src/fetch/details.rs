use crate::config::AppConfig;
use crate::model::{Asin, FetchError, FetchOutcome, VariantRecord};
use crate::normalizer::normalize_product;
use crate::source::{ProductQuery, ProductSource, QueryWindow};

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Batch-fetches current data for a set of variants.
pub struct VariantDetailFetcher {
    source: Arc<dyn ProductSource>,
    offers: u32,
}

impl VariantDetailFetcher {
    pub fn new(source: Arc<dyn ProductSource>, config: &AppConfig) -> Self {
        Self {
            source,
            offers: config.offers,
        }
    }

    /// One record per distinct ASIN in the response, in first-seen order.
    pub async fn fetch_details(&self, asins: &[Asin]) -> FetchOutcome<VariantRecord> {
        if asins.is_empty() {
            return FetchOutcome::Skipped;
        }

        match self.try_fetch(asins).await {
            Ok(records) => {
                info!("Fetched details for {} variant(s)", records.len());
                FetchOutcome::Fetched(records)
            }
            Err(e) => {
                warn!("Error fetching data for ASINs {}: {}", join(asins), e);
                FetchOutcome::Failed(e)
            }
        }
    }

    async fn try_fetch(&self, asins: &[Asin]) -> Result<Vec<VariantRecord>, FetchError> {
        let query = ProductQuery::new(asins.to_vec(), QueryWindow::Offers(self.offers));
        let response = self.source.fetch(&query).await?;

        let mut records: IndexMap<Asin, VariantRecord> = IndexMap::new();
        for product in response.products() {
            let Some(asin) = product.asin() else {
                continue;
            };
            if records.contains_key(asin) {
                debug!("Dropping duplicate entry for {}", asin);
                continue;
            }
            if let Some(record) = normalize_product(product) {
                debug!(
                    "{}: {} offer(s), {} ratings, sales {:?}",
                    record.asin, record.offer_count, record.total_ratings, record.monthly_sales
                );
                records.insert(record.asin.clone(), record);
            }
        }

        Ok(records.into_values().collect())
    }
}

fn join(asins: &[Asin]) -> String {
    asins.iter().map(Asin::as_str).collect::<Vec<_>>().join(", ")
}
