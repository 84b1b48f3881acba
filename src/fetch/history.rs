use crate::config::AppConfig;
use crate::model::{Asin, FetchError, FetchOutcome, HistoricalSnapshot};
use crate::source::payload::RawProduct;
use crate::source::{ProductQuery, ProductSource, QueryWindow};
use crate::utils::{Clock, TimeReference, from_keepa_minutes};

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fetches a trailing-window snapshot and reads rating/review counts as they
/// stood at the start of that window (30 days by default).
pub struct HistoricalSnapshotFetcher {
    source: Arc<dyn ProductSource>,
    clock: Arc<dyn Clock>,
    reference: TimeReference,
    history_days: u32,
}

impl HistoricalSnapshotFetcher {
    pub fn new(source: Arc<dyn ProductSource>, clock: Arc<dyn Clock>, config: &AppConfig) -> Self {
        Self {
            source,
            clock,
            reference: TimeReference::new(config.history_days),
            history_days: config.history_days,
        }
    }

    pub async fn fetch_historical(&self, asins: &[Asin]) -> FetchOutcome<HistoricalSnapshot> {
        if asins.is_empty() {
            return FetchOutcome::Skipped;
        }

        match self.try_fetch(asins).await {
            Ok(snapshots) => {
                info!("Fetched last-month snapshots for {} variant(s)", snapshots.len());
                FetchOutcome::Fetched(snapshots)
            }
            Err(e) => {
                warn!("Error fetching last month's data for {} ASIN(s): {}", asins.len(), e);
                FetchOutcome::Failed(e)
            }
        }
    }

    async fn try_fetch(&self, asins: &[Asin]) -> Result<Vec<HistoricalSnapshot>, FetchError> {
        let query = ProductQuery::new(asins.to_vec(), QueryWindow::Stats(self.history_days));
        let response = self.source.fetch(&query).await?;

        let target = self.reference.month_ago_epoch(self.clock.as_ref());
        debug!("Month-ago target: {} ({:?})", target, from_keepa_minutes(target));

        let mut snapshots: IndexMap<Asin, HistoricalSnapshot> = IndexMap::new();
        for product in response.products() {
            let Some(snapshot) = snapshot_at(&product, target) else {
                continue;
            };
            if snapshots.contains_key(&snapshot.asin) {
                debug!("Dropping duplicate snapshot for {}", snapshot.asin);
                continue;
            }
            snapshots.insert(snapshot.asin.clone(), snapshot);
        }

        Ok(snapshots.into_values().collect())
    }
}

/// Counts nearest `target` for one product; 0 when a series has no samples.
pub fn snapshot_at(product: &RawProduct, target: i64) -> Option<HistoricalSnapshot> {
    let asin = Asin::new(product.asin()?);
    Some(HistoricalSnapshot {
        asin,
        last_month_ratings: product.rating_series().value_near(target),
        last_month_reviews: product.review_series().value_near(target),
    })
}
