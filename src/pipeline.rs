use crate::analyzer::{Aggregator, AggregatorImpl};
use crate::config::AppConfig;
use crate::fetch::{HistoricalSnapshotFetcher, VariantDetailFetcher, VariantResolver};
use crate::model::{AggregatedVariant, Asin, FetchOutcome, PipelineError};
use crate::source::ProductSource;
use crate::utils::Clock;

use futures::future::join;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Resolve → (details ∥ history) → aggregate, for one anchor product.
pub struct Pipeline {
    resolver: VariantResolver,
    details: VariantDetailFetcher,
    history: HistoricalSnapshotFetcher,
    aggregator: AggregatorImpl,
}

impl Pipeline {
    pub fn new(source: Arc<dyn ProductSource>, clock: Arc<dyn Clock>, config: &AppConfig) -> Self {
        Self {
            resolver: VariantResolver::new(source.clone(), config),
            details: VariantDetailFetcher::new(source.clone(), config),
            history: HistoricalSnapshotFetcher::new(source, clock, config),
            aggregator: AggregatorImpl::new(),
        }
    }

    /// Runs every step for `anchor`. Fetch failures degrade to empty data;
    /// only cancellation is reported as an error, and then nothing is returned.
    pub async fn run(
        &self,
        anchor: &Asin,
        cancel: &CancellationToken,
    ) -> Result<Vec<AggregatedVariant>, PipelineError> {
        info!("Resolving variants of {}...", anchor);
        let resolved = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
            outcome = self.resolver.resolve_variants(anchor) => outcome,
        };
        let asins = log_outcome("variant lookup", resolved);

        info!("Fetching current and last-month data for {} variant(s)...", asins.len());
        let (details, snapshots) = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
            pair = join(
                self.details.fetch_details(&asins),
                self.history.fetch_historical(&asins),
            ) => pair,
        };

        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let details = log_outcome("detail fetch", details);
        let snapshots = log_outcome("history fetch", snapshots);
        let merged = self.aggregator.aggregate(details, &snapshots);
        info!("Aggregated {} variant(s)", merged.len());
        Ok(merged)
    }
}

fn log_outcome<T>(step: &str, outcome: FetchOutcome<T>) -> Vec<T> {
    match &outcome {
        FetchOutcome::Failed(e) => warn!("{} failed, continuing without data: {}", step, e),
        FetchOutcome::Skipped => info!("{} skipped: nothing to fetch", step),
        FetchOutcome::Fetched(_) => debug!("{} returned {} item(s)", step, outcome.items().len()),
    }
    outcome.into_items()
}
