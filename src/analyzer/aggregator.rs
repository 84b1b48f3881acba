use crate::model::{AggregatedVariant, Asin, HistoricalSnapshot, VariantRecord};
use serde::Serialize;
use std::collections::HashMap;

/// Trait defining the interface for merging fetch results.
pub trait Aggregator {
    fn aggregate(
        &self,
        details: Vec<VariantRecord>,
        snapshots: &[HistoricalSnapshot],
    ) -> Vec<AggregatedVariant>;
}

pub struct AggregatorImpl;

impl AggregatorImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Aggregator for AggregatorImpl {
    /// One output per record, in record order. A record without a snapshot
    /// gets `None` deltas rather than a zero baseline.
    fn aggregate(
        &self,
        details: Vec<VariantRecord>,
        snapshots: &[HistoricalSnapshot],
    ) -> Vec<AggregatedVariant> {
        let mut by_asin: HashMap<&Asin, &HistoricalSnapshot> = HashMap::new();
        for snapshot in snapshots {
            by_asin.entry(&snapshot.asin).or_insert(snapshot);
        }

        details
            .into_iter()
            .map(|record| {
                let snapshot = by_asin.get(&record.asin);
                AggregatedVariant {
                    rating_difference: snapshot
                        .map(|s| record.total_ratings.saturating_sub(s.last_month_ratings)),
                    review_difference: snapshot
                        .map(|s| record.total_reviews.saturating_sub(s.last_month_reviews)),
                    record,
                }
            })
            .collect()
    }
}

/// Totals over a product family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilySummary {
    pub variants: usize,
    pub total_ratings: i64,
    pub total_reviews: i64,
    /// Sum of known rating deltas.
    pub rating_growth: i64,
    pub review_growth: i64,
    /// Variants whose month-ago baseline was unknown.
    pub unknown_baselines: usize,
}

impl FamilySummary {
    pub fn from_variants(variants: &[AggregatedVariant]) -> Self {
        variants.iter().fold(Self::default(), |mut acc, v| {
            acc.variants += 1;
            acc.total_ratings = acc.total_ratings.saturating_add(v.record.total_ratings);
            acc.total_reviews = acc.total_reviews.saturating_add(v.record.total_reviews);
            acc.rating_growth = acc.rating_growth.saturating_add(v.rating_difference.unwrap_or(0));
            acc.review_growth = acc.review_growth.saturating_add(v.review_difference.unwrap_or(0));
            if v.rating_difference.is_none() || v.review_difference.is_none() {
                acc.unknown_baselines += 1;
            }
            acc
        })
    }
}
