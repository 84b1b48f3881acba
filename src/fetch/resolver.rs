use crate::config::AppConfig;
use crate::model::{Asin, FetchError, FetchOutcome};
use crate::source::payload::RawProduct;
use crate::source::{ProductQuery, ProductSource, QueryWindow};

use indexmap::IndexSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Looks up the anchor product and lists its variants.
pub struct VariantResolver {
    source: Arc<dyn ProductSource>,
    offers: u32,
}

impl VariantResolver {
    pub fn new(source: Arc<dyn ProductSource>, config: &AppConfig) -> Self {
        Self {
            source,
            offers: config.offers,
        }
    }

    /// Deduplicated variant ASINs of `anchor`, in first-seen order.
    /// An anchor without a variation list resolves to no variants.
    pub async fn resolve_variants(&self, anchor: &Asin) -> FetchOutcome<Asin> {
        match self.try_resolve(anchor).await {
            Ok(asins) => {
                info!("Anchor {} has {} variant(s)", anchor, asins.len());
                FetchOutcome::Fetched(asins)
            }
            Err(e) => {
                warn!("Failed to fetch anchor product {}: {}", anchor, e);
                FetchOutcome::Failed(e)
            }
        }
    }

    async fn try_resolve(&self, anchor: &Asin) -> Result<Vec<Asin>, FetchError> {
        let query = ProductQuery::new(vec![anchor.clone()], QueryWindow::Offers(self.offers));
        let response = self.source.fetch(&query).await?;
        let product = response
            .products()
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::MissingProduct(anchor.clone()))?;
        Ok(variant_asins(&product))
    }
}

pub fn variant_asins(product: &RawProduct) -> Vec<Asin> {
    let Some(variations) = &product.variations else {
        return Vec::new();
    };
    variations
        .iter()
        .filter_map(|v| v.asin.as_deref())
        .filter(|asin| !asin.is_empty())
        .map(Asin::from)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
