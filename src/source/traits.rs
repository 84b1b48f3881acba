use crate::model::{Asin, FetchError};
use crate::source::payload::ProductResponse;

/// What a product request asks the provider for besides the ASINs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryWindow {
    /// Current data with up to this many marketplace offers.
    Offers(u32),
    /// Statistics over a trailing window of this many days.
    Stats(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub asins: Vec<Asin>,
    pub window: QueryWindow,
}

impl ProductQuery {
    pub fn new(asins: Vec<Asin>, window: QueryWindow) -> Self {
        Self { asins, window }
    }

    /// ASINs in the comma-joined form the provider expects.
    pub fn joined_asins(&self) -> String {
        self.asins
            .iter()
            .map(Asin::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[async_trait::async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch(&self, query: &ProductQuery) -> Result<ProductResponse, FetchError>;
}
