// Canned-response ProductSource for tests.
use crate::model::FetchError;
use crate::source::payload::ProductResponse;
use crate::source::traits::{ProductQuery, ProductSource, QueryWindow};
use std::sync::Mutex;

struct Route {
    stats: bool,
    asins: Option<String>,
    body: Result<String, String>,
}

impl Route {
    fn matches(&self, query: &ProductQuery) -> bool {
        let stats = matches!(query.window, QueryWindow::Stats(_));
        self.stats == stats
            && self
                .asins
                .as_deref()
                .is_none_or(|asins| asins == query.joined_asins())
    }
}

#[derive(Default)]
pub struct StubSource {
    routes: Vec<Route>,
    calls: Mutex<Vec<ProductQuery>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every offers-window query.
    pub fn offers(self, body: &str) -> Self {
        self.route(false, None, Ok(body.to_string()))
    }

    /// Answers offers-window queries for exactly these comma-joined ASINs.
    pub fn offers_for(self, asins: &str, body: &str) -> Self {
        self.route(false, Some(asins), Ok(body.to_string()))
    }

    pub fn stats(self, body: &str) -> Self {
        self.route(true, None, Ok(body.to_string()))
    }

    pub fn failing_offers(self, message: &str) -> Self {
        self.route(false, None, Err(message.to_string()))
    }

    pub fn failing_stats(self, message: &str) -> Self {
        self.route(true, None, Err(message.to_string()))
    }

    fn route(mut self, stats: bool, asins: Option<&str>, body: Result<String, String>) -> Self {
        self.routes.push(Route {
            stats,
            asins: asins.map(String::from),
            body,
        });
        self
    }

    pub fn calls(&self) -> Vec<ProductQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ProductSource for StubSource {
    async fn fetch(&self, query: &ProductQuery) -> Result<ProductResponse, FetchError> {
        self.calls.lock().unwrap().push(query.clone());

        let route = self
            .routes
            .iter()
            .filter(|r| r.matches(query))
            .min_by_key(|r| r.asins.is_none())
            .ok_or_else(|| FetchError::Provider(format!("no stub for {:?}", query)))?;

        match &route.body {
            Ok(body) => Ok(serde_json::from_str(body)?),
            Err(message) => Err(FetchError::Provider(message.clone())),
        }
    }
}
