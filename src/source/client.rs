use crate::config::AppConfig;
use crate::model::FetchError;
use crate::source::payload::ProductResponse;
use crate::source::traits::{ProductQuery, ProductSource, QueryWindow};

use reqwest::{Client, Request};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Keepa product endpoint over HTTP.
pub struct KeepaClient {
    client: Client,
    base_url: String,
    api_key: String,
    domain: u8,
}

impl KeepaClient {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("keepa-variants/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            domain: config.domain,
        })
    }

    fn build_request(&self, query: &ProductQuery) -> Result<Request, FetchError> {
        let url = format!("{}/product", self.base_url);
        let window = match query.window {
            QueryWindow::Offers(count) => ("offers", count.to_string()),
            QueryWindow::Stats(days) => ("stats", days.to_string()),
        };
        let params = [
            ("key", self.api_key.clone()),
            ("domain", self.domain.to_string()),
            ("asin", query.joined_asins()),
            ("rating", "1".to_string()),
            (window.0, window.1),
        ];
        Ok(self.client.get(&url).query(&params).build()?)
    }
}

#[async_trait::async_trait]
impl ProductSource for KeepaClient {
    async fn fetch(&self, query: &ProductQuery) -> Result<ProductResponse, FetchError> {
        let request = self.build_request(query)?;
        debug!("Requesting {} product(s) with {:?}", query.asins.len(), query.window);

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Keepa responded [{}]", status);
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ProductResponse = serde_json::from_str(&body)?;
        if let Some(error) = &parsed.error {
            return Err(FetchError::Provider(error.describe()));
        }
        if let Some(tokens) = parsed.tokens_left {
            info!("Keepa tokens left: {}", tokens);
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Asin;
    use std::collections::HashMap;

    fn config() -> AppConfig {
        serde_json::from_str(
            r#"{ "api_key": "secret", "anchor_asin": "B000ANCHOR", "base_url": "https://keepa.test/" }"#,
        )
        .unwrap()
    }

    fn params(request: &Request) -> HashMap<String, String> {
        request.url().query_pairs().into_owned().collect()
    }

    #[test]
    fn builds_offers_request() {
        let client = KeepaClient::new(&config()).unwrap();
        let query = ProductQuery::new(
            vec![Asin::from("A1"), Asin::from("B2")],
            QueryWindow::Offers(20),
        );
        let request = client.build_request(&query).unwrap();

        assert_eq!(request.url().path(), "/product");
        assert_eq!(request.url().host_str(), Some("keepa.test"));
        let params = params(&request);
        assert_eq!(params["key"], "secret");
        assert_eq!(params["domain"], "1");
        assert_eq!(params["asin"], "A1,B2");
        assert_eq!(params["rating"], "1");
        assert_eq!(params["offers"], "20");
        assert!(!params.contains_key("stats"));
    }

    #[test]
    fn builds_stats_request() {
        let client = KeepaClient::new(&config()).unwrap();
        let query = ProductQuery::new(vec![Asin::from("A1")], QueryWindow::Stats(30));
        let params = params(&client.build_request(&query).unwrap());
        assert_eq!(params["stats"], "30");
        assert!(!params.contains_key("offers"));
    }
}
