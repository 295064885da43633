use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::external::resolver::{NewsResolver, Resolution, ResolverError};
use crate::external::yahoo::YahooResolver;

const SEARCH_ENDPOINT: &str = "https://google.serper.dev/search";
const MAX_RESULTS: usize = 10;

/// Search-based resolver: a site-restricted stock news query issued to the
/// Serper API, with the ticker resolved up front so it can sharpen the query.
pub struct SerperResolver {
    api_key: String,
    client: Client,
    ticker_source: YahooResolver,
    news_sites: Vec<String>,
}

impl SerperResolver {
    pub fn new(api_key: String, client: Client, news_sites: Vec<String>) -> Self {
        let ticker_source = YahooResolver::new(client.clone());
        Self {
            api_key,
            client,
            ticker_source,
            news_sites,
        }
    }

    /// `"{identifier} {ticker} stock news site:a OR site:b"`. The ticker is
    /// included only when it resolved.
    fn build_query(&self, identifier: &str, ticker: Option<&str>) -> String {
        let mut query = identifier.to_string();
        if let Some(symbol) = ticker {
            query.push(' ');
            query.push_str(symbol);
        }
        query.push_str(" stock news ");
        let filters: Vec<String> = self
            .news_sites
            .iter()
            .map(|site| format!("site:{site}"))
            .collect();
        query.push_str(&filters.join(" OR "));
        query
    }
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    organic: Option<Vec<SerperResult>>,
}

#[derive(Debug, Deserialize)]
struct SerperResult {
    link: String,
}

#[async_trait]
impl NewsResolver for SerperResolver {
    async fn resolve(&self, identifier: &str) -> Result<Resolution, ResolverError> {
        // A failed ticker lookup only widens the query; it never blocks the
        // search itself.
        let (ticker, display_name) = match self.ticker_source.quote_lookup(identifier).await {
            Ok(pair) => pair,
            Err(e) => {
                warn!("Ticker lookup failed for {identifier}: {e}");
                (None, None)
            }
        };

        let query = self.build_query(identifier, ticker.as_deref());
        let request_body = serde_json::json!({
            "q": query,
            "num": MAX_RESULTS,
        });

        let resp = self
            .client
            .post(SEARCH_ENDPOINT)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ResolverError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ResolverError::RateLimited);
        }
        if !resp.status().is_success() {
            return Err(ResolverError::BadResponse(format!("HTTP {}", resp.status())));
        }

        let body: SerperResponse = resp
            .json()
            .await
            .map_err(|e| ResolverError::Parse(e.to_string()))?;

        // Result URLs are taken verbatim in provider rank order.
        let urls = body
            .organic
            .unwrap_or_default()
            .into_iter()
            .map(|result| result.link)
            .take(MAX_RESULTS)
            .collect();

        Ok(Resolution {
            display_name,
            ticker,
            urls,
        })
    }
}
