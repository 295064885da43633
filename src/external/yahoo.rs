use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::external::resolver::{NewsResolver, Resolution, ResolverError};

const SEARCH_URL: &str = "https://query1.finance.yahoo.com/v1/finance/search";
const NEWS_COUNT: usize = 10;

/// Yahoo Finance resolver. One free endpoint answers both questions: which
/// symbol/name an identifier corresponds to, and what was recently written
/// about it. No API key required.
pub struct YahooResolver {
    client: Client,
}

impl YahooResolver {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn search(
        &self,
        query: &str,
        news_count: usize,
    ) -> Result<YahooSearchResponse, ResolverError> {
        let resp = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("q", query),
                ("quotesCount", "1"),
                ("newsCount", &news_count.to_string()),
            ])
            .send()
            .await
            .map_err(|e| ResolverError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ResolverError::RateLimited);
        }
        if !resp.status().is_success() {
            return Err(ResolverError::BadResponse(format!("HTTP {}", resp.status())));
        }

        resp.json::<YahooSearchResponse>()
            .await
            .map_err(|e| ResolverError::Parse(e.to_string()))
    }

    /// Best quote match for an identifier: (ticker, display name).
    pub(crate) async fn quote_lookup(
        &self,
        identifier: &str,
    ) -> Result<(Option<String>, Option<String>), ResolverError> {
        let body = self.search(identifier, 0).await?;
        Ok(best_quote(body.quotes))
    }
}

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
struct YahooSearchResponse {
    quotes: Option<Vec<YahooQuote>>,
    news: Option<Vec<YahooNewsItem>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    symbol: Option<String>,
    #[serde(rename = "shortname")]
    short_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooNewsItem {
    link: Option<String>,
}

fn best_quote(quotes: Option<Vec<YahooQuote>>) -> (Option<String>, Option<String>) {
    quotes
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|q| (q.symbol, q.short_name))
        .unwrap_or((None, None))
}

#[async_trait]
impl NewsResolver for YahooResolver {
    async fn resolve(&self, identifier: &str) -> Result<Resolution, ResolverError> {
        let body = self.search(identifier, NEWS_COUNT).await?;

        let (ticker, display_name) = best_quote(body.quotes);

        // Feed items without a usable link are skipped; feed order is kept.
        let urls = body
            .news
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| item.link)
            .filter(|link| Url::parse(link).is_ok())
            .collect();

        Ok(Resolution {
            display_name,
            ticker,
            urls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_quote_takes_first_match() {
        let quotes = vec![
            YahooQuote {
                symbol: Some("AAPL".into()),
                short_name: Some("Apple Inc.".into()),
            },
            YahooQuote {
                symbol: Some("APLE".into()),
                short_name: Some("Apple Hospitality".into()),
            },
        ];
        let (ticker, name) = best_quote(Some(quotes));
        assert_eq!(ticker.as_deref(), Some("AAPL"));
        assert_eq!(name.as_deref(), Some("Apple Inc."));
    }

    #[test]
    fn test_best_quote_empty() {
        assert_eq!(best_quote(None), (None, None));
        assert_eq!(best_quote(Some(vec![])), (None, None));
    }

    #[test]
    fn test_feed_items_without_link_are_skipped() {
        let raw = r#"{
            "quotes": [{"symbol": "TSLA", "shortname": "Tesla, Inc."}],
            "news": [
                {"link": "https://example.com/a", "title": "one"},
                {"title": "no link"},
                {"link": "https://example.com/b"}
            ]
        }"#;
        let body: YahooSearchResponse = serde_json::from_str(raw).unwrap();
        let links: Vec<String> = body
            .news
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| item.link)
            .collect();
        assert_eq!(links, vec!["https://example.com/a", "https://example.com/b"]);
    }
}
