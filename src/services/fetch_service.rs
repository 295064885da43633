use std::time::Duration;

use futures::future::join_all;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, DNT, UPGRADE_INSECURE_REQUESTS,
    USER_AGENT,
};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::services::rate_limiter::RateLimiter;

const MAX_RETRIES: u32 = 2;
const BASE_BACKOFF_MS: u64 = 500;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A successfully fetched page. `url` is the final URL after any redirects,
/// which is what downstream records are keyed by.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub body: String,
}

/// Browser-like header set sent on every outbound request; many news sites
/// reject clients without one.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_6) AppleWebKit/605.1.15 \
             (KHTML, like Gecko) Version/14.0.3 Safari/605.1.15",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

/// Build the shared HTTP client used for the whole run.
pub fn build_client() -> Client {
    Client::builder()
        .default_headers(default_headers())
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| Client::new())
}

enum FetchFailure {
    /// Worth another attempt: network errors, 429, 5xx.
    Transient(String),
    /// Not worth retrying: any other non-success status.
    Terminal(String),
}

pub struct FetchService {
    client: Client,
    limiter: RateLimiter,
}

impl FetchService {
    pub fn new(client: Client, max_concurrent: usize) -> Self {
        Self {
            client,
            limiter: RateLimiter::new(max_concurrent),
        }
    }

    /// Fetch every URL concurrently, bounded by the limiter. URLs that fail
    /// after the retry budget are dropped from the output; the batch call
    /// itself never errors. Successes come back in input order.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<FetchedPage> {
        let fetches = urls.iter().map(|url| async move {
            let _permit = self.limiter.acquire().await;
            self.fetch_with_retry(url).await
        });

        let pages: Vec<FetchedPage> = join_all(fetches).await.into_iter().flatten().collect();
        debug!("Fetched {} of {} URLs", pages.len(), urls.len());
        pages
    }

    async fn fetch_with_retry(&self, url: &str) -> Option<FetchedPage> {
        for attempt in 0..=MAX_RETRIES {
            match self.fetch_one(url).await {
                Ok(page) => return Some(page),
                Err(FetchFailure::Terminal(reason)) => {
                    warn!("Dropping {url}: {reason}");
                    return None;
                }
                Err(FetchFailure::Transient(reason)) => {
                    if attempt == MAX_RETRIES {
                        warn!("Dropping {url} after {} attempts: {reason}", attempt + 1);
                        return None;
                    }
                    let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
                    debug!("Retrying {url} in {}ms: {reason}", backoff.as_millis());
                    tokio::time::sleep(backoff).await;
                }
            }
        }
        None
    }

    async fn fetch_one(&self, url: &str) -> Result<FetchedPage, FetchFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::Transient(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(FetchFailure::Transient(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(FetchFailure::Terminal(format!("HTTP {status}")));
        }

        // response.url() reflects any redirects the client followed.
        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| FetchFailure::Transient(e.to_string()))?;

        Ok(FetchedPage {
            url: final_url,
            body,
        })
    }
}
