use async_trait::async_trait;
use thiserror::Error;

/// What a resolution strategy yields for one seed identifier. An empty
/// `urls` list is a valid outcome, not an error.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub display_name: Option<String>,
    pub ticker: Option<String>,
    pub urls: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited by provider")]
    RateLimited,
}

/// Maps a company name or ticker symbol to candidate news article URLs,
/// together with whatever counterpart identity the provider can supply.
#[async_trait]
pub trait NewsResolver: Send + Sync {
    async fn resolve(&self, identifier: &str) -> Result<Resolution, ResolverError>;
}
