use std::sync::Arc;

use crate::external::resolver::NewsResolver;
use crate::services::fetch_service::FetchService;
use crate::services::sentiment_service::SentimentScorer;

/// Shared handles for one pipeline run. The resolver is the strategy chosen
/// at startup; fetcher and scorer are reused across all identifiers.
pub struct AppState {
    pub resolver: Arc<dyn NewsResolver>,
    pub fetcher: FetchService,
    pub scorer: SentimentScorer,
}
