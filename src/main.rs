use std::sync::Arc;

use tracing::{info, warn};

use marketmood::config::{self, AppConfig};
use marketmood::external::resolver::NewsResolver;
use marketmood::external::serper::SerperResolver;
use marketmood::external::yahoo::YahooResolver;
use marketmood::logging::{init_logging, LoggingConfig};
use marketmood::models::ResultSet;
use marketmood::report;
use marketmood::services::fetch_service::{self, FetchService};
use marketmood::services::pipeline;
use marketmood::services::sentiment_service::SentimentScorer;
use marketmood::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env());

    let config = AppConfig::from_env();
    let companies = config::read_lines(&config.companies_file)?;
    if companies.is_empty() {
        anyhow::bail!("no identifiers found in {}", config.companies_file);
    }

    let client = fetch_service::build_client();

    // Select the resolution strategy based on NEWS_RESOLVER (defaults to yahoo)
    let resolver: Arc<dyn NewsResolver> = match config.resolver.to_lowercase().as_str() {
        "search" | "serper" => {
            let api_key = config.search_api_key.clone().ok_or_else(|| {
                anyhow::anyhow!("NEWS_RESOLVER=search requires SEARCH_API_KEY to be set")
            })?;
            let news_sites = config::read_lines(&config.news_sites_file)?;
            info!(
                "Using search resolver restricted to {} news sites",
                news_sites.len()
            );
            Arc::new(SerperResolver::new(api_key, client.clone(), news_sites))
        }
        "yahoo" => {
            info!("Using Yahoo Finance feed resolver");
            Arc::new(YahooResolver::new(client.clone()))
        }
        other => {
            warn!("Unknown resolver '{other}', falling back to Yahoo Finance");
            Arc::new(YahooResolver::new(client.clone()))
        }
    };

    let state = AppState {
        resolver,
        fetcher: FetchService::new(client, config.fetch_concurrency),
        scorer: SentimentScorer::new(),
    };

    let mut results = ResultSet::new();
    let mut articles_scored = 0usize;

    // Identifiers run strictly one after another; only the fetches within a
    // single identifier overlap.
    for identifier in &companies {
        let company = pipeline::analyze_identifier(&state, identifier).await;
        articles_scored += company.news.len();
        results.insert(company.key.clone(), company);
    }

    report::write_results_json(&results, report::RESULTS_FILE)?;
    report::write_summary_txt(&results, report::SUMMARY_FILE)?;

    info!(
        "Done: {} companies, {} articles scored. Wrote {} and {}",
        results.len(),
        articles_scored,
        report::RESULTS_FILE,
        report::SUMMARY_FILE
    );

    Ok(())
}
