use tracing::{info, warn};

use crate::external::resolver::Resolution;
use crate::models::{ArticleRecord, CompanyResult};
use crate::services::extract_service;
use crate::state::AppState;

/// Reduce scored records to (average, detail list). The average is absent
/// for an empty batch: a company with zero retrievable articles is distinct
/// from one scoring exactly 0.
pub fn aggregate(records: Vec<ArticleRecord>) -> (Option<f64>, Vec<ArticleRecord>) {
    if records.is_empty() {
        return (None, records);
    }
    let sum: f64 = records.iter().map(|r| r.score).sum();
    let avg = sum / records.len() as f64;
    (Some(avg), records)
}

/// Run one identifier through resolve -> fetch -> extract -> score ->
/// aggregate. Always yields a result; failures along the way only shrink the
/// article set, they never abort the identifier or the run.
pub async fn analyze_identifier(state: &AppState, identifier: &str) -> CompanyResult {
    let resolution = match state.resolver.resolve(identifier).await {
        Ok(resolution) => resolution,
        Err(e) => {
            warn!("Resolution failed for {identifier}: {e}");
            Resolution::default()
        }
    };

    let key = company_key(
        identifier,
        resolution.display_name.as_deref(),
        resolution.ticker.as_deref(),
    );
    info!("Analyzing sentiment for {key} ({} candidate URLs)", resolution.urls.len());

    let pages = state.fetcher.fetch_all(&resolution.urls).await;

    // Extraction and scoring are synchronous CPU work, done after the whole
    // batch of fetches has settled.
    let mut records = Vec::with_capacity(pages.len());
    for page in pages {
        let text = extract_service::extract_text(&page.body);
        if text.is_empty() {
            // Still scored (at neutral); see DESIGN.md on the aggregation bias.
            warn!("No readable content at {}", page.url);
        }
        let score = state.scorer.score(&text);
        records.push(ArticleRecord {
            source_url: page.url,
            text,
            score,
        });
    }

    let (avg_score, news) = aggregate(records);
    match avg_score {
        Some(avg) => info!("Average sentiment for {key}: {avg:.2} ({} articles)", news.len()),
        None => warn!("No sentiment scores available for {key}"),
    }

    CompanyResult {
        key,
        avg_score,
        news,
    }
}

/// Company key shown in reports: the identifier joined with whichever
/// counterpart resolved. When the identifier already is the ticker, the
/// resolved display name takes its place.
fn company_key(identifier: &str, display_name: Option<&str>, ticker: Option<&str>) -> String {
    match (display_name, ticker) {
        (Some(name), Some(symbol)) if identifier.eq_ignore_ascii_case(symbol) => {
            format!("{name} ({symbol})")
        }
        (_, Some(symbol)) => format!("{identifier} ({symbol})"),
        _ => identifier.to_string(),
    }
}
