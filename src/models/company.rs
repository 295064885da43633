use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::article::ArticleRecord;

/// Aggregate outcome for one seed identifier.
///
/// Invariant: `avg_score` is present iff `news` is non-empty, and equals the
/// arithmetic mean of the article scores. A company with zero retrievable
/// articles is distinct from one scoring exactly 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResult {
    /// Identifier plus its resolved counterpart, e.g. "Apple Inc. (AAPL)".
    /// Carried as the map key in reports, not as a field.
    #[serde(skip)]
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_score: Option<f64>,
    pub news: Vec<ArticleRecord>,
}

/// One run's results, keyed by company key. Insertion order matches the
/// processing order of the input identifiers.
pub type ResultSet = IndexMap<String, CompanyResult>;
