use serde::{Deserialize, Serialize};

/// A single scored article. `source_url` is the final URL after redirects,
/// never the originally requested one.
///
/// Serialized into reports as `{website, content, score}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "website")]
    pub source_url: String,
    #[serde(rename = "content")]
    pub text: String,
    /// Sentiment on the 0-10 scale; 5.0 is neutral.
    pub score: f64,
}
