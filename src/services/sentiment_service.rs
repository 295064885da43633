use vader_sentiment::SentimentIntensityAnalyzer;

/// Lexicon-based sentiment scorer.
///
/// Polarity is VADER's compound score in [-1, 1], remapped linearly onto the
/// 0-10 reporting scale: -1 -> 0.0, 0 -> 5.0, +1 -> 10.0. The analyzer is
/// built once and reused; loading the lexicon is not free.
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Score any text, including `""`, on the 0-10 scale. Total over all
    /// inputs; empty or unscorable text lands on the neutral midpoint.
    pub fn score(&self, text: &str) -> f64 {
        let polarity = if text.trim().is_empty() {
            0.0
        } else {
            self.analyzer.polarity_scores(text)["compound"]
        };
        rescale(polarity)
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear remap from [-1, 1] polarity to the [0, 10] report scale.
fn rescale(polarity: f64) -> f64 {
    (polarity + 1.0) * 5.0
}
