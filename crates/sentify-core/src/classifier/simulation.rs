//! Offline keyword heuristic used when no live model is available

use crate::model::{AnalyzedArticle, NewsItem, ReconciledVerdict, Sentiment};
use rand::Rng;

/// Explanation attached to every simulated verdict
pub const SIMULATED_EXPLANATION: &str =
    "Simulated analysis: Key terms matched in local offline mode.";

const POSITIVE_KEYWORDS: &[&str] = &["grow", "surge", "record", "high", "rally"];
const NEGATIVE_KEYWORDS: &[&str] = &["drop", "fail", "loss", "suit", "cut"];

/// Confidence is drawn from `[MIN, MAX)`
const MIN_CONFIDENCE: f64 = 0.75;
const MAX_CONFIDENCE: f64 = 0.95;

/// Keyword label for one article; a negative match overrides a positive one
pub fn keyword_sentiment(item: &NewsItem) -> Sentiment {
    let text = format!("{} {}", item.title, item.summary).to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    if matches(NEGATIVE_KEYWORDS) {
        Sentiment::Negative
    } else if matches(POSITIVE_KEYWORDS) {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

/// Simulated verdict for one article. It carries no model results.
pub fn simulate_one(item: &NewsItem, rng: &mut impl Rng) -> ReconciledVerdict {
    ReconciledVerdict {
        sentiment: keyword_sentiment(item),
        confidence_score: rng.random_range(MIN_CONFIDENCE..MAX_CONFIDENCE),
        explanation: SIMULATED_EXPLANATION.to_string(),
        gemini: None,
        finbert: None,
        comparison: None,
    }
}

/// Simulate a whole batch
pub fn simulate(items: &[NewsItem], rng: &mut impl Rng) -> Vec<AnalyzedArticle> {
    items
        .iter()
        .map(|item| AnalyzedArticle::new(item.clone(), simulate_one(item, rng)))
        .collect()
}
