//! Per-article verdicts produced by the reconciler

use super::news::NewsItem;
use super::sentiment::{ModelResult, Sentiment};
use serde::{Deserialize, Serialize};

/// Which models produced a result for one article
#[derive(Debug, Clone, PartialEq)]
pub enum ModelAvailability {
    None,
    GeminiOnly(ModelResult),
    FinBertOnly(ModelResult),
    Both {
        gemini: ModelResult,
        finbert: ModelResult,
    },
}

impl ModelAvailability {
    /// Combine the two optional per-model results for one article
    pub fn from_results(gemini: Option<ModelResult>, finbert: Option<ModelResult>) -> Self {
        match (gemini, finbert) {
            (Some(gemini), Some(finbert)) => Self::Both { gemini, finbert },
            (Some(gemini), None) => Self::GeminiOnly(gemini),
            (None, Some(finbert)) => Self::FinBertOnly(finbert),
            (None, None) => Self::None,
        }
    }
}

/// Outcome of comparing two model opinions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelComparison {
    pub agreement: bool,
    /// 1.0 when the labels match, 0.0 otherwise
    pub agreement_score: f64,
    pub final_sentiment: Sentiment,
    pub final_confidence: f64,
}

/// Final label and confidence for one article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledVerdict {
    pub sentiment: Sentiment,
    pub confidence_score: f64,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<ModelResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finbert: Option<ModelResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ModelComparison>,
}

/// A news item together with its verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedArticle {
    #[serde(flatten)]
    pub item: NewsItem,
    #[serde(flatten)]
    pub verdict: ReconciledVerdict,
}

impl AnalyzedArticle {
    pub fn new(item: NewsItem, verdict: ReconciledVerdict) -> Self {
        Self { item, verdict }
    }

    pub fn sentiment(&self) -> Sentiment {
        self.verdict.sentiment
    }

    pub fn confidence(&self) -> f64 {
        self.verdict.confidence_score
    }
}
