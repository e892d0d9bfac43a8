//! Aggregate statistics over a set of analyzed articles

use super::ModelKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall direction of the news flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketMood {
    Bullish,
    Bearish,
    Neutral,
}

impl MarketMood {
    /// Compare positive and negative counts; equal counts are neutral
    pub fn from_counts(positive: usize, negative: usize) -> Self {
        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => MarketMood::Bullish,
            std::cmp::Ordering::Less => MarketMood::Bearish,
            std::cmp::Ordering::Equal => MarketMood::Neutral,
        }
    }
}

impl fmt::Display for MarketMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MarketMood::Bullish => "Bullish",
            MarketMood::Bearish => "Bearish",
            MarketMood::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

/// Per-class article counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentDistribution {
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Collection-level summary shown in the KPI header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_articles: usize,
    pub distribution: SentimentDistribution,
    pub average_confidence: f64,
    pub market_mood: MarketMood,
    /// Percentage of compared articles where both models agreed; `None` when
    /// no article was seen by both models
    pub model_agreement: Option<f64>,
}

/// Illustrative accuracy proxies for one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPerformanceMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub avg_confidence: f64,
    /// Synthetic, not a measured latency
    pub processing_time_secs: f64,
    /// Number of results the model produced
    pub observations: usize,
    /// True when the figures are fixed display constants
    pub is_placeholder: bool,
}

/// Metrics for both models side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub gemini: ModelPerformanceMetrics,
    pub finbert: ModelPerformanceMetrics,
}

impl ModelPerformance {
    /// Head-to-head winners. Gemini must be strictly better to win; ties go
    /// to FinBERT.
    pub fn insights(&self) -> ModelInsights {
        let (gemini, finbert) = (&self.gemini, &self.finbert);
        let pick = |gemini_wins: bool, gemini_value: f64, finbert_value: f64| {
            if gemini_wins {
                Insight {
                    model: ModelKind::Gemini,
                    value: gemini_value,
                }
            } else {
                Insight {
                    model: ModelKind::FinBert,
                    value: finbert_value,
                }
            }
        };

        ModelInsights {
            best_accuracy: pick(
                gemini.accuracy > finbert.accuracy,
                gemini.accuracy,
                finbert.accuracy,
            ),
            fastest: pick(
                gemini.processing_time_secs < finbert.processing_time_secs,
                gemini.processing_time_secs,
                finbert.processing_time_secs,
            ),
            best_precision: pick(
                gemini.precision > finbert.precision,
                gemini.precision,
                finbert.precision,
            ),
        }
    }
}

/// The winning model of one comparison and its figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub model: ModelKind,
    pub value: f64,
}

/// Which model leads on accuracy, speed and precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInsights {
    pub best_accuracy: Insight,
    /// Lowest processing time
    pub fastest: Insight,
    pub best_precision: Insight,
}
