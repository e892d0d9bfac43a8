//! Sentiment labels and per-model results

use crate::error::{Result, SentifyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three sentiment classes every model is normalized to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Canonical capitalized label
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// +1 / -1 / 0, used for signed timeline scores
    pub fn sign(self) -> f64 {
        match self {
            Sentiment::Positive => 1.0,
            Sentiment::Negative => -1.0,
            Sentiment::Neutral => 0.0,
        }
    }
}

impl FromStr for Sentiment {
    type Err = SentifyError;

    /// Case-insensitive; accepts `positive`, `NEGATIVE`, `Neutral`, ...
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(SentifyError::InvalidSentiment(s.to_string())),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model family that produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// Generative model judging from a prompt
    Gemini,
    /// Fine-tuned financial text classifier
    FinBert,
}

impl ModelKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Gemini => "Gemini",
            ModelKind::FinBert => "FinBERT",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Per-class probabilities reported by a classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl ClassScores {
    /// Build scores, forcing each into `[0, ∞)`
    pub fn new(positive: f64, negative: f64, neutral: f64) -> Self {
        let non_negative = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            positive: non_negative(positive),
            negative: non_negative(negative),
            neutral: non_negative(neutral),
        }
    }

    /// Score for one class
    pub fn get(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }
}

/// One model's opinion on one article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    pub sentiment: Sentiment,
    /// Always within `[0, 1]`
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<ClassScores>,
    /// The model's own one-line justification, when it gives one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl ModelResult {
    /// Create a result; `confidence` is clamped to `[0, 1]` and a non-finite
    /// value becomes 0.5.
    pub fn new(sentiment: Sentiment, confidence: f64) -> Self {
        Self {
            sentiment,
            confidence: clamp_confidence(confidence),
            scores: None,
            rationale: None,
        }
    }

    pub fn with_scores(mut self, scores: ClassScores) -> Self {
        self.scores = Some(scores);
        self
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        let rationale = rationale.into();
        if !rationale.trim().is_empty() {
            self.rationale = Some(rationale);
        }
        self
    }
}

/// Clamp a confidence into `[0, 1]`
pub(crate) fn clamp_confidence(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.5
    }
}
