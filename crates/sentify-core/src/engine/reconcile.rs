//! Combine per-model opinions into one verdict per article

use crate::model::sentiment::clamp_confidence;
use crate::model::{ModelAvailability, ModelComparison, ModelResult, ReconciledVerdict, Sentiment};

/// Factor applied to the stronger confidence when the models disagree
pub const DISAGREEMENT_PENALTY: f64 = 0.7;

/// Confidence reported when no model produced a result
pub const UNAVAILABLE_CONFIDENCE: f64 = 0.5;

/// Reduce whatever the models produced for one article to a single verdict.
///
/// Pure and deterministic. On disagreement the more confident model wins
/// and Gemini wins ties.
pub fn reconcile(availability: ModelAvailability) -> ReconciledVerdict {
    match availability {
        ModelAvailability::Both { gemini, finbert } => {
            let comparison = compare(&gemini, &finbert);
            let explanation = if comparison.agreement {
                format!(
                    "Both models agree: {} sentiment detected with high confidence.",
                    comparison.final_sentiment
                )
            } else {
                format!(
                    "Models disagree: Gemini detected {}, FinBERT detected {}. Using higher confidence prediction.",
                    gemini.sentiment, finbert.sentiment
                )
            };

            ReconciledVerdict {
                sentiment: comparison.final_sentiment,
                confidence_score: comparison.final_confidence,
                explanation,
                gemini: Some(gemini),
                finbert: Some(finbert),
                comparison: Some(comparison),
            }
        }
        ModelAvailability::GeminiOnly(gemini) => ReconciledVerdict {
            sentiment: gemini.sentiment,
            confidence_score: clamp_confidence(gemini.confidence),
            explanation: "Analyzed by Gemini AI for financial sentiment.".to_string(),
            gemini: Some(gemini),
            finbert: None,
            comparison: None,
        },
        ModelAvailability::FinBertOnly(finbert) => ReconciledVerdict {
            sentiment: finbert.sentiment,
            confidence_score: clamp_confidence(finbert.confidence),
            explanation: "Analyzed by FinBERT specialized financial model.".to_string(),
            gemini: None,
            finbert: Some(finbert),
            comparison: None,
        },
        ModelAvailability::None => ReconciledVerdict {
            sentiment: Sentiment::Neutral,
            confidence_score: UNAVAILABLE_CONFIDENCE,
            explanation: "Analysis unavailable.".to_string(),
            gemini: None,
            finbert: None,
            comparison: None,
        },
    }
}

fn compare(gemini: &ModelResult, finbert: &ModelResult) -> ModelComparison {
    let agreement = gemini.sentiment == finbert.sentiment;

    let (final_sentiment, final_confidence) = if agreement {
        (gemini.sentiment, (gemini.confidence + finbert.confidence) / 2.0)
    } else {
        let winner = if finbert.confidence > gemini.confidence {
            finbert.sentiment
        } else {
            gemini.sentiment
        };
        (
            winner,
            gemini.confidence.max(finbert.confidence) * DISAGREEMENT_PENALTY,
        )
    };

    ModelComparison {
        agreement,
        agreement_score: if agreement { 1.0 } else { 0.0 },
        final_sentiment,
        final_confidence: clamp_confidence(final_confidence),
    }
}
