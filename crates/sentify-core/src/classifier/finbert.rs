//! FinBERT adapter: one batched request per run

use super::SentimentClassifier;
use crate::api::{FinBertClient, FinBertPrediction};
use crate::model::{ClassScores, ModelKind, ModelResult, NewsItem, Sentiment};
use crate::prompts;
use async_trait::async_trait;

/// Classifies a whole article list with one FinBERT call
pub struct FinBertClassifier {
    client: FinBertClient,
}

impl FinBertClassifier {
    pub fn new(client: FinBertClient) -> Self {
        Self { client }
    }
}

/// Map one wire prediction; unknown labels yield `None`
fn to_model_result(prediction: FinBertPrediction) -> Option<ModelResult> {
    let sentiment = match prediction.sentiment.parse::<Sentiment>() {
        Ok(sentiment) => sentiment,
        Err(e) => {
            tracing::warn!(error = %e, "FinBERT returned an unknown label");
            return None;
        }
    };

    let mut result = ModelResult::new(sentiment, prediction.confidence);
    if let Some(scores) = prediction.scores {
        result = result.with_scores(ClassScores::new(scores.positive, scores.negative, scores.neutral));
    }
    Some(result)
}

#[async_trait]
impl SentimentClassifier for FinBertClassifier {
    fn kind(&self) -> ModelKind {
        ModelKind::FinBert
    }

    async fn classify(&self, items: &[NewsItem]) -> Vec<Option<ModelResult>> {
        if items.is_empty() {
            return Vec::new();
        }

        let texts: Vec<String> = items.iter().map(prompts::finbert_text).collect();
        let predictions = match self.client.classify(&texts).await {
            Ok(predictions) => predictions,
            Err(e) => {
                tracing::warn!(count = items.len(), error = %e, "FinBERT batch analysis failed");
                return vec![None; items.len()];
            }
        };

        let mut predictions = predictions.into_iter();
        let results: Vec<Option<ModelResult>> = items
            .iter()
            .map(|_| predictions.next().flatten().and_then(to_model_result))
            .collect();

        tracing::debug!(
            analyzed = results.iter().flatten().count(),
            total = items.len(),
            "FinBERT batch complete"
        );
        results
    }
}
