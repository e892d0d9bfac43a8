//! Generative-model adapter

use super::SentimentClassifier;
use crate::config::SentifyConfig;
use crate::error::{Result, SentifyError};
use crate::model::{ModelKind, ModelResult, NewsItem, Sentiment};
use crate::prompts;
use async_trait::async_trait;
use sentify_llm::providers::{GeminiConfig, GeminiProvider};
use sentify_llm::{CompletionRequest, LLMProvider, Message};
use serde::Deserialize;
use std::sync::Arc;

/// Confidence used when the model omits one or reports zero
const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Output tokens allowed per article
const MAX_OUTPUT_TOKENS: usize = 256;

/// Structured answer requested from the model
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiVerdict {
    sentiment: String,
    #[serde(default)]
    confidence_score: Option<f64>,
    #[serde(default)]
    explanation: Option<String>,
}

/// Classifies articles one by one through an [`LLMProvider`]
pub struct GeminiClassifier {
    provider: Arc<dyn LLMProvider>,
    model: String,
}

impl GeminiClassifier {
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Build a Gemini-backed classifier, or `None` when no key is configured
    pub fn from_config(config: &SentifyConfig) -> Result<Option<Self>> {
        let Some(gemini) = provider_config(config) else {
            return Ok(None);
        };
        let provider = GeminiProvider::with_config(gemini)?;

        Ok(Some(Self::new(Arc::new(provider), config.gemini_model.clone())))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model about one article
    pub async fn classify_one(&self, item: &NewsItem) -> Result<ModelResult> {
        let request = CompletionRequest::builder(&self.model)
            .system(prompts::system_prompt())
            .add_message(Message::user(prompts::sentiment_prompt(item)?))
            .max_tokens(MAX_OUTPUT_TOKENS)
            .temperature(0.0)
            .json_schema(prompts::sentiment_schema())
            .build();

        let text = self.provider.complete_text(request).await?;
        parse_verdict(&text)
    }
}

/// Provider settings derived from the engine configuration
fn provider_config(config: &SentifyConfig) -> Option<GeminiConfig> {
    let api_key = config.gemini_api_key.as_deref().filter(|k| !k.trim().is_empty())?;

    let mut gemini = GeminiConfig::new(api_key).with_timeout(config.gemini_timeout.as_secs());
    if let Some(base) = &config.gemini_api_base {
        gemini = gemini.with_api_base(base.clone());
    }
    Some(gemini)
}

/// Turn the model's JSON answer into a result
fn parse_verdict(text: &str) -> Result<ModelResult> {
    let malformed = |reason: String| SentifyError::MalformedResponse {
        model: ModelKind::Gemini.to_string(),
        reason,
    };

    let verdict: GeminiVerdict =
        serde_json::from_str(text.trim()).map_err(|e| malformed(e.to_string()))?;
    let sentiment: Sentiment = verdict
        .sentiment
        .parse()
        .map_err(|_| malformed(format!("unknown sentiment label {:?}", verdict.sentiment)))?;

    let confidence = match verdict.confidence_score {
        Some(score) if score != 0.0 && score.is_finite() => score,
        _ => DEFAULT_CONFIDENCE,
    };

    let mut result = ModelResult::new(sentiment, confidence);
    if let Some(explanation) = verdict.explanation {
        result = result.with_rationale(explanation);
    }
    Ok(result)
}

#[async_trait]
impl SentimentClassifier for GeminiClassifier {
    fn kind(&self) -> ModelKind {
        ModelKind::Gemini
    }

    async fn classify(&self, items: &[NewsItem]) -> Vec<Option<ModelResult>> {
        let mut results = Vec::with_capacity(items.len());

        // One request in flight at a time
        for item in items {
            match self.classify_one(item).await {
                Ok(result) => results.push(Some(result)),
                Err(e) => {
                    tracing::warn!(article = %item.id, error = %e, "Gemini analysis failed");
                    results.push(None);
                }
            }
        }

        tracing::debug!(
            analyzed = results.iter().flatten().count(),
            total = items.len(),
            "Gemini batch complete"
        );
        results
    }
}
