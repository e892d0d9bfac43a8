//! Client for the FinBERT inference endpoint

use crate::config::SentifyConfig;
use crate::error::{Result, SentifyError};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Request body for a batch classification
#[derive(Debug, Serialize)]
struct FinBertRequest<'a> {
    texts: &'a [String],
}

/// Per-class probabilities as returned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FinBertScores {
    #[serde(default)]
    pub positive: f64,
    #[serde(default)]
    pub negative: f64,
    #[serde(default)]
    pub neutral: f64,
}

/// One classification; the label is lowercase on the wire
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FinBertPrediction {
    pub sentiment: String,
    pub confidence: f64,
    #[serde(default)]
    pub scores: Option<FinBertScores>,
}

/// FinBERT backend client
#[derive(Clone)]
pub struct FinBertClient {
    client: Client,
    endpoint: String,
}

impl FinBertClient {
    /// Create a client from configuration
    pub fn new(config: &SentifyConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}/api/sentiment/finbert",
                config.api_base.trim_end_matches('/')
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Classify a batch of texts in one request.
    ///
    /// The returned list is positionally aligned with `texts`. It may be
    /// shorter, and entries may be `None` where the backend returned `null`.
    pub async fn classify(&self, texts: &[String]) -> Result<Vec<Option<FinBertPrediction>>> {
        tracing::debug!(endpoint = %self.endpoint, count = texts.len(), "posting FinBERT batch");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&FinBertRequest { texts })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SentifyError::Api(format!("FinBERT request failed {status}: {body}")));
        }

        let body = response.text().await?;
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| SentifyError::MalformedResponse {
                model: "FinBERT".to_string(),
                reason: e.to_string(),
            })?;
        let predictions: Vec<Option<FinBertPrediction>> =
            entries.into_iter().enumerate().map(decode_entry).collect();

        if predictions.len() != texts.len() {
            tracing::warn!(
                expected = texts.len(),
                received = predictions.len(),
                "FinBERT returned a different number of results"
            );
        }

        Ok(predictions)
    }
}

/// One list entry; `null` and undecodable entries are absent
fn decode_entry((index, entry): (usize, serde_json::Value)) -> Option<FinBertPrediction> {
    if entry.is_null() {
        return None;
    }
    match serde_json::from_value(entry) {
        Ok(prediction) => Some(prediction),
        Err(e) => {
            tracing::warn!(index, error = %e, "skipping malformed FinBERT entry");
            None
        }
    }
}
