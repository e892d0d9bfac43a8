//! Sentiment classifiers
//!
//! Each adapter turns one external model's raw output into [`ModelResult`]s.
//! A classifier never fails as a whole: anything that goes wrong for an
//! article shows up as `None` in that article's slot.

pub mod finbert;
pub mod gemini;
pub mod simulation;

pub use finbert::FinBertClassifier;
pub use gemini::GeminiClassifier;
pub use simulation::{SIMULATED_EXPLANATION, simulate, simulate_one};

use crate::model::{ModelKind, ModelResult, NewsItem};
use async_trait::async_trait;

/// A model that labels news articles
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Model family behind this classifier
    fn kind(&self) -> ModelKind;

    /// Classify `items`.
    ///
    /// The result has exactly one slot per input item, in input order.
    async fn classify(&self, items: &[NewsItem]) -> Vec<Option<ModelResult>>;
}
