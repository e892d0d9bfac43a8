//! Dual-model news sentiment analysis
//!
//! This crate fetches company news and labels each article Positive,
//! Negative or Neutral with one or two models:
//!
//! - Gemini, a generative model asked for structured JSON output
//! - FinBERT, a fine-tuned financial classifier served over HTTP
//!
//! Per-article opinions are reconciled into one confidence-weighted verdict
//! and folded into collection statistics (mood, model agreement, accuracy
//! proxies). When no live model is available a keyword simulation runs
//! instead and the result says so.
//!
//! # Architecture
//!
//! - [`classifier`]: adapters behind the [`SentimentClassifier`] trait
//! - [`engine::reconcile`]: combines Gemini and FinBERT results per article
//! - [`engine::aggregate`]: summary, performance proxies, chart series
//! - [`SentimentEngine`]: runs a whole analysis and returns an immutable
//!   [`AnalysisSnapshot`]
//! - [`DashboardSession`]: holds the displayed snapshot and drops results of
//!   superseded runs
//!
//! # Example
//!
//! ```rust,ignore
//! use sentify_core::{DashboardSession, ModelSelection, SentifyConfig, SentimentEngine, TimeRange};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = SentimentEngine::new(SentifyConfig::from_env()?)?;
//!     let session = DashboardSession::default();
//!
//!     let ticket = session.begin_run();
//!     let snapshot = engine
//!         .analyze(ticket.id(), "AAPL", TimeRange::OneWeek, ModelSelection::both())
//!         .await;
//!     session.publish(ticket, snapshot)?;
//!
//!     if let Some(current) = session.current() {
//!         println!("{}", sentify_core::interface::render_snapshot(&current, None));
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod model;
pub mod prompts;

// Re-export main types for convenience
pub use api::{FinBertClient, MarketClient};
pub use classifier::{FinBertClassifier, GeminiClassifier, SentimentClassifier};
pub use config::{ModelSelection, SentifyConfig};
pub use engine::{AnalysisMode, AnalysisSnapshot, RunId, SentimentEngine};
pub use error::{Result, SentifyError};
pub use interface::{DashboardSession, RunTicket};
pub use model::{
    AnalysisSummary, AnalyzedArticle, MarketMood, ModelAvailability, ModelKind, ModelPerformance,
    ModelPerformanceMetrics, ModelResult, NewsItem, ReconciledVerdict, Sentiment, StockTicker,
    TimeRange,
};
