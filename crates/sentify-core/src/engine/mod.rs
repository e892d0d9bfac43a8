//! Sentiment Analysis Engine
//!
//! Reconciles per-model opinions, aggregates them and runs whole analyses.

pub mod aggregate;
pub mod analysis_engine;
pub mod reconcile;

pub use aggregate::{
    ConfidenceBar, ConfidenceBucket, TimelinePoint, confidence_histogram, confidence_series,
    evaluate_models, sentiment_timeline, summarize,
};
pub use analysis_engine::{AnalysisMode, AnalysisSnapshot, RunId, SentimentEngine};
pub use reconcile::reconcile;
