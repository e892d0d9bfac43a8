//! Domain types shared by the adapters, the reconciler and the aggregator

pub mod news;
pub mod sentiment;
pub mod summary;
pub mod verdict;

pub use news::{NewsItem, StockTicker, TimeRange};
pub use sentiment::{ClassScores, ModelKind, ModelResult, Sentiment};
pub use summary::{
    AnalysisSummary, Insight, MarketMood, ModelInsights, ModelPerformance, ModelPerformanceMetrics,
    SentimentDistribution,
};
pub use verdict::{AnalyzedArticle, ModelAvailability, ModelComparison, ReconciledVerdict};
