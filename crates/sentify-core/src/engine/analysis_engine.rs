//! Sentiment Analysis Engine - one "analyze" run from news to snapshot

use crate::api::{FinBertClient, MarketClient};
use crate::classifier::{FinBertClassifier, GeminiClassifier, SentimentClassifier, simulate};
use crate::config::{ModelSelection, SentifyConfig};
use crate::error::Result;
use crate::model::{
    AnalysisSummary, AnalyzedArticle, ModelAvailability, ModelPerformance, ModelResult, NewsItem,
    Sentiment, StockTicker, TimeRange,
};
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::aggregate::{self, ConfidenceBar, ConfidenceBucket, TimelinePoint};
use super::reconcile::reconcile;

/// Identifier of one analyze run
pub type RunId = u64;

/// How a run was (or will be) analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMode {
    LiveGemini,
    LiveFinBert,
    LiveBoth,
    /// Offline keyword heuristic, no model was called
    Simulated,
}

impl AnalysisMode {
    pub fn uses_gemini(self) -> bool {
        matches!(self, AnalysisMode::LiveGemini | AnalysisMode::LiveBoth)
    }

    pub fn uses_finbert(self) -> bool {
        matches!(self, AnalysisMode::LiveFinBert | AnalysisMode::LiveBoth)
    }

    pub fn is_simulated(self) -> bool {
        self == AnalysisMode::Simulated
    }

    /// Number of live models consulted
    pub fn model_count(self) -> usize {
        usize::from(self.uses_gemini()) + usize::from(self.uses_finbert())
    }

    pub fn label(self) -> &'static str {
        match self {
            AnalysisMode::LiveGemini => "Gemini",
            AnalysisMode::LiveFinBert => "FinBERT",
            AnalysisMode::LiveBoth => "Gemini + FinBERT",
            AnalysisMode::Simulated => "Simulation",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable result of one analyze run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSnapshot {
    pub run_id: RunId,
    pub symbol: String,
    pub time_range: TimeRange,
    pub mode: AnalysisMode,
    pub articles: Vec<AnalyzedArticle>,
    pub summary: AnalysisSummary,
    pub performance: ModelPerformance,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisSnapshot {
    /// No articles were found for the symbol and range
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Articles with the given label, or all of them
    pub fn filtered(&self, filter: Option<Sentiment>) -> Vec<&AnalyzedArticle> {
        self.articles
            .iter()
            .filter(|article| filter.is_none_or(|s| article.sentiment() == s))
            .collect()
    }

    pub fn timeline(&self) -> Vec<TimelinePoint> {
        aggregate::sentiment_timeline(&self.articles)
    }

    pub fn confidence_series(&self) -> Vec<ConfidenceBar> {
        aggregate::confidence_series(&self.articles)
    }

    /// Confidence distribution over all articles
    pub fn confidence_histogram(&self) -> Vec<ConfidenceBucket> {
        aggregate::confidence_histogram(&self.articles)
    }
}

/// Sentiment Analysis Engine
///
/// Owns the market client and the classifiers. Each call to
/// [`analyze`](Self::analyze) builds a fresh [`AnalysisSnapshot`]; nothing
/// from an earlier run is reused.
pub struct SentimentEngine {
    config: SentifyConfig,
    market: MarketClient,
    gemini: Option<Arc<dyn SentimentClassifier>>,
    finbert: Option<Arc<dyn SentimentClassifier>>,
}

impl SentimentEngine {
    /// Build the engine and its clients from configuration.
    ///
    /// The Gemini classifier is only created when an API key is configured.
    pub fn new(config: SentifyConfig) -> Result<Self> {
        config.validate()?;

        let market = MarketClient::new(&config)?;
        let finbert: Arc<dyn SentimentClassifier> =
            Arc::new(FinBertClassifier::new(FinBertClient::new(&config)?));
        let gemini = GeminiClassifier::from_config(&config)?
            .map(|classifier| Arc::new(classifier) as Arc<dyn SentimentClassifier>);

        if gemini.is_none() {
            tracing::info!("no Gemini API key configured, Gemini analysis unavailable");
        }

        Ok(Self {
            config,
            market,
            gemini,
            finbert: Some(finbert),
        })
    }

    /// Replace the Gemini classifier
    pub fn with_gemini(mut self, classifier: Option<Arc<dyn SentimentClassifier>>) -> Self {
        self.gemini = classifier;
        self
    }

    /// Replace the FinBERT classifier
    pub fn with_finbert(mut self, classifier: Option<Arc<dyn SentimentClassifier>>) -> Self {
        self.finbert = classifier;
        self
    }

    pub fn config(&self) -> &SentifyConfig {
        &self.config
    }

    pub fn market(&self) -> &MarketClient {
        &self.market
    }

    /// Whether a Gemini classifier is available at all
    pub fn has_gemini(&self) -> bool {
        self.gemini.is_some()
    }

    /// Decide how a run with `selection` will be analyzed.
    ///
    /// Falls back to simulation only when Gemini is unavailable and FinBERT
    /// was not requested.
    pub fn mode(&self, selection: ModelSelection) -> AnalysisMode {
        let gemini_live = selection.use_gemini() && self.gemini.is_some();
        match (gemini_live, selection.use_finbert()) {
            (true, true) => AnalysisMode::LiveBoth,
            (true, false) => AnalysisMode::LiveGemini,
            (false, true) => AnalysisMode::LiveFinBert,
            (false, false) => AnalysisMode::Simulated,
        }
    }

    /// Ticker search; empty on failure
    pub async fn search(&self, query: &str) -> Vec<StockTicker> {
        self.market.search(query).await
    }

    /// Company news; empty on failure
    pub async fn company_news(&self, symbol: &str, range: TimeRange) -> Vec<NewsItem> {
        self.market.company_news(symbol, range).await
    }

    /// Fetch news for `symbol` and analyze it
    pub async fn analyze(
        &self,
        run_id: RunId,
        symbol: &str,
        range: TimeRange,
        selection: ModelSelection,
    ) -> AnalysisSnapshot {
        let news = self.company_news(symbol, range).await;
        self.analyze_articles(run_id, symbol, range, selection, news).await
    }

    /// Analyze an already-fetched article list
    pub async fn analyze_articles(
        &self,
        run_id: RunId,
        symbol: &str,
        range: TimeRange,
        selection: ModelSelection,
        news: Vec<NewsItem>,
    ) -> AnalysisSnapshot {
        let mode = self.mode(selection);
        tracing::info!(run_id, symbol, range = %range, mode = %mode, articles = news.len(), "analysis run started");

        let mut rng = self.rng();

        let articles = if mode.is_simulated() {
            tracing::info!(run_id, "no live model available, running in simulation mode");
            simulate(&news, &mut rng)
        } else {
            // FinBERT first: a single batched request
            let finbert = if mode.uses_finbert() {
                run_classifier(self.finbert.as_deref(), &news).await
            } else {
                vec![None; news.len()]
            };
            let gemini = if mode.uses_gemini() {
                run_classifier(self.gemini.as_deref(), &news).await
            } else {
                vec![None; news.len()]
            };

            news.into_iter()
                .zip(gemini.into_iter().zip(finbert))
                .map(|(item, (gemini, finbert))| {
                    let verdict = reconcile(ModelAvailability::from_results(gemini, finbert));
                    AnalyzedArticle::new(item, verdict)
                })
                .collect()
        };

        let summary = aggregate::summarize(&articles);
        let performance = aggregate::evaluate_models(&articles, &summary, &mut rng);

        tracing::info!(
            run_id,
            symbol,
            total = summary.total_articles,
            mood = %summary.market_mood,
            "analysis run finished"
        );

        AnalysisSnapshot {
            run_id,
            symbol: symbol.trim().to_ascii_uppercase(),
            time_range: range,
            mode,
            articles,
            summary,
            performance,
            generated_at: Utc::now(),
        }
    }

    /// Seeded when the configuration pins a seed
    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Run one classifier, forcing the output to one slot per article
async fn run_classifier(
    classifier: Option<&dyn SentimentClassifier>,
    news: &[NewsItem],
) -> Vec<Option<ModelResult>> {
    let Some(classifier) = classifier else {
        return vec![None; news.len()];
    };

    let mut results = classifier.classify(news).await;
    if results.len() != news.len() {
        tracing::warn!(
            model = %classifier.kind(),
            expected = news.len(),
            received = results.len(),
            "classifier returned a misaligned result list"
        );
        results.resize(news.len(), None);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{MockSentimentClassifier, SIMULATED_EXPLANATION};
    use crate::model::{MarketMood, ModelKind};

    fn item(i: usize, title: &str) -> NewsItem {
        NewsItem {
            id: format!("n{i}"),
            title: title.to_string(),
            source: "Test".to_string(),
            published_at: "2025-02-01T08:00:00Z".to_string(),
            url: String::new(),
            summary: String::new(),
        }
    }

    fn engine() -> SentimentEngine {
        let config = SentifyConfig::builder()
            .api_base("http://127.0.0.1:9")
            .seed(11)
            .build()
            .unwrap();
        SentimentEngine::new(config).unwrap()
    }

    fn fixed(kind: ModelKind, results: Vec<Option<ModelResult>>) -> Arc<dyn SentimentClassifier> {
        let mut mock = MockSentimentClassifier::new();
        mock.expect_kind().return_const(kind);
        mock.expect_classify().times(1).return_const(results);
        Arc::new(mock)
    }

    fn unused(kind: ModelKind) -> Arc<dyn SentimentClassifier> {
        let mut mock = MockSentimentClassifier::new();
        mock.expect_kind().return_const(kind);
        mock.expect_classify().never();
        Arc::new(mock)
    }

    fn r(sentiment: Sentiment, confidence: f64) -> Option<ModelResult> {
        Some(ModelResult::new(sentiment, confidence))
    }

    #[test]
    fn test_mode_selection() {
        let engine = engine();
        assert!(!engine.has_gemini());
        assert_eq!(engine.mode(ModelSelection::gemini_only()), AnalysisMode::Simulated);
        assert_eq!(engine.mode(ModelSelection::finbert_only()), AnalysisMode::LiveFinBert);
        assert_eq!(engine.mode(ModelSelection::both()), AnalysisMode::LiveFinBert);

        let engine = engine.with_gemini(Some(unused(ModelKind::Gemini)));
        assert_eq!(engine.mode(ModelSelection::gemini_only()), AnalysisMode::LiveGemini);
        assert_eq!(engine.mode(ModelSelection::finbert_only()), AnalysisMode::LiveFinBert);
        assert_eq!(engine.mode(ModelSelection::both()), AnalysisMode::LiveBoth);
        assert_eq!(AnalysisMode::LiveBoth.model_count(), 2);
    }

    #[tokio::test]
    async fn test_simulated_run() {
        let engine = engine();
        let news = vec![item(0, "Shares rally to record"), item(1, "Plant closure, jobs cut")];

        let snapshot = engine
            .analyze_articles(1, "aapl", TimeRange::OneWeek, ModelSelection::gemini_only(), news)
            .await;

        assert_eq!(snapshot.mode, AnalysisMode::Simulated);
        assert_eq!(snapshot.symbol, "AAPL");
        assert_eq!(snapshot.articles[0].sentiment(), Sentiment::Positive);
        assert_eq!(snapshot.articles[1].sentiment(), Sentiment::Negative);
        assert!(snapshot.articles.iter().all(|a| a.verdict.explanation == SIMULATED_EXPLANATION));
        assert!(snapshot.performance.gemini.is_placeholder);
        assert!(snapshot.summary.model_agreement.is_none());
    }

    #[tokio::test]
    async fn test_both_models_reconciled() {
        let engine = engine()
            .with_gemini(Some(fixed(
                ModelKind::Gemini,
                vec![r(Sentiment::Positive, 0.8), r(Sentiment::Positive, 0.9), None],
            )))
            .with_finbert(Some(fixed(
                ModelKind::FinBert,
                vec![r(Sentiment::Positive, 0.6), r(Sentiment::Negative, 0.6), None],
            )));
        let news = vec![item(0, "a"), item(1, "b"), item(2, "c")];

        let snapshot = engine
            .analyze_articles(2, "MSFT", TimeRange::OneDay, ModelSelection::both(), news)
            .await;

        assert_eq!(snapshot.mode, AnalysisMode::LiveBoth);
        assert_eq!(snapshot.articles.len(), 3);
        assert!((snapshot.articles[0].confidence() - 0.7).abs() < 1e-9);
        assert!((snapshot.articles[1].confidence() - 0.63).abs() < 1e-9);
        assert_eq!(snapshot.articles[2].verdict.explanation, "Analysis unavailable.");
        assert!((snapshot.summary.model_agreement.unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(snapshot.summary.market_mood, MarketMood::Bullish);
    }

    #[tokio::test]
    async fn test_unselected_model_not_called() {
        let engine = engine()
            .with_gemini(Some(fixed(ModelKind::Gemini, vec![r(Sentiment::Negative, 0.9)])))
            .with_finbert(Some(unused(ModelKind::FinBert)));

        let snapshot = engine
            .analyze_articles(3, "TSLA", TimeRange::OneDay, ModelSelection::gemini_only(), vec![item(0, "x")])
            .await;

        assert_eq!(snapshot.mode, AnalysisMode::LiveGemini);
        assert!(snapshot.articles[0].verdict.finbert.is_none());
        assert!(snapshot.performance.finbert.is_placeholder);
        assert!(!snapshot.performance.gemini.is_placeholder);
    }

    #[tokio::test]
    async fn test_misaligned_classifier_padded() {
        let engine = engine().with_finbert(Some(fixed(ModelKind::FinBert, vec![r(Sentiment::Neutral, 0.55)])));
        let news = vec![item(0, "a"), item(1, "b")];

        let snapshot = engine
            .analyze_articles(4, "NVDA", TimeRange::OneDay, ModelSelection::finbert_only(), news)
            .await;

        assert_eq!(snapshot.articles.len(), 2);
        assert_eq!(snapshot.articles[0].confidence(), 0.55);
        assert_eq!(snapshot.articles[1].verdict.explanation, "Analysis unavailable.");
    }

    #[tokio::test]
    async fn test_empty_news_is_not_an_error() {
        let engine = engine();
        let snapshot = engine
            .analyze_articles(5, "ZZZZ", TimeRange::OneDay, ModelSelection::gemini_only(), Vec::new())
            .await;

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.summary.total_articles, 0);
        assert!(snapshot.timeline().is_empty());
    }

    #[test]
    fn test_snapshot_filter() {
        let engine = engine();
        let news = vec![item(0, "Stocks surge"), item(1, "Quarterly loss"), item(2, "Board meeting")];
        let snapshot = tokio_test::block_on(engine.analyze_articles(
            6,
            "AAPL",
            TimeRange::OneWeek,
            ModelSelection::gemini_only(),
            news,
        ));

        assert_eq!(snapshot.filtered(None).len(), 3);
        let negative = snapshot.filtered(Some(Sentiment::Negative));
        assert_eq!(negative.len(), 1);
        assert_eq!(negative[0].item.id, "n1");
    }
}
