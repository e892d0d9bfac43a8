//! Collection-level statistics over analyzed articles

use crate::model::{
    AnalysisSummary, AnalyzedArticle, MarketMood, ModelKind, ModelPerformance,
    ModelPerformanceMetrics, ModelResult, Sentiment, SentimentDistribution,
};
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Single-model results above this confidence count as correct
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Articles plotted on the sentiment timeline
pub const TIMELINE_LEN: usize = 15;

/// Articles shown in the confidence chart
pub const CONFIDENCE_SERIES_LEN: usize = 10;

/// One point of the signed sentiment timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// 1-based, oldest first
    pub index: usize,
    /// `+confidence`, `-confidence` or 0 for neutral
    pub score: f64,
    pub date: Option<NaiveDate>,
}

/// One bar of the per-article confidence chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBar {
    pub label: String,
    pub confidence: f64,
    pub sentiment: Sentiment,
}

/// One bucket of the confidence histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBucket {
    /// `0-20%`, `20-40%`, ...
    pub label: String,
    pub count: usize,
}

/// Upper bounds (exclusive) of the first four histogram buckets
const BUCKET_EDGES: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Fold the verdicts into counts, mood, mean confidence and agreement
pub fn summarize(articles: &[AnalyzedArticle]) -> AnalysisSummary {
    let mut distribution = SentimentDistribution::default();
    let mut confidence_sum = 0.0;
    let mut compared = 0usize;
    let mut agreed = 0usize;

    for article in articles {
        match article.sentiment() {
            Sentiment::Positive => distribution.positive += 1,
            Sentiment::Negative => distribution.negative += 1,
            Sentiment::Neutral => distribution.neutral += 1,
        }
        confidence_sum += article.confidence();

        if let Some(comparison) = &article.verdict.comparison {
            compared += 1;
            if comparison.agreement {
                agreed += 1;
            }
        }
    }

    let model_agreement = (compared > 0).then(|| agreed as f64 / compared as f64 * 100.0);

    AnalysisSummary {
        total_articles: articles.len(),
        distribution,
        average_confidence: confidence_sum / articles.len().max(1) as f64,
        market_mood: MarketMood::from_counts(distribution.positive, distribution.negative),
        model_agreement,
    }
}

/// Accuracy proxies for both models.
///
/// There is no ground truth: a result counts as correct when both models saw
/// the article and agreed, or when only one did and it was more than 70%
/// confident. All four ratios share that one value. Processing times are
/// synthetic. A model with no results gets fixed placeholder figures.
pub fn evaluate_models(
    articles: &[AnalyzedArticle],
    summary: &AnalysisSummary,
    rng: &mut impl Rng,
) -> ModelPerformance {
    ModelPerformance {
        gemini: evaluate(ModelKind::Gemini, articles, summary, rng),
        finbert: evaluate(ModelKind::FinBert, articles, summary, rng),
    }
}

fn evaluate(
    kind: ModelKind,
    articles: &[AnalyzedArticle],
    summary: &AnalysisSummary,
    rng: &mut impl Rng,
) -> ModelPerformanceMetrics {
    let mut observations = 0usize;
    let mut correct = 0usize;
    let mut confidence_sum = 0.0;
    let mut time_sum = 0.0;

    for article in articles {
        let Some(result) = model_result(kind, article) else {
            continue;
        };

        observations += 1;
        confidence_sum += result.confidence;
        time_sum += synthetic_latency(kind, rng);

        let is_correct = match &article.verdict.comparison {
            Some(comparison) => comparison.agreement,
            None => result.confidence > CONFIDENCE_THRESHOLD,
        };
        if is_correct {
            correct += 1;
        }
    }

    if observations == 0 {
        return placeholder(kind, summary);
    }

    let ratio = correct as f64 / observations as f64;
    ModelPerformanceMetrics {
        accuracy: ratio,
        precision: ratio,
        recall: ratio,
        f1_score: ratio,
        avg_confidence: confidence_sum / observations as f64,
        processing_time_secs: time_sum / observations as f64,
        observations,
        is_placeholder: false,
    }
}

fn model_result(kind: ModelKind, article: &AnalyzedArticle) -> Option<&ModelResult> {
    match kind {
        ModelKind::Gemini => article.verdict.gemini.as_ref(),
        ModelKind::FinBert => article.verdict.finbert.as_ref(),
    }
}

/// Seconds, drawn from a fixed per-model band
fn synthetic_latency(kind: ModelKind, rng: &mut impl Rng) -> f64 {
    match kind {
        ModelKind::Gemini => 2.0 + rng.random_range(0.0..1.5),
        ModelKind::FinBert => 1.5 + rng.random_range(0.0..1.0),
    }
}

fn placeholder(kind: ModelKind, summary: &AnalysisSummary) -> ModelPerformanceMetrics {
    match kind {
        ModelKind::Gemini => ModelPerformanceMetrics {
            accuracy: 0.87,
            precision: 0.84,
            recall: 0.82,
            f1_score: 0.83,
            avg_confidence: summary.average_confidence,
            processing_time_secs: 2.8,
            observations: 0,
            is_placeholder: true,
        },
        ModelKind::FinBert => ModelPerformanceMetrics {
            accuracy: 0.85,
            precision: 0.88,
            recall: 0.79,
            f1_score: 0.83,
            avg_confidence: 0.80,
            processing_time_secs: 2.1,
            observations: 0,
            is_placeholder: true,
        },
    }
}

/// Signed scores of the first articles, oldest first
pub fn sentiment_timeline(articles: &[AnalyzedArticle]) -> Vec<TimelinePoint> {
    articles
        .iter()
        .take(TIMELINE_LEN)
        .rev()
        .enumerate()
        .map(|(i, article)| TimelinePoint {
            index: i + 1,
            score: article.sentiment().sign() * article.confidence(),
            date: article.item.published_date(),
        })
        .collect()
}

/// Confidence of the first articles, labelled `News 1`, `News 2`, ...
pub fn confidence_series(articles: &[AnalyzedArticle]) -> Vec<ConfidenceBar> {
    articles
        .iter()
        .take(CONFIDENCE_SERIES_LEN)
        .enumerate()
        .map(|(i, article)| ConfidenceBar {
            label: format!("News {}", i + 1),
            confidence: article.confidence(),
            sentiment: article.sentiment(),
        })
        .collect()
}

/// Article counts in five confidence bands: below 0.2, then 0.2 wide
/// half-open bands, with everything from 0.8 up in the last one
pub fn confidence_histogram(articles: &[AnalyzedArticle]) -> Vec<ConfidenceBucket> {
    let mut counts = [0usize; BUCKET_EDGES.len() + 1];
    for article in articles {
        let confidence = article.confidence();
        let bucket = BUCKET_EDGES
            .iter()
            .position(|&edge| confidence < edge)
            .unwrap_or(BUCKET_EDGES.len());
        counts[bucket] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| ConfidenceBucket {
            label: format!("{}-{}%", i * 20, (i + 1) * 20),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::reconcile::reconcile;
    use crate::model::{ModelAvailability, NewsItem};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn item(i: usize) -> NewsItem {
        NewsItem {
            id: format!("n{i}"),
            title: format!("headline {i}"),
            source: "Test".to_string(),
            published_at: format!("2025-01-{:02}T10:00:00Z", i % 28 + 1),
            url: String::new(),
            summary: String::new(),
        }
    }

    fn article(i: usize, gemini: Option<ModelResult>, finbert: Option<ModelResult>) -> AnalyzedArticle {
        AnalyzedArticle::new(item(i), reconcile(ModelAvailability::from_results(gemini, finbert)))
    }

    fn r(sentiment: Sentiment, confidence: f64) -> Option<ModelResult> {
        Some(ModelResult::new(sentiment, confidence))
    }

    #[test]
    fn test_empty_input() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_articles, 0);
        assert_eq!(summary.distribution, SentimentDistribution::default());
        assert_eq!(summary.average_confidence, 0.0);
        assert_eq!(summary.market_mood, MarketMood::Neutral);
        assert!(summary.model_agreement.is_none());

        let perf = evaluate_models(&[], &summary, &mut StdRng::seed_from_u64(1));
        assert!(perf.gemini.is_placeholder);
        assert!(perf.finbert.is_placeholder);
        assert_eq!(perf.gemini.accuracy, 0.87);
        assert_eq!(perf.finbert.precision, 0.88);
    }

    #[test]
    fn test_agreement_percentage() {
        let articles: Vec<_> = (0..10)
            .map(|i| {
                let finbert = if i < 7 { Sentiment::Positive } else { Sentiment::Negative };
                article(i, r(Sentiment::Positive, 0.8), r(finbert, 0.6))
            })
            .collect();

        let summary = summarize(&articles);
        assert!((summary.model_agreement.unwrap() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_agreement_undefined_without_comparisons() {
        let articles = vec![article(0, r(Sentiment::Positive, 0.9), None)];
        assert!(summarize(&articles).model_agreement.is_none());
    }

    #[test]
    fn test_mood() {
        let make = |pos: usize, neg: usize| -> Vec<AnalyzedArticle> {
            (0..pos)
                .map(|i| article(i, r(Sentiment::Positive, 0.8), None))
                .chain((0..neg).map(|i| article(i, r(Sentiment::Negative, 0.8), None)))
                .collect()
        };

        assert_eq!(summarize(&make(5, 5)).market_mood, MarketMood::Neutral);
        assert_eq!(summarize(&make(6, 4)).market_mood, MarketMood::Bullish);
        assert_eq!(summarize(&make(2, 3)).market_mood, MarketMood::Bearish);
    }

    #[test]
    fn test_average_confidence() {
        let articles = vec![
            article(0, r(Sentiment::Positive, 0.8), None),
            article(1, None, r(Sentiment::Neutral, 0.4)),
        ];
        let summary = summarize(&articles);
        assert!((summary.average_confidence - 0.6).abs() < 1e-9);
        assert_eq!(summary.distribution.positive, 1);
        assert_eq!(summary.distribution.neutral, 1);
    }

    #[test]
    fn test_performance_correctness_proxy() {
        let articles = vec![
            // compared and agreeing: correct for both
            article(0, r(Sentiment::Positive, 0.8), r(Sentiment::Positive, 0.6)),
            // compared and disagreeing: wrong for both
            article(1, r(Sentiment::Positive, 0.9), r(Sentiment::Negative, 0.9)),
            // Gemini alone, confident: correct
            article(2, r(Sentiment::Negative, 0.75), None),
            // Gemini alone, exactly at the threshold: wrong
            article(3, r(Sentiment::Neutral, 0.7), None),
        ];
        let summary = summarize(&articles);
        let perf = evaluate_models(&articles, &summary, &mut StdRng::seed_from_u64(3));

        assert_eq!(perf.gemini.observations, 4);
        assert!((perf.gemini.accuracy - 0.5).abs() < 1e-9);
        assert_eq!(perf.gemini.accuracy, perf.gemini.f1_score);
        assert!(!perf.gemini.is_placeholder);
        assert!((2.0..3.5).contains(&perf.gemini.processing_time_secs));

        assert_eq!(perf.finbert.observations, 2);
        assert!((perf.finbert.accuracy - 0.5).abs() < 1e-9);
        assert!((perf.finbert.avg_confidence - 0.75).abs() < 1e-9);
        assert!((1.5..2.5).contains(&perf.finbert.processing_time_secs));
    }

    #[test]
    fn test_gemini_placeholder_uses_summary_confidence() {
        let articles = vec![article(0, None, r(Sentiment::Positive, 0.9))];
        let summary = summarize(&articles);
        let perf = evaluate_models(&articles, &summary, &mut StdRng::seed_from_u64(5));

        assert!(perf.gemini.is_placeholder);
        assert_eq!(perf.gemini.avg_confidence, summary.average_confidence);
        assert_eq!(perf.gemini.processing_time_secs, 2.8);
        assert!(!perf.finbert.is_placeholder);
    }

    #[test]
    fn test_timeline() {
        let articles: Vec<_> = (0..20)
            .map(|i| {
                let label = match i % 3 {
                    0 => Sentiment::Positive,
                    1 => Sentiment::Negative,
                    _ => Sentiment::Neutral,
                };
                article(i, r(label, 0.8), None)
            })
            .collect();

        let timeline = sentiment_timeline(&articles);
        assert_eq!(timeline.len(), 15);
        assert_eq!(timeline[0].index, 1);
        // oldest of the first fifteen comes first: article 14 (14 % 3 == 2, neutral)
        assert_eq!(timeline[0].score, 0.0);
        // last point is article 0 (positive)
        assert!((timeline[14].score - 0.8).abs() < 1e-9);
        // article 13 is negative
        assert!((timeline[1].score + 0.8).abs() < 1e-9);
        assert_eq!(timeline[14].date, NaiveDate::from_ymd_opt(2025, 1, 1));
    }

    #[test]
    fn test_confidence_series() {
        let articles: Vec<_> = (0..12).map(|i| article(i, r(Sentiment::Positive, 0.9), None)).collect();
        let series = confidence_series(&articles);
        assert_eq!(series.len(), 10);
        assert_eq!(series[0].label, "News 1");
        assert_eq!(series[9].label, "News 10");
        assert_eq!(series[3].sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_confidence_histogram_edges() {
        let confidences = [0.05, 0.19, 0.2, 0.39, 0.4, 0.6, 0.79, 0.8, 1.0];
        let articles: Vec<_> = confidences
            .iter()
            .enumerate()
            .map(|(i, &c)| article(i, r(Sentiment::Neutral, c), None))
            .collect();

        let histogram = confidence_histogram(&articles);
        let counts: Vec<usize> = histogram.iter().map(|b| b.count).collect();
        // 0.2 opens the second band, 0.8 belongs to the last
        assert_eq!(counts, vec![2, 2, 1, 2, 2]);
        assert_eq!(histogram[0].label, "0-20%");
        assert_eq!(histogram[4].label, "80-100%");
    }

    #[test]
    fn test_confidence_histogram_empty() {
        let histogram = confidence_histogram(&[]);
        assert_eq!(histogram.len(), 5);
        assert!(histogram.iter().all(|b| b.count == 0));
    }
}
