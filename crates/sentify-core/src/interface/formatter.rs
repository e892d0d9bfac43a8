//! Terminal rendering of analyses, tickers and news lists

use crate::engine::{AnalysisMode, AnalysisSnapshot, ConfidenceBar, ConfidenceBucket, TimelinePoint};
use crate::model::{
    AnalysisSummary, AnalyzedArticle, MarketMood, ModelPerformance, ModelPerformanceMetrics,
    NewsItem, Sentiment, StockTicker,
};
use crate::prompts::truncate_chars;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use std::fmt::Write;

const TITLE_WIDTH: usize = 70;

/// Shown above every simulated analysis
pub const SIMULATION_BANNER: &str =
    "SIMULATION MODE: no live model was available, verdicts come from a local keyword heuristic.";

fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::Green,
        Sentiment::Negative => Color::Red,
        Sentiment::Neutral => Color::Yellow,
    }
}

fn mood_color(mood: MarketMood) -> Color {
    match mood {
        MarketMood::Bullish => Color::Green,
        MarketMood::Bearish => Color::Red,
        MarketMood::Neutral => Color::Yellow,
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn short_title(title: &str) -> String {
    let cut = truncate_chars(title, TITLE_WIDTH);
    if cut.len() < title.len() {
        format!("{cut}...")
    } else {
        cut.to_string()
    }
}

/// Full report for one snapshot. `filter` limits the article table.
pub fn render_snapshot(snapshot: &AnalysisSnapshot, filter: Option<Sentiment>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} | range {} | mode {} | run #{} | {}",
        snapshot.symbol,
        snapshot.time_range.label(),
        snapshot.mode,
        snapshot.run_id,
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    if snapshot.mode.is_simulated() {
        let _ = writeln!(out, "{SIMULATION_BANNER}");
    }
    out.push('\n');

    if snapshot.is_empty() {
        let _ = writeln!(out, "No news found for {} in the selected range.", snapshot.symbol);
        return out;
    }

    let _ = writeln!(out, "{}\n", summary_table(&snapshot.summary, snapshot.mode));
    let _ = writeln!(out, "{}\n", distribution_table(&snapshot.summary));
    if !snapshot.mode.is_simulated() {
        let _ = writeln!(out, "{}\n", performance_table(&snapshot.performance, snapshot.mode));
    }
    if snapshot.mode == AnalysisMode::LiveBoth {
        let _ = writeln!(out, "{}\n", insights_table(&snapshot.performance));
    }

    let articles = snapshot.filtered(filter);
    match filter {
        Some(sentiment) => {
            let _ = writeln!(out, "Articles ({sentiment} only, {} of {}):", articles.len(), snapshot.articles.len());
        }
        None => {
            let _ = writeln!(out, "Articles ({}):", articles.len());
        }
    }
    let _ = writeln!(out, "{}\n", articles_table(&articles));
    let _ = writeln!(out, "Confidence by article:\n{}\n", confidence_table(&snapshot.confidence_series()));
    let _ = writeln!(out, "Confidence distribution:\n{}\n", histogram_table(&snapshot.confidence_histogram()));
    let _ = writeln!(out, "Sentiment timeline:\n{}", timeline_table(&snapshot.timeline()));

    out
}

/// KPI header: mood, total, average confidence, agreement
pub fn summary_table(summary: &AnalysisSummary, mode: AnalysisMode) -> Table {
    let mut table = table();
    table.set_header(vec!["Market Mood", "Articles", "Avg Confidence", "Model Agreement", "Models"]);

    let agreement = summary
        .model_agreement
        .map_or_else(|| "n/a".to_string(), |pct| format!("{pct:.1}%"));
    let models = if mode.is_simulated() {
        "simulated".to_string()
    } else {
        mode.model_count().to_string()
    };

    table.add_row(vec![
        Cell::new(summary.market_mood).fg(mood_color(summary.market_mood)),
        Cell::new(summary.total_articles),
        Cell::new(percent(summary.average_confidence)),
        Cell::new(agreement),
        Cell::new(models),
    ]);
    table
}

/// Per-class counts and shares
pub fn distribution_table(summary: &AnalysisSummary) -> Table {
    let mut table = table();
    table.set_header(vec!["Sentiment", "Count", "Share"]);

    let total = summary.distribution.total().max(1) as f64;
    for (sentiment, count) in [
        (Sentiment::Positive, summary.distribution.positive),
        (Sentiment::Neutral, summary.distribution.neutral),
        (Sentiment::Negative, summary.distribution.negative),
    ] {
        table.add_row(vec![
            Cell::new(sentiment).fg(sentiment_color(sentiment)),
            Cell::new(count).set_alignment(CellAlignment::Right),
            Cell::new(percent(count as f64 / total)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn metric_cells(metrics: &ModelPerformanceMetrics) -> Vec<Cell> {
    let mut cells = vec![
        Cell::new(percent(metrics.accuracy)),
        Cell::new(percent(metrics.precision)),
        Cell::new(percent(metrics.recall)),
        Cell::new(percent(metrics.f1_score)),
        Cell::new(percent(metrics.avg_confidence)),
        Cell::new(format!("{:.2}s", metrics.processing_time_secs)),
    ];
    let note = if metrics.is_placeholder {
        "placeholder".to_string()
    } else {
        format!("{} results", metrics.observations)
    };
    cells.push(Cell::new(note));
    cells
}

/// Accuracy proxies for the models used in this run
pub fn performance_table(performance: &ModelPerformance, mode: AnalysisMode) -> Table {
    let mut table = table();
    table.set_header(vec![
        "Model", "Accuracy", "Precision", "Recall", "F1", "Avg Confidence", "Time", "Basis",
    ]);

    let rows = [
        (mode.uses_gemini(), "Gemini", &performance.gemini),
        (mode.uses_finbert(), "FinBERT", &performance.finbert),
    ];
    for (used, name, metrics) in rows {
        if !used {
            continue;
        }
        let mut row = vec![Cell::new(name)];
        row.extend(metric_cells(metrics));
        table.add_row(row);
    }
    table
}

/// Head-to-head leaders between the two models
pub fn insights_table(performance: &ModelPerformance) -> Table {
    let insights = performance.insights();
    let mut table = table();
    table.set_header(vec!["Best Accuracy", "Fastest", "Best Precision"]);
    table.add_row(vec![
        Cell::new(format!(
            "{} ({} correct)",
            insights.best_accuracy.model,
            percent(insights.best_accuracy.value)
        )),
        Cell::new(format!(
            "{} ({:.2}s)",
            insights.fastest.model, insights.fastest.value
        )),
        Cell::new(format!(
            "{} ({} precision)",
            insights.best_precision.model,
            percent(insights.best_precision.value)
        )),
    ]);
    table
}

/// One row per article with its verdict
pub fn articles_table(articles: &[&AnalyzedArticle]) -> Table {
    let mut table = table();
    table.set_header(vec!["#", "Sentiment", "Confidence", "Source", "Headline", "Explanation"]);

    for (i, article) in articles.iter().enumerate() {
        let sentiment = article.sentiment();
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(sentiment).fg(sentiment_color(sentiment)),
            Cell::new(percent(article.confidence())).set_alignment(CellAlignment::Right),
            Cell::new(&article.item.source),
            Cell::new(short_title(&article.item.title)),
            Cell::new(&article.verdict.explanation),
        ]);
    }
    table
}

pub fn confidence_table(bars: &[ConfidenceBar]) -> Table {
    let mut table = table();
    table.set_header(vec!["Article", "Sentiment", "Confidence"]);
    for bar in bars {
        table.add_row(vec![
            Cell::new(&bar.label),
            Cell::new(bar.sentiment).fg(sentiment_color(bar.sentiment)),
            Cell::new(percent(bar.confidence)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn histogram_table(buckets: &[ConfidenceBucket]) -> Table {
    let mut table = table();
    table.set_header(vec!["Confidence", "Articles"]);
    for bucket in buckets {
        table.add_row(vec![
            Cell::new(&bucket.label),
            Cell::new(bucket.count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn timeline_table(points: &[TimelinePoint]) -> Table {
    let mut table = table();
    table.set_header(vec!["#", "Date", "Score"]);
    for point in points {
        let date = point
            .date
            .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());
        let color = if point.score > 0.0 {
            Color::Green
        } else if point.score < 0.0 {
            Color::Red
        } else {
            Color::Yellow
        };
        table.add_row(vec![
            Cell::new(point.index),
            Cell::new(date),
            Cell::new(format!("{:+.2}", point.score)).fg(color).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Ticker search results
pub fn render_tickers(tickers: &[StockTicker]) -> String {
    if tickers.is_empty() {
        return "No matching tickers.".to_string();
    }

    let mut table = table();
    table.set_header(vec!["Symbol", "Name", "Price", "Change"]);
    for ticker in tickers {
        let color = if ticker.change < 0.0 { Color::Red } else { Color::Green };
        table.add_row(vec![
            Cell::new(&ticker.symbol),
            Cell::new(&ticker.name),
            Cell::new(format!("{:.2}", ticker.price)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:+.2}%", ticker.change)).fg(color).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

/// Plain news list, before analysis
pub fn render_news(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return "No news found.".to_string();
    }

    let mut table = table();
    table.set_header(vec!["#", "Published", "Source", "Headline"]);
    for (i, item) in items.iter().enumerate() {
        let published = item
            .published_date()
            .map_or_else(|| item.published_at.clone(), |d| d.format("%Y-%m-%d").to_string());
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(published),
            Cell::new(&item.source),
            Cell::new(short_title(&item.title)),
        ]);
    }
    table.to_string()
}
