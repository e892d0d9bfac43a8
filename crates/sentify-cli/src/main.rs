//! Sentify CLI
//!
//! Terminal front end for dual-model news sentiment analysis.
//!
//! # Usage
//!
//! ```bash
//! # Backend serving /api/search, /api/news and /api/sentiment/finbert
//! export SENTIFY_API_BASE="http://localhost:5000"
//! # Optional, enables Gemini
//! export GEMINI_API_KEY="..."
//! # Optional default model selection, overridden by --gemini/--no-gemini/--finbert
//! export SENTIFY_USE_GEMINI=true
//! export SENTIFY_USE_FINBERT=false
//!
//! sentify search apple
//! sentify news AAPL --range 1m
//! sentify analyze AAPL --range 1w --finbert --filter negative
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use sentify_core::interface::{render_news, render_snapshot, render_tickers};
use sentify_core::{
    DashboardSession, ModelSelection, Sentiment, SentifyConfig, SentimentEngine, TimeRange,
};
use sentify_utils::LogFormat;

const DEFAULT_LOG_DIRECTIVE: &str = "warn,sentify_core=info";

#[derive(Parser, Debug)]
#[command(name = "sentify")]
#[command(about = "News sentiment analysis with Gemini and FinBERT", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search tickers by symbol or company name
    Search {
        /// Search text; empty lists everything the backend offers
        #[arg(default_value = "")]
        query: String,
    },

    /// List company news without analyzing it
    News {
        symbol: String,

        /// Look-back window: 1d, 1w, 2w, 1m, 3m, 6m, 1y, 3y or 5y
        #[arg(short, long)]
        range: Option<TimeRange>,
    },

    /// Analyze company news sentiment
    Analyze {
        symbol: String,

        /// Look-back window: 1d, 1w, 2w, 1m, 3m, 6m, 1y, 3y or 5y
        #[arg(short, long)]
        range: Option<TimeRange>,

        /// Use Gemini even when SENTIFY_USE_GEMINI turns it off
        #[arg(long, overrides_with = "no_gemini")]
        gemini: bool,

        /// Skip Gemini
        #[arg(long, overrides_with = "gemini")]
        no_gemini: bool,

        /// Also run FinBERT
        #[arg(long)]
        finbert: bool,

        /// Only list articles with this label
        #[arg(long)]
        filter: Option<Sentiment>,

        /// Print the snapshot as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
}

/// Resolve the model flags against the configured default
fn model_selection(
    defaults: ModelSelection,
    gemini: bool,
    no_gemini: bool,
    finbert: bool,
) -> sentify_core::Result<ModelSelection> {
    let use_gemini = if no_gemini {
        false
    } else {
        gemini || defaults.use_gemini()
    };
    ModelSelection::new(use_gemini, finbert || defaults.use_finbert())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    sentify_utils::init_tracing_with(DEFAULT_LOG_DIRECTIVE, format);

    let config = SentifyConfig::from_env().context("invalid configuration")?;
    let default_range = config.default_time_range;
    let default_models = config.models;
    let engine = SentimentEngine::new(config).context("failed to build sentiment engine")?;

    match cli.command {
        Command::Search { query } => {
            let tickers = engine.search(&query).await;
            println!("{}", render_tickers(&tickers));
        }
        Command::News { symbol, range } => {
            let range = range.unwrap_or(default_range);
            let items = engine.company_news(&symbol, range).await;
            println!("{}", render_news(&items));
        }
        Command::Analyze {
            symbol,
            range,
            gemini,
            no_gemini,
            finbert,
            filter,
            json,
        } => {
            let selection = model_selection(default_models, gemini, no_gemini, finbert)
                .context("no model selected")?;
            let session = DashboardSession::new(range.unwrap_or(default_range), selection);

            let ticket = session.begin_run();
            tracing::info!(session = %session.id(), run_id = ticket.id(), %symbol, "starting analysis");
            let snapshot = engine
                .analyze(ticket.id(), &symbol, session.time_range(), session.selection())
                .await;
            session.publish(ticket, snapshot)?;

            let Some(snapshot) = session.current() else {
                anyhow::bail!("analysis produced no snapshot");
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&*snapshot)?);
            } else {
                println!("{}", render_snapshot(&snapshot, filter));
            }
        }
    }

    Ok(())
}
