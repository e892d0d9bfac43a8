//! HTTP clients for the market and FinBERT backend

pub mod finbert;
pub mod market;

pub use finbert::{FinBertClient, FinBertPrediction, FinBertScores};
pub use market::MarketClient;
