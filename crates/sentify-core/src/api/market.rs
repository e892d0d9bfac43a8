//! Client for the market backend: ticker search and company news

use crate::cache::{NewsCache, NewsKey};
use crate::config::SentifyConfig;
use crate::error::{Result, SentifyError};
use crate::model::{NewsItem, StockTicker, TimeRange};
use reqwest::Client;

/// Market backend client
///
/// The `fetch_*` methods surface every failure. [`search`](Self::search) and
/// [`company_news`](Self::company_news) log failures and return an empty list.
#[derive(Clone)]
pub struct MarketClient {
    client: Client,
    base_url: String,
    news_cache: NewsCache,
}

impl MarketClient {
    /// Create a client from configuration
    pub fn new(config: &SentifyConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            news_cache: NewsCache::new(config.cache_ttl_news),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shared news cache
    pub fn news_cache(&self) -> &NewsCache {
        &self.news_cache
    }

    /// Search tickers by symbol or company name
    pub async fn fetch_tickers(&self, query: &str) -> Result<Vec<StockTicker>> {
        let url = format!("{}/api/search", self.base_url);
        let mut request = self.client.get(&url);
        let query = query.trim();
        if !query.is_empty() {
            request = request.query(&[("q", query)]);
        }

        tracing::debug!(%url, query, "searching tickers");
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SentifyError::Api(format!("ticker search failed {status}: {body}")));
        }

        Ok(response.json::<Vec<StockTicker>>().await?)
    }

    /// Fetch news for `symbol` over `range`, going through the cache
    pub async fn fetch_company_news(&self, symbol: &str, range: TimeRange) -> Result<Vec<NewsItem>> {
        let key = NewsKey::new(symbol, range);
        self.news_cache
            .get_or_fetch(key.clone(), || self.request_news(key))
            .await
    }

    async fn request_news(&self, key: NewsKey) -> Result<Vec<NewsItem>> {
        let url = format!("{}/api/news", self.base_url);

        tracing::debug!(%url, symbol = %key.symbol, range = %key.range, "fetching company news");
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", key.symbol.as_str()), ("range", key.range.code())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SentifyError::Api(format!("news request failed {status}: {body}")));
        }

        Ok(response.json::<Vec<NewsItem>>().await?)
    }

    /// Ticker search; failures yield an empty list
    pub async fn search(&self, query: &str) -> Vec<StockTicker> {
        match self.fetch_tickers(query).await {
            Ok(tickers) => tickers,
            Err(e) => {
                tracing::warn!(query, error = %e, "ticker search failed");
                Vec::new()
            }
        }
    }

    /// Company news; failures yield an empty list
    pub async fn company_news(&self, symbol: &str, range: TimeRange) -> Vec<NewsItem> {
        match self.fetch_company_news(symbol, range).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(symbol, range = %range, error = %e, "company news fetch failed");
                Vec::new()
            }
        }
    }
}
