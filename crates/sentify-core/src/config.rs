//! Configuration for sentiment analysis runs

use crate::error::{Result, SentifyError};
use crate::model::TimeRange;
use serde::{Deserialize, Serialize};
use sentify_utils::{env_flag, env_parse, env_var};
use std::time::Duration;

/// Default market/FinBERT backend
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Default generative model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Which classifiers a run asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSelection {
    use_gemini: bool,
    use_finbert: bool,
}

impl ModelSelection {
    /// At least one model has to be selected
    pub fn new(use_gemini: bool, use_finbert: bool) -> Result<Self> {
        if !use_gemini && !use_finbert {
            return Err(SentifyError::Config(
                "at least one model (Gemini or FinBERT) must be selected".to_string(),
            ));
        }
        Ok(Self {
            use_gemini,
            use_finbert,
        })
    }

    pub fn gemini_only() -> Self {
        Self {
            use_gemini: true,
            use_finbert: false,
        }
    }

    pub fn finbert_only() -> Self {
        Self {
            use_gemini: false,
            use_finbert: true,
        }
    }

    pub fn both() -> Self {
        Self {
            use_gemini: true,
            use_finbert: true,
        }
    }

    pub fn use_gemini(&self) -> bool {
        self.use_gemini
    }

    pub fn use_finbert(&self) -> bool {
        self.use_finbert
    }
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self::gemini_only()
    }
}

/// Configuration for the sentiment engine and its HTTP clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentifyConfig {
    /// Base URL of the market and FinBERT backend
    pub api_base: String,

    /// Gemini API key; without one the Gemini adapter is unavailable
    pub gemini_api_key: Option<String>,

    /// Gemini model identifier
    pub gemini_model: String,

    /// Override for the Gemini API base URL
    pub gemini_api_base: Option<String>,

    /// Request timeout for backend calls
    pub request_timeout: Duration,

    /// Timeout for each Gemini call; `request_timeout` does not apply to it
    pub gemini_timeout: Duration,

    /// Cache TTL for company news
    pub cache_ttl_news: Duration,

    /// Fixed RNG seed for reproducible simulated runs
    pub seed: Option<u64>,

    /// Range used when the caller does not pick one
    pub default_time_range: TimeRange,

    /// Models requested by default
    pub models: ModelSelection,
}

impl Default for SentifyConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_base: None,
            request_timeout: Duration::from_secs(30),
            gemini_timeout: Duration::from_secs(120),
            cache_ttl_news: Duration::from_secs(300), // 5 minutes
            seed: None,
            default_time_range: TimeRange::OneWeek,
            models: ModelSelection::default(),
        }
    }
}

impl SentifyConfig {
    /// Create a new configuration builder
    pub fn builder() -> SentifyConfigBuilder {
        SentifyConfigBuilder::default()
    }

    /// Defaults overlaid with `SENTIFY_*` / `GEMINI_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Whether a Gemini credential is configured
    pub fn has_gemini_key(&self) -> bool {
        self.gemini_api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(SentifyError::Config("api_base must not be empty".to_string()));
        }

        if self.request_timeout.is_zero() {
            return Err(SentifyError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.gemini_timeout.as_secs() == 0 {
            return Err(SentifyError::Config(
                "gemini_timeout must be at least one second".to_string(),
            ));
        }

        if self.gemini_model.trim().is_empty() {
            return Err(SentifyError::Config("gemini_model must not be empty".to_string()));
        }

        // Re-check in case the selection was deserialized
        ModelSelection::new(self.models.use_gemini(), self.models.use_finbert())?;

        Ok(())
    }
}

/// Model selection from optional per-model flags, unset flags keeping the
/// default. `None` when neither flag is set or both end up off.
fn models_from_flags(use_gemini: Option<bool>, use_finbert: Option<bool>) -> Option<ModelSelection> {
    if use_gemini.is_none() && use_finbert.is_none() {
        return None;
    }
    let defaults = ModelSelection::default();
    match ModelSelection::new(
        use_gemini.unwrap_or(defaults.use_gemini()),
        use_finbert.unwrap_or(defaults.use_finbert()),
    ) {
        Ok(selection) => Some(selection),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring model flags from the environment");
            None
        }
    }
}

/// Builder for SentifyConfig
#[derive(Debug, Default)]
pub struct SentifyConfigBuilder {
    api_base: Option<String>,
    gemini_api_key: Option<String>,
    gemini_model: Option<String>,
    gemini_api_base: Option<String>,
    request_timeout: Option<Duration>,
    gemini_timeout: Option<Duration>,
    cache_ttl_news: Option<Duration>,
    seed: Option<u64>,
    default_time_range: Option<TimeRange>,
    models: Option<ModelSelection>,
}

impl SentifyConfigBuilder {
    /// Set the backend base URL
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    /// Set the Gemini API key
    pub fn gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    /// Set the Gemini model
    pub fn gemini_model(mut self, model: impl Into<String>) -> Self {
        self.gemini_model = Some(model.into());
        self
    }

    /// Point the Gemini provider at another base URL
    pub fn gemini_api_base(mut self, url: impl Into<String>) -> Self {
        self.gemini_api_base = Some(url.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the per-call Gemini timeout
    pub fn gemini_timeout(mut self, duration: Duration) -> Self {
        self.gemini_timeout = Some(duration);
        self
    }

    /// Set cache TTL for news
    pub fn cache_ttl_news(mut self, duration: Duration) -> Self {
        self.cache_ttl_news = Some(duration);
        self
    }

    /// Seed the RNG used for simulation and synthetic timings
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the default time range
    pub fn default_time_range(mut self, range: TimeRange) -> Self {
        self.default_time_range = Some(range);
        self
    }

    /// Set the default model selection
    pub fn models(mut self, models: ModelSelection) -> Self {
        self.models = Some(models);
        self
    }

    /// Fill unset fields from the environment
    pub fn with_env(mut self) -> Self {
        if self.api_base.is_none() {
            self.api_base = env_var("SENTIFY_API_BASE");
        }
        if self.gemini_api_key.is_none() {
            self.gemini_api_key = env_var("GEMINI_API_KEY");
        }
        if self.gemini_model.is_none() {
            self.gemini_model = env_var("GEMINI_MODEL");
        }
        if self.gemini_api_base.is_none() {
            self.gemini_api_base = env_var("GEMINI_API_BASE");
        }
        if self.seed.is_none() {
            self.seed = env_parse("SENTIFY_SEED");
        }
        if self.models.is_none() {
            self.models = models_from_flags(
                env_flag("SENTIFY_USE_GEMINI"),
                env_flag("SENTIFY_USE_FINBERT"),
            );
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SentifyConfig> {
        let defaults = SentifyConfig::default();

        let config = SentifyConfig {
            api_base: self.api_base.unwrap_or(defaults.api_base),
            gemini_api_key: self.gemini_api_key.filter(|k| !k.trim().is_empty()),
            gemini_model: self.gemini_model.unwrap_or(defaults.gemini_model),
            gemini_api_base: self.gemini_api_base,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            gemini_timeout: self.gemini_timeout.unwrap_or(defaults.gemini_timeout),
            cache_ttl_news: self.cache_ttl_news.unwrap_or(defaults.cache_ttl_news),
            seed: self.seed,
            default_time_range: self.default_time_range.unwrap_or(defaults.default_time_range),
            models: self.models.unwrap_or(defaults.models),
        };

        config.validate()?;
        Ok(config)
    }
}
