//! Mock market, FinBERT and Gemini backends for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};

use sentify_core::{ModelSelection, SentifyConfig};

// ---------------------------------------------------------------------------
// Canned responses
// ---------------------------------------------------------------------------

/// Status and raw body returned by one route
#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
}

impl Canned {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: json!({"error": "mock failure"}).to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
        }
    }

    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

pub struct MockResponses {
    pub search: Canned,
    pub news: Canned,
    pub finbert: Canned,
}

impl Default for MockResponses {
    fn default() -> Self {
        Self {
            search: Canned::ok(sample_tickers()),
            news: Canned::ok(sample_news()),
            finbert: Canned::ok(json!([])),
        }
    }
}

pub fn sample_tickers() -> Value {
    json!([
        {"symbol": "AAPL", "name": "Apple Inc.", "price": 232.8, "change": 1.42},
        {"symbol": "AMZN", "name": "Amazon.com, Inc.", "price": 201.1, "change": -0.37}
    ])
}

/// Three articles: one positive, one negative, one neutral by keyword
pub fn sample_news() -> Value {
    json!([
        {
            "id": "a1",
            "title": "Apple shares surge after record iPhone quarter",
            "source": "Reuters",
            "publishedAt": "2025-01-31T14:00:00Z",
            "url": "https://example.com/a1",
            "summary": "Revenue beat expectations."
        },
        {
            "id": "a2",
            "title": "Apple faces lawsuit over App Store fees",
            "source": "Bloomberg",
            "publishedAt": "2025-01-30T09:30:00Z",
            "url": "https://example.com/a2",
            "summary": "Developers seek damages."
        },
        {
            "id": "a3",
            "title": "Apple to present at developer conference",
            "source": "CNBC",
            "publishedAt": "2025-01-29T18:45:00Z",
            "url": "https://example.com/a3",
            "summary": "The event is scheduled for June."
        }
    ])
}

// ---------------------------------------------------------------------------
// MockBackend — market + FinBERT routes of the Flask backend
// ---------------------------------------------------------------------------

struct BackendState {
    responses: MockResponses,
    news_hits: AtomicUsize,
    last_news_query: Mutex<Option<HashMap<String, String>>>,
    last_search_query: Mutex<Option<HashMap<String, String>>>,
    finbert_bodies: Mutex<Vec<Value>>,
}

pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<BackendState>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    pub async fn start(responses: MockResponses) -> Self {
        let state = Arc::new(BackendState {
            responses,
            news_hits: AtomicUsize::new(0),
            last_news_query: Mutex::new(None),
            last_search_query: Mutex::new(None),
            finbert_bodies: Mutex::new(Vec::new()),
        });

        let app = axum::Router::new()
            .route("/api/search", get(search_handler))
            .route("/api/news", get(news_handler))
            .route("/api/sentiment/finbert", post(finbert_handler))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            addr,
            state,
            _handle: handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn news_hits(&self) -> usize {
        self.state.news_hits.load(Ordering::SeqCst)
    }

    pub fn last_news_query(&self) -> Option<HashMap<String, String>> {
        self.state.last_news_query.lock().unwrap().clone()
    }

    pub fn last_search_query(&self) -> Option<HashMap<String, String>> {
        self.state.last_search_query.lock().unwrap().clone()
    }

    pub fn finbert_bodies(&self) -> Vec<Value> {
        self.state.finbert_bodies.lock().unwrap().clone()
    }

    /// Config pointing every backend call at this mock
    pub fn config(&self) -> SentifyConfig {
        self.config_builder().build().unwrap()
    }

    pub fn config_builder(&self) -> sentify_core::config::SentifyConfigBuilder {
        SentifyConfig::builder()
            .api_base(self.url())
            .request_timeout(Duration::from_secs(5))
            .seed(42)
            .models(ModelSelection::both())
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self._handle.abort();
    }
}

async fn search_handler(
    State(state): State<Arc<BackendState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    *state.last_search_query.lock().unwrap() = Some(params);
    state.responses.search.clone().into_response()
}

async fn news_handler(
    State(state): State<Arc<BackendState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.news_hits.fetch_add(1, Ordering::SeqCst);
    *state.last_news_query.lock().unwrap() = Some(params);
    state.responses.news.clone().into_response()
}

async fn finbert_handler(State(state): State<Arc<BackendState>>, body: axum::Json<Value>) -> Response {
    state.finbert_bodies.lock().unwrap().push(body.0);
    state.responses.finbert.clone().into_response()
}

// ---------------------------------------------------------------------------
// MockGemini — answers generateContent by keyword in the prompt
// ---------------------------------------------------------------------------

pub struct MockGemini {
    addr: SocketAddr,
    calls: Arc<AtomicUsize>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockGemini {
    /// Headlines containing "surge" are Positive (0.9), "lawsuit" Negative
    /// (0.8); anything mentioning "conference" gets a 500.
    pub async fn start() -> Self {
        let calls = Arc::new(AtomicUsize::new(0));

        let app = axum::Router::new()
            .route("/v1beta/models/{call}", post(gemini_handler))
            .with_state(Arc::clone(&calls));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock gemini");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            addr,
            calls,
            _handle: handle,
        }
    }

    pub fn api_base(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Drop for MockGemini {
    fn drop(&mut self) {
        self._handle.abort();
    }
}

async fn gemini_handler(State(calls): State<Arc<AtomicUsize>>, body: axum::Json<Value>) -> Response {
    calls.fetch_add(1, Ordering::SeqCst);

    let prompt = body.0["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_owned();
    let headline = prompt
        .lines()
        .find(|line| line.starts_with("MAIN HEADLINE"))
        .unwrap_or_default()
        .to_lowercase();

    let verdict = if headline.contains("conference") {
        return Canned::status(500).into_response();
    } else if headline.contains("surge") {
        json!({"sentiment": "Positive", "confidenceScore": 0.9, "explanation": "Strong demand."})
    } else if headline.contains("lawsuit") {
        json!({"sentiment": "Negative", "confidenceScore": 0.8, "explanation": "Legal risk."})
    } else {
        json!({"sentiment": "Neutral", "explanation": "No clear signal."})
    };

    Canned::ok(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": verdict.to_string()}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 24}
    }))
    .into_response()
}
