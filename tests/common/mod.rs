//! Minimal in-process HTTP backend for integration tests.
//!
//! Serves canned responses by method + path and records every request it
//! sees, so tests can assert both on page state and on what went over the
//! wire.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use hyper::ext::ReasonPhrase;
use knowledge_copilot::api::{ApiClient, Endpoints};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Route {
    pub method: &'static str,
    pub path: String,
    pub status: u16,
    /// Non-standard reason phrase for the status line.
    pub reason: Option<&'static str>,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Route {
    pub fn json(method: &'static str, path: &str, body: serde_json::Value) -> Self {
        Self {
            method,
            path: path.to_string(),
            status: 200,
            reason: None,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn status(method: &'static str, path: &str, status: u16) -> Self {
        Self {
            method,
            path: path.to_string(),
            status,
            reason: None,
            body: r#"{"detail":"stub failure"}"#.to_string(),
            delay: None,
        }
    }

    pub fn with_reason(mut self, reason: &'static str) -> Self {
        self.reason = Some(reason);
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    /// Path including any query string.
    pub target: String,
    pub body: String,
}

impl Hit {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or(&self.target)
    }
}

#[derive(Clone)]
struct Backend {
    routes: Arc<Vec<Route>>,
    hits: Arc<Mutex<Vec<Hit>>>,
}

pub struct StubServer {
    pub base: String,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl StubServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new().fallback(respond).with_state(Backend {
            routes: Arc::new(routes),
            hits: hits.clone(),
        });
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base, hits }
    }

    pub fn client(&self) -> ApiClient {
        client_for(&self.base)
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hits_to(&self, method: &str, path: &str) -> Vec<Hit> {
        self.hits()
            .into_iter()
            .filter(|h| h.method == method && h.path() == path)
            .collect()
    }
}

pub fn client_for(base: &str) -> ApiClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    ApiClient::with_client(http, Endpoints::new(base))
}

/// Base address of a port that refuses connections.
pub async fn dead_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn empty_metrics() -> serde_json::Value {
    serde_json::json!({
        "documents": 0,
        "chunks": 0,
        "queries": 0,
        "avg_query_latency_ms": 0.0,
        "feedback_count": 0,
        "avg_feedback_rating": null
    })
}

/// Health, empty document list and zeroed metrics.
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::json("GET", "/api/v1/health", serde_json::json!({ "status": "ok" })),
        Route::json("GET", "/api/v1/documents", serde_json::json!([])),
        Route::json("GET", "/api/v1/metrics", empty_metrics()),
    ]
}

/// `overrides` win over the defaults for the same method + path.
pub fn routes_with(overrides: Vec<Route>) -> Vec<Route> {
    let mut routes = overrides;
    for route in default_routes() {
        if !routes
            .iter()
            .any(|r| r.method == route.method && r.path == route.path)
        {
            routes.push(route);
        }
    }
    routes
}

async fn respond(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    backend.hits.lock().unwrap().push(Hit {
        method: method.to_string(),
        target,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let route = backend
        .routes
        .iter()
        .find(|r| r.method == method.as_str() && r.path == uri.path())
        .cloned()
        .unwrap_or_else(|| Route::status("GET", uri.path(), 404));

    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(route.status).unwrap();
    let mut response = (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        route.body,
    )
        .into_response();
    if let Some(reason) = route.reason {
        response
            .extensions_mut()
            .insert(ReasonPhrase::try_from(reason.as_bytes()).unwrap());
    }
    response
}
