pub mod client;
pub mod models;

pub use client::ApiClient;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Absolute backend URLs, derived once from the configured base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub health: String,
    pub documents: String,
    pub queries: String,
    pub metrics: String,
    pub actions: String,
    pub evals: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            health: format!("{}/api/v1/health", base),
            documents: format!("{}/api/v1/documents", base),
            queries: format!("{}/api/v1/queries", base),
            metrics: format!("{}/api/v1/metrics", base),
            actions: format!("{}/api/v1/agent/actions", base),
            evals: format!("{}/api/v1/evals", base),
        }
    }

    pub fn document(&self, id: &str) -> String {
        format!("{}/{}", self.documents, id)
    }

    pub fn query(&self, id: &str) -> String {
        format!("{}/{}", self.queries, id)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed: connection refused, DNS, TLS, and so on.
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
