use super::models::{
    ActionRequest, ActionResponse, DocumentCreated, DocumentDetail, DocumentItem,
    FeedbackRequest, FeedbackResponse, Metric, QueryDetail, QueryRequest, QueryResponse,
};
use super::{ApiError, Endpoints};
use hyper::ext::ReasonPhrase;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Thin wrapper over a shared `reqwest::Client` bound to one backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(base: &str) -> Self {
        Self::with_client(Client::new(), Endpoints::new(base))
    }

    pub fn with_client(http: Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Sends `request` and decodes a JSON body.
    ///
    /// Transport failures come back as the original `reqwest::Error` inside
    /// [`ApiError::Network`]. A non-success status becomes [`ApiError::Status`]
    /// with the message `"<code> <reason>"`, using the reason the server sent
    /// and the canonical one when it sent the standard text.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let request = request.build()?;
        debug!(method = %request.method(), url = %request.url(), "api request");

        let resp = self.http.execute(request).await?;
        let status = resp.status();

        if !status.is_success() {
            warn!(status = status.as_u16(), url = %resp.url(), "api request failed");
            // hyper only records the phrase when it differs from the canonical one.
            let sent = resp
                .extensions()
                .get::<ReasonPhrase>()
                .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: status_line(status, sent.as_deref()),
            });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Bare GET that reports the status without interpreting the body.
    pub async fn status_of(&self, url: &str) -> Result<StatusCode, reqwest::Error> {
        let resp = self.http.get(url).send().await?;
        Ok(resp.status())
    }

    pub async fn list_documents(&self, project_id: &str) -> Result<Vec<DocumentItem>, ApiError> {
        self.fetch_json(
            self.http
                .get(&self.endpoints.documents)
                .query(&[("project_id", project_id)]),
        )
        .await
    }

    pub async fn metrics(&self, project_id: &str) -> Result<Metric, ApiError> {
        self.fetch_json(
            self.http
                .get(&self.endpoints.metrics)
                .query(&[("project_id", project_id)]),
        )
        .await
    }

    pub async fn upload_text(
        &self,
        project_id: &str,
        source_text: &str,
    ) -> Result<DocumentCreated, ApiError> {
        let form = Form::new()
            .text("project_id", project_id.to_string())
            .text("source_text", source_text.to_string());
        self.fetch_json(self.http.post(&self.endpoints.documents).multipart(form))
            .await
    }

    pub async fn upload_file(
        &self,
        project_id: &str,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<DocumentCreated, ApiError> {
        let part = Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str(mime_for(filename))?;
        let form = Form::new()
            .text("project_id", project_id.to_string())
            .part("file", part);
        self.fetch_json(self.http.post(&self.endpoints.documents).multipart(form))
            .await
    }

    pub async fn document(&self, id: &str) -> Result<DocumentDetail, ApiError> {
        self.fetch_json(self.http.get(self.endpoints.document(id)))
            .await
    }

    pub async fn ask(&self, request: &QueryRequest) -> Result<QueryResponse, ApiError> {
        self.fetch_json(self.http.post(&self.endpoints.queries).json(request))
            .await
    }

    pub async fn query(&self, id: &str) -> Result<QueryDetail, ApiError> {
        self.fetch_json(self.http.get(self.endpoints.query(id))).await
    }

    pub async fn run_action(&self, request: &ActionRequest) -> Result<ActionResponse, ApiError> {
        self.fetch_json(self.http.post(&self.endpoints.actions).json(request))
            .await
    }

    pub async fn feedback(&self, request: &FeedbackRequest) -> Result<FeedbackResponse, ApiError> {
        self.fetch_json(self.http.post(&self.endpoints.evals).json(request))
            .await
    }
}

fn status_line(status: StatusCode, sent: Option<&str>) -> String {
    match sent.or(status.canonical_reason()) {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

fn mime_for(filename: &str) -> &'static str {
    if filename.to_ascii_lowercase().ends_with(".md") {
        "text/markdown"
    } else {
        "text/plain"
    }
}
