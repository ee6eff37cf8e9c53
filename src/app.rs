use crate::api::ApiClient;
use crate::commands::{action, chat, health, knowledge};
use crate::config::Settings;
use crate::state::{Outcome, PageState};
use crate::view;
use std::path::Path;

/// One client session: the backend client plus the page it drives.
pub struct Copilot {
    client: ApiClient,
    state: PageState,
}

impl Copilot {
    pub fn new(client: ApiClient, project_id: impl Into<String>) -> Self {
        Self {
            client,
            state: PageState::new(project_id),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(ApiClient::new(&settings.api_base), settings.project_id.clone())
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PageState {
        &mut self.state
    }

    pub fn render(&self) -> String {
        view::render_page(&self.state)
    }

    /// First load: check health once, then fetch documents and metrics.
    pub async fn mount(&mut self) {
        health::check_health(&self.client, &mut self.state).await;
        knowledge::refresh(&self.client, &mut self.state).await;
    }

    pub async fn refresh(&mut self) -> Outcome {
        knowledge::refresh(&self.client, &mut self.state).await
    }

    pub fn set_project(&mut self, project_id: impl Into<String>) {
        self.state.project_id = project_id.into();
    }

    pub async fn upload(&mut self, text: impl Into<String>) -> Outcome {
        self.state.source_text = text.into();
        knowledge::upload(&self.client, &mut self.state).await
    }

    pub async fn upload_file(&mut self, filename: &str, content: Vec<u8>) -> Outcome {
        knowledge::upload_file(&self.client, &mut self.state, filename, content).await
    }

    /// Reads `path` and uploads it under its file name.
    pub async fn upload_path(&mut self, path: &Path) -> std::io::Result<Outcome> {
        let content = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.txt")
            .to_string();
        Ok(self.upload_file(&filename, content).await)
    }

    pub async fn ask(&mut self, question: impl Into<String>, top_k: Option<u8>) -> Outcome {
        self.state.question = question.into();
        self.state.top_k = top_k;
        chat::ask(&self.client, &mut self.state).await
    }

    pub async fn summarize(&mut self) -> Outcome {
        action::run_action(&self.client, &mut self.state).await
    }

    pub async fn feedback(
        &mut self,
        query_id: Option<&str>,
        rating: u8,
        note: Option<&str>,
    ) -> Outcome {
        chat::feedback(&self.client, &mut self.state, query_id, rating, note).await
    }

    pub async fn show_document(&mut self, id: &str) -> Outcome {
        knowledge::show_document(&self.client, &mut self.state, id).await
    }

    pub async fn show_query(&mut self, id: &str) -> Outcome {
        chat::show_query(&self.client, &mut self.state, id).await
    }
}
