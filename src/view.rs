//! Text rendering of the page state.

use crate::api::models::{DocumentDetail, DocumentItem, Metric, QueryDetail, QueryResponse};
use crate::state::{PageState, SOURCE_MAX};
use colored::{ColoredString, Colorize};
use std::fmt::Write;

pub const TITLE: &str = "Knowledge Copilot";
pub const SUBTITLE: &str = "Document Q&A over RAG, actions, and API metrics";
pub const OFFLINE_BANNER: &str = "Cannot reach the API server. Some features are limited.";
pub const EMPTY_DOCUMENTS: &str = "No documents uploaded yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ready,
    Processing,
    Error,
}

impl Badge {
    pub fn for_status(status: &str) -> Self {
        match status {
            "ready" => Badge::Ready,
            "processing" => Badge::Processing,
            _ => Badge::Error,
        }
    }

    fn paint(self, text: &str) -> ColoredString {
        let text = format!("[{}]", text);
        match self {
            Badge::Ready => text.green(),
            Badge::Processing => text.yellow(),
            Badge::Error => text.red(),
        }
    }
}

pub fn status_badge(status: &str) -> ColoredString {
    Badge::for_status(status).paint(status)
}

fn button(busy: bool, idle: &str, pending: &str) -> String {
    if busy {
        format!("[{}] (busy)", pending)
    } else {
        format!("[{}]", idle)
    }
}

pub fn render_page(state: &PageState) -> String {
    let busy = state.busy.is_busy();
    let mut out = String::new();

    if !state.api_online {
        let _ = writeln!(out, "{}", format!("! {}", OFFLINE_BANNER).red().bold());
    }
    let _ = writeln!(out, "{}", TITLE.bold());
    let _ = writeln!(out, "{}", SUBTITLE.dimmed());
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", "1) Upload documents".bold());
    let _ = writeln!(out, "  project_id: {}", state.project_id);
    let _ = writeln!(out, "  source text: {} / {}", state.source_len(), SOURCE_MAX);
    let _ = writeln!(out, "  {}", button(busy, "Upload document", "Uploading..."));
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", "2) Ask".bold());
    if !state.question.is_empty() {
        let _ = writeln!(out, "  question: {}", state.question);
    }
    let _ = writeln!(out, "  {}", button(busy, "Send question", "Asking..."));
    let _ = writeln!(out);

    if !state.message.is_empty() {
        let _ = writeln!(out, "{}", format!("> {}", state.message).cyan());
        let _ = writeln!(out);
    }

    if let Some(result) = &state.query_result {
        out.push_str(&render_answer(result));
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", "3) Actions".bold());
    let _ = writeln!(out, "  {}", button(busy, "Run summary action", "Running..."));
    if !state.action_result.is_empty() {
        for line in state.action_result.lines() {
            let _ = writeln!(out, "  | {}", line);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", "4) Documents / metrics".bold());
    if let Some(metrics) = &state.metrics {
        out.push_str(&render_metrics(metrics));
    }
    out.push_str(&render_documents(&state.documents));

    if let Some(detail) = &state.selected_document {
        let _ = writeln!(out);
        out.push_str(&render_document_detail(detail));
    }
    if let Some(detail) = &state.selected_query {
        let _ = writeln!(out);
        out.push_str(&render_query_detail(detail));
    }

    out
}

pub fn render_metrics(metrics: &Metric) -> String {
    let rating = metrics
        .avg_feedback_rating
        .map(|r| r.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut out = String::new();
    let _ = writeln!(out, "  documents: {}", metrics.documents);
    let _ = writeln!(out, "  chunks: {}", metrics.chunks);
    let _ = writeln!(out, "  queries: {}", metrics.queries);
    let _ = writeln!(out, "  avg latency: {}ms", metrics.avg_query_latency_ms);
    let _ = writeln!(out, "  feedback: {}", metrics.feedback_count);
    let _ = writeln!(out, "  rating: {}", rating);
    out
}

pub fn render_documents(documents: &[DocumentItem]) -> String {
    if documents.is_empty() {
        return format!("  {}\n", EMPTY_DOCUMENTS.dimmed());
    }
    let mut out = String::new();
    for doc in documents {
        let _ = writeln!(
            out,
            "  - {} {} chunks: {}",
            doc.display_name(),
            status_badge(&doc.status),
            doc.chunk_count
        );
    }
    out
}

pub fn render_answer(result: &QueryResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Answer".bold());
    for line in result.answer.lines() {
        let _ = writeln!(out, "  {}", line);
    }
    let _ = writeln!(
        out,
        "  model: {}  latency: {}ms",
        result.model.green(),
        result.latency_ms
    );
    if !result.citations.is_empty() {
        let _ = writeln!(out, "  Citations");
        for (i, citation) in result.citations.iter().enumerate() {
            let _ = writeln!(
                out,
                "   {}. {} {}",
                i + 1,
                citation.document_id.bold(),
                citation.text
            );
        }
    }
    out
}

pub fn render_document_detail(detail: &DocumentDetail) -> String {
    let doc = &detail.document;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}",
        "Document".bold(),
        doc.display_name(),
        status_badge(&doc.status)
    );
    let _ = writeln!(out, "  id: {}", doc.id);
    if let Some(source_type) = &doc.source_type {
        let _ = writeln!(out, "  source: {}", source_type);
    }
    let _ = writeln!(out, "  created: {}", doc.created_at);
    for chunk in &detail.chunks {
        let _ = writeln!(out, "  #{} {}", chunk.chunk_index, chunk.text);
    }
    out
}

pub fn render_query_detail(detail: &QueryDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Query".bold(), detail.response.id);
    let _ = writeln!(out, "  question: {}", detail.question);
    let _ = writeln!(
        out,
        "  tokens: {}  asked: {}",
        detail.tokens_used, detail.created_at
    );
    out.push_str(&render_answer(&detail.response));
    out
}
