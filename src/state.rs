use crate::api::models::{DocumentDetail, DocumentItem, Metric, QueryDetail, QueryResponse};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const DEFAULT_PROJECT_ID: &str = "default";

/// Upper bound on pasted source text, counted in characters.
pub const SOURCE_MAX: usize = 5000;

/// Everything the page shows. Each slot holds the last successful response
/// for its category; failures only touch `message` (or `action_result`).
#[derive(Debug, Clone)]
pub struct PageState {
    pub project_id: String,
    pub documents: Vec<DocumentItem>,
    pub metrics: Option<Metric>,
    pub source_text: String,
    pub question: String,
    pub top_k: Option<u8>,
    pub query_result: Option<QueryResponse>,
    pub action_result: String,
    pub message: String,
    pub api_online: bool,
    pub selected_document: Option<DocumentDetail>,
    pub selected_query: Option<QueryDetail>,
    pub busy: BusyFlag,
}

impl PageState {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            documents: Vec::new(),
            metrics: None,
            source_text: String::new(),
            question: String::new(),
            top_k: None,
            query_result: None,
            action_result: String::new(),
            message: String::new(),
            api_online: true,
            selected_document: None,
            selected_query: None,
            busy: BusyFlag::default(),
        }
    }

    pub fn source_len(&self) -> usize {
        self.source_text.chars().count()
    }

    pub fn document_ids(&self) -> Vec<String> {
        self.documents.iter().map(|doc| doc.id.clone()).collect()
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_ID)
    }
}

/// Shared "request in flight" flag gating the submit-style operations.
///
/// Clones observe the same flag, so a renderer can watch it while an
/// operation holds the guard.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Returns `None` when another operation already holds the flag.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(self.0.clone()))
    }
}

/// Clears the busy flag when dropped.
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// How a user-triggered operation ended. Details land in [`PageState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// Rejected client-side; nothing was sent.
    Invalid,
    /// Another operation held the busy flag; nothing was sent.
    Busy,
    Failed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        self == Outcome::Completed
    }
}
