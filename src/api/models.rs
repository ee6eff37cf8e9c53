use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DocumentItem {
    pub id: String,
    pub filename: Option<String>,
    pub status: String,
    pub chunk_count: u32,
    pub created_at: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl DocumentItem {
    /// Filename when the backend has one, otherwise the first 8 characters of the id.
    pub fn display_name(&self) -> &str {
        match &self.filename {
            Some(name) => name,
            None => self
                .id
                .char_indices()
                .nth(8)
                .map_or(&*self.id, |(end, _)| &self.id[..end]),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DocumentCreated {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub chunk_count: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChunkItem {
    pub id: String,
    pub chunk_index: u32,
    pub text: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DocumentDetail {
    pub document: DocumentItem,
    pub chunks: Vec<ChunkItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Citation {
    pub chunk_id: String,
    pub document_id: String,
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QueryRequest {
    pub project_id: String,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u8>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QueryResponse {
    pub id: String,
    pub answer: String,
    pub citations: Vec<Citation>,
    pub latency_ms: u64,
    pub model: String,
    pub related_documents: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QueryDetail {
    #[serde(flatten)]
    pub response: QueryResponse,
    pub question: String,
    pub tokens_used: u64,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Metric {
    pub documents: u64,
    pub chunks: u64,
    pub queries: u64,
    pub avg_query_latency_ms: f64,
    pub feedback_count: u64,
    pub avg_feedback_rating: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ActionRequest {
    pub project_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ActionResponse {
    #[serde(default)]
    pub action_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeedbackRequest {
    pub query_id: String,
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeedbackResponse {
    pub ok: bool,
}
