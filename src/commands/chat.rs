use super::knowledge::refresh;
use super::{
    error_message, MSG_BAD_RATING, MSG_EMPTY_QUESTION, MSG_FEEDBACK_SAVED, MSG_NO_QUERY,
};
use crate::api::models::{FeedbackRequest, QueryRequest};
use crate::api::ApiClient;
use crate::state::{Outcome, PageState};
use tracing::{info, warn};

/// Sends `state.question` to the query endpoint.
///
/// A failed request leaves the previous answer on screen.
pub async fn ask(client: &ApiClient, state: &mut PageState) -> Outcome {
    if state.question.trim().is_empty() {
        state.message = MSG_EMPTY_QUESTION.to_string();
        return Outcome::Invalid;
    }
    let Some(_busy) = state.busy.try_acquire() else {
        return Outcome::Busy;
    };
    state.message.clear();

    let request = QueryRequest {
        project_id: state.project_id.clone(),
        question: state.question.clone(),
        top_k: state.top_k,
    };

    match client.ask(&request).await {
        Ok(response) => {
            info!(
                id = %response.id,
                model = %response.model,
                latency_ms = response.latency_ms,
                citations = response.citations.len(),
                "query answered"
            );
            state.query_result = Some(response);
            state.question.clear();
            refresh(client, state).await;
            Outcome::Completed
        }
        Err(err) => {
            warn!(error = %err, "query failed");
            state.message = error_message(&err);
            Outcome::Failed
        }
    }
}

/// Loads a stored query with its question and token usage.
pub async fn show_query(client: &ApiClient, state: &mut PageState, id: &str) -> Outcome {
    match client.query(id).await {
        Ok(detail) => {
            state.selected_query = Some(detail);
            Outcome::Completed
        }
        Err(err) => {
            warn!(error = %err, id, "query lookup failed");
            state.message = error_message(&err);
            Outcome::Failed
        }
    }
}

/// Rates a query. Without an explicit id the last answer is rated.
pub async fn feedback(
    client: &ApiClient,
    state: &mut PageState,
    query_id: Option<&str>,
    rating: u8,
    note: Option<&str>,
) -> Outcome {
    let query_id = match query_id {
        Some(id) => id.to_string(),
        None => match &state.query_result {
            Some(result) => result.id.clone(),
            None => {
                state.message = MSG_NO_QUERY.to_string();
                return Outcome::Invalid;
            }
        },
    };
    if !(1..=5).contains(&rating) {
        state.message = MSG_BAD_RATING.to_string();
        return Outcome::Invalid;
    }
    let Some(_busy) = state.busy.try_acquire() else {
        return Outcome::Busy;
    };
    state.message.clear();

    let request = FeedbackRequest {
        query_id,
        rating: Some(rating),
        note: note.map(str::to_string),
    };

    match client.feedback(&request).await {
        Ok(_) => {
            info!(query_id = %request.query_id, rating, "feedback recorded");
            state.message = MSG_FEEDBACK_SAVED.to_string();
            refresh(client, state).await;
            Outcome::Completed
        }
        Err(err) => {
            warn!(error = %err, "feedback failed");
            state.message = error_message(&err);
            Outcome::Failed
        }
    }
}
