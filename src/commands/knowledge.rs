use super::{
    error_message, source_too_long_message, MSG_EMPTY_SOURCE, MSG_LOAD_FAILED, MSG_NOT_UTF8,
    MSG_UPLOADED,
};
use crate::api::ApiClient;
use crate::state::{Outcome, PageState, SOURCE_MAX};
use tracing::{debug, info, warn};

/// Reloads the document list and metrics for the current project.
///
/// Both requests run concurrently; if either fails the previous values stay
/// and only the message changes.
pub async fn refresh(client: &ApiClient, state: &mut PageState) -> Outcome {
    let project_id = state.project_id.as_str();
    let loaded = futures::try_join!(
        client.list_documents(project_id),
        client.metrics(project_id)
    );

    match loaded {
        Ok((documents, metrics)) => {
            debug!(documents = documents.len(), "refreshed page data");
            state.documents = documents;
            state.metrics = Some(metrics);
            Outcome::Completed
        }
        Err(err) => {
            warn!(error = %err, "refresh failed");
            state.message = MSG_LOAD_FAILED.to_string();
            Outcome::Failed
        }
    }
}

/// Uploads the pasted text in `state.source_text`.
pub async fn upload(client: &ApiClient, state: &mut PageState) -> Outcome {
    if state.source_text.trim().is_empty() {
        state.message = MSG_EMPTY_SOURCE.to_string();
        return Outcome::Invalid;
    }
    if state.source_len() > SOURCE_MAX {
        state.message = source_too_long_message(SOURCE_MAX);
        return Outcome::Invalid;
    }
    let Some(_busy) = state.busy.try_acquire() else {
        return Outcome::Busy;
    };
    state.message.clear();

    match client
        .upload_text(&state.project_id, &state.source_text)
        .await
    {
        Ok(created) => {
            info!(
                id = %created.id,
                chunks = created.chunk_count,
                status = %created.status,
                "document uploaded"
            );
            state.source_text.clear();
            state.message = MSG_UPLOADED.to_string();
            refresh(client, state).await;
            Outcome::Completed
        }
        Err(err) => {
            warn!(error = %err, "upload failed");
            state.message = error_message(&err);
            Outcome::Failed
        }
    }
}

/// Uploads a local text file as a multipart `file` part.
pub async fn upload_file(
    client: &ApiClient,
    state: &mut PageState,
    filename: &str,
    content: Vec<u8>,
) -> Outcome {
    let Ok(text) = std::str::from_utf8(&content) else {
        state.message = MSG_NOT_UTF8.to_string();
        return Outcome::Invalid;
    };
    if text.trim().is_empty() {
        state.message = MSG_EMPTY_SOURCE.to_string();
        return Outcome::Invalid;
    }
    let Some(_busy) = state.busy.try_acquire() else {
        return Outcome::Busy;
    };
    state.message.clear();

    match client
        .upload_file(&state.project_id, filename, content)
        .await
    {
        Ok(created) => {
            info!(id = %created.id, filename, chunks = created.chunk_count, "file uploaded");
            state.message = MSG_UPLOADED.to_string();
            refresh(client, state).await;
            Outcome::Completed
        }
        Err(err) => {
            warn!(error = %err, filename, "file upload failed");
            state.message = error_message(&err);
            Outcome::Failed
        }
    }
}

/// Loads one document with its chunks into `selected_document`.
pub async fn show_document(client: &ApiClient, state: &mut PageState, id: &str) -> Outcome {
    match client.document(id).await {
        Ok(detail) => {
            state.selected_document = Some(detail);
            Outcome::Completed
        }
        Err(err) => {
            warn!(error = %err, id, "document lookup failed");
            state.message = error_message(&err);
            Outcome::Failed
        }
    }
}
