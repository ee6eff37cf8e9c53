use super::error_message;
use crate::api::models::ActionRequest;
use crate::api::ApiClient;
use crate::state::{Outcome, PageState};
use serde_json::json;
use tracing::{info, warn};

pub const SUMMARY_ACTION: &str = "summary";

/// Asks the backend to summarize every listed document.
///
/// The result, or the error text, goes to `action_result`, not `message`.
pub async fn run_action(client: &ApiClient, state: &mut PageState) -> Outcome {
    let Some(_busy) = state.busy.try_acquire() else {
        return Outcome::Busy;
    };
    state.action_result.clear();

    let request = ActionRequest {
        project_id: state.project_id.clone(),
        kind: SUMMARY_ACTION.to_string(),
        payload: json!({ "documents": state.document_ids() }),
    };

    match client.run_action(&request).await {
        Ok(response) => {
            info!(
                action_id = response.action_id.as_deref().unwrap_or("-"),
                status = response.status.as_deref().unwrap_or("-"),
                "action finished"
            );
            state.action_result = response.result;
            Outcome::Completed
        }
        Err(err) => {
            warn!(error = %err, "action failed");
            state.action_result = error_message(&err);
            Outcome::Failed
        }
    }
}
