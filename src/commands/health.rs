use crate::api::ApiClient;
use crate::state::PageState;
use tracing::{info, warn};

/// Checks the health endpoint once and records the result in `api_online`.
pub async fn check_health(client: &ApiClient, state: &mut PageState) -> bool {
    let online = match client.status_of(&client.endpoints().health).await {
        Ok(status) if status.is_success() => true,
        Ok(status) => {
            warn!(status = status.as_u16(), "health check returned failure status");
            false
        }
        Err(err) => {
            warn!(error = %err, "health check failed");
            false
        }
    };
    if online {
        info!("api online");
    }
    state.api_online = online;
    online
}
