use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::client::FormServiceClient;
use crate::error::RelayError;
use crate::models::outcome::SubmissionResult;
use crate::models::registration::RegistrationSubmission;

// AppState struct containing shared resources
pub struct AppState {
    pub client: FormServiceClient,
}

// Registration relay endpoint. The body is read as JSON whatever its
// declared content type.
pub async fn relay_registration(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<SubmissionResult>), RelayError> {
    let submission: RegistrationSubmission = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejected registration payload: {}", e);
        RelayError::MalformedPayload(e.to_string())
    })?;

    info!("Received registration relay request");

    match state.client.submit(&submission).await {
        Ok(()) => {
            info!("Registration forwarded successfully");
            Ok((StatusCode::OK, Json(SubmissionResult::success())))
        }
        Err(err) => {
            match &err {
                RelayError::Transport(_) => error!("Could not reach form service: {}", err),
                _ => error!("Failed to forward registration: {}", err),
            }
            Err(err)
        }
    }
}
