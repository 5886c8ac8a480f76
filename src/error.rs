use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tower::BoxError;
use tracing::error;

use crate::models::outcome::SubmissionResult;

/// Failures of a relay request
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("form service responded with status {0}")]
    UpstreamStatus(StatusCode),

    #[error("request to form service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::UpstreamStatus(_) | RelayError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(SubmissionResult::failure())).into_response()
    }
}

// Errors from the service layers (load shedding, concurrency limit) keep
// the relay's JSON failure contract.
pub async fn handle_error(err: BoxError) -> (StatusCode, Json<SubmissionResult>) {
    error!("Unhandled internal error: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SubmissionResult::failure()),
    )
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use tower::load_shed::error::Overloaded;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_layer_errors_answer_json_failure() {
        let response = handle_error(Box::new(Overloaded::new())).await.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, r#"{"success":false}"#);
    }

    #[tokio::test]
    async fn test_relay_error_statuses() {
        let upstream = RelayError::UpstreamStatus(StatusCode::BAD_GATEWAY).into_response();
        assert_eq!(upstream.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(upstream).await, r#"{"success":false}"#);

        let malformed = RelayError::MalformedPayload("eof".to_string()).into_response();
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    }
}
