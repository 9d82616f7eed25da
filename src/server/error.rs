use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::types::{AdvisorError, ErrorCategory};

/// Endpoint failure rendered as `{ "error": message }`
#[derive(Debug)]
pub struct ApiError(pub AdvisorError);

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.category() {
            ErrorCategory::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let category = self.0.category();

        if category.is_client_error() {
            warn!(%category, error = %self.0, "Rejected analysis request");
        } else {
            error!(%category, error = %self.0, "Analysis request failed");
        }

        let body = Json(serde_json::json!({
            "error": self.0.public_message(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(AdvisorError::UnsupportedAction("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(AdvisorError::PayloadTooLarge("limit".into())).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError(AdvisorError::Config("missing".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError(AdvisorError::upstream(401, None)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError(AdvisorError::ResponseParse("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
