//! Mapping of core errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use growth_sim_core::errors::{CoreError, ErrorKind};
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON error body: `{ "error": "...", "details": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Handler error type.
#[derive(Debug)]
pub enum ApiError {
    Core(CoreError),
    /// `/api/simulate` called on a server started without a data directory
    DatasetsNotLoaded,
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Core(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::DatasetsNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Core(e) => match e.kind() {
                ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
                ErrorKind::Upstream | ErrorKind::Server => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::DatasetsNotLoaded => ErrorBody {
                error: "Datasets not loaded".into(),
                details: None,
            },
            ApiError::Core(CoreError::BadRequest(message)) => ErrorBody {
                error: message.clone(),
                details: None,
            },
            ApiError::Core(CoreError::Upstream { provider, body, .. }) => ErrorBody {
                error: format!("{provider} fetch failed"),
                details: Some(body.clone()),
            },
            ApiError::Core(e) => ErrorBody {
                error: "Server error".into(),
                details: Some(e.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();
        if status.is_server_error() {
            error!(
                status = status.as_u16(),
                error = %body.error,
                details = ?body.details,
                "request failed"
            );
        }
        (status, Json(body)).into_response()
    }
}
