//! Server error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use seal_engine::EngineError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request itself was malformed.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// The addressed record or content does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Engine failure while handling the request.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// I/O error outside the engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Engine(EngineError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Self::Engine(EngineError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Engine(EngineError::ContentMissing(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("error"),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seal_types::StoredRef;

    #[test]
    fn engine_errors_map_to_client_codes() {
        let invalid = ServerError::from(EngineError::InvalidInput("bad name".into()));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let missing = ServerError::from(EngineError::NotFound("id 9".into()));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let gone = ServerError::from(EngineError::ContentMissing(StoredRef::mint("doc.txt")));
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn everything_else_is_a_500() {
        let err = ServerError::Internal("boom".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let io = ServerError::from(std::io::Error::other("disk on fire"));
        assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
