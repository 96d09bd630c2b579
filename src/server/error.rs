//! Server and HTTP error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::engine::EngineError;
use crate::store::StoreError;

/// Failure to start or run the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// An error returned to an HTTP client as `{"error": message}`.
#[derive(Debug)]
pub(crate) struct HttpApiError {
    status: StatusCode,
    message: String,
}

impl HttpApiError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<StoreError> for HttpApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::GameNotFound(_)
            | StoreError::PlayerNotRegistered(_)
            | StoreError::NoteNotFound(_)
            | StoreError::Engine(EngineError::PlayerNotFound(_)) => Self::not_found(err.to_string()),
            StoreError::ValidationFailed(_) | StoreError::Engine(_) => {
                Self::bad_request(err.to_string())
            }
            StoreError::Sqlite(_)
            | StoreError::Serde(_)
            | StoreError::Io(_)
            | StoreError::Corrupt(_) => {
                error!(%err, "store failure");
                Self::internal("internal storage error")
            }
        }
    }
}

impl IntoResponse for HttpApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::engine::{IndexTarget, ValidationError};
    use crate::store::GameId;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (StoreError::GameNotFound(GameId::from("g")), StatusCode::NOT_FOUND),
            (
                StoreError::PlayerNotRegistered(PlayerId::new(7)),
                StatusCode::NOT_FOUND,
            ),
            (
                StoreError::Engine(EngineError::PlayerNotFound(PlayerId::new(7))),
                StatusCode::NOT_FOUND,
            ),
            (
                StoreError::ValidationFailed(ValidationError::new("bad")),
                StatusCode::BAD_REQUEST,
            ),
            (
                StoreError::Engine(EngineError::IndexOutOfRange {
                    target: IndexTarget::Quest,
                    index: 3,
                    len: 1,
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                StoreError::Corrupt("x".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(HttpApiError::from(err).status, status);
        }
    }
}
