//! HTTP error mapping.
//!
//! Every failure leaves the API as an [`ErrorRes`] body whose `code` names the error kind and
//! whose HTTP status matches it.

use api_shared::ErrorRes;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::{ErrorKind, RecordError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::BadRequest(_) => ErrorKind::BadRequest,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Conflict(_) => ErrorKind::Conflict,
            ApiError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::InvalidInput(message) => ApiError::BadRequest(message),
            RecordError::Conflict(message) => ApiError::Conflict(message),
            not_found @ RecordError::NotFound { .. } => ApiError::NotFound(not_found.to_string()),
            other => {
                tracing::error!("Record store error: {:?}", other);
                ApiError::Internal("Internal error".into())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::NotFound(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorRes {
            code: self.kind().as_str().into(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_errors_map_to_status_and_code() {
        let cases = [
            (
                RecordError::InvalidInput("Username must be supplied".into()),
                StatusCode::BAD_REQUEST,
                "Username must be supplied",
            ),
            (
                RecordError::not_found("User", "abc"),
                StatusCode::NOT_FOUND,
                "User with id 'abc' not found",
            ),
            (
                RecordError::Conflict("User with username 'alice' already exists".into()),
                StatusCode::CONFLICT,
                "User with username 'alice' already exists",
            ),
            (
                RecordError::Inconsistent("missing list".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
            ),
        ];

        for (err, status, message) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status_code(), status);
            assert_eq!(api.to_string(), message);
        }
    }

    #[tokio::test]
    async fn test_path_rejection_maps_to_not_found() {
        use axum::extract::{FromRequestParts, Path};
        use axum::http::Request;

        let (mut parts, _) = Request::builder()
            .uri("/users/%FF")
            .body(())
            .expect("request should build")
            .into_parts();
        // No route matched, so Path has no captured params to read.
        let rejection = Path::<String>::from_request_parts(&mut parts, &())
            .await
            .expect_err("path without captures should be rejected");

        let api: ApiError = rejection.into();
        assert_eq!(api.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(api.kind().as_str(), "NotFound");
    }

    #[test]
    fn test_error_code_uses_kind_name() {
        let api = ApiError::Conflict("dup".into());
        assert_eq!(api.kind().as_str(), "Conflict");
    }
}
