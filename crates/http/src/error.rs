//! Error handling for the bookshelf HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::response::{STATUS_ERROR, STATUS_FAIL};

const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

/// Body of every non-2xx response: `{"status": "fail" | "error", "message": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("request timeout: {message}")]
    RequestTimeout { message: String },

    /// Server-side failure whose message is safe to show to the client
    #[error("server error: {message}")]
    Server { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a request timeout error
    pub fn request_timeout(message: impl Into<String>) -> Self {
        Self::RequestTimeout {
            message: message.into(),
        }
    }

    /// Create a server error with a client-facing message
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::RequestTimeout { .. } => StatusCode::REQUEST_TIMEOUT,
            ApiError::Server { .. } | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status_code();

        let message = match self {
            ApiError::BadRequest { message }
            | ApiError::NotFound { message }
            | ApiError::RequestTimeout { message }
            | ApiError::Server { message } => message,
            ApiError::Internal(e) => {
                tracing::error!(error_id = %error_id, error = ?e, "internal error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        let body_status = if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                reason = %message,
                "request error"
            );
            STATUS_ERROR
        } else {
            tracing::warn!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                reason = %message,
                "request failed"
            );
            STATUS_FAIL
        };

        let body = ErrorBody {
            status: body_status,
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_is_a_fail_envelope() {
        let response = ApiError::bad_request("Mohon isi nama buku").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"status": "fail", "message": "Mohon isi nama buku"})
        );
    }

    #[tokio::test]
    async fn test_not_found_mapping() {
        let response = ApiError::not_found("Resource not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["status"], "fail");
    }

    #[tokio::test]
    async fn test_request_timeout_is_a_fail_envelope() {
        let response = ApiError::request_timeout("Request timed out").into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            body_json(response).await,
            json!({"status": "fail", "message": "Request timed out"})
        );
    }

    #[tokio::test]
    async fn test_server_error_keeps_its_message() {
        let response = ApiError::server("Buku gagal ditambahkan").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"status": "error", "message": "Buku gagal ditambahkan"})
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let error = ApiError::from(anyhow::anyhow!("lock poisoned in book store"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
    }
}
