//! Success envelope shared by every handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAIL: &str = "fail";
pub const STATUS_ERROR: &str = "error";

/// Serialized shape: `{"status": "success", "message"?: ..., "data"?: ...}`
#[derive(Debug, Serialize)]
struct Envelope<T> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

/// A successful response carrying an optional message and an optional payload.
#[derive(Debug)]
pub struct ApiResponse<T> {
    code: StatusCode,
    message: Option<String>,
    data: Option<T>,
}

impl ApiResponse<()> {
    /// Response with a message and no `data` member
    pub fn message(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Response with a `data` member and no message
    pub fn data(code: StatusCode, data: T) -> Self {
        Self {
            code,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope {
            status: STATUS_SUCCESS,
            message: self.message,
            data: self.data,
        };

        (self.code, Json(envelope)).into_response()
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
    async fn message_only_response_omits_data() {
        let response = ApiResponse::message(StatusCode::OK, "Buku berhasil dihapus").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"status": "success", "message": "Buku berhasil dihapus"})
        );
    }

    #[tokio::test]
    async fn data_response_with_message() {
        let response = ApiResponse::data(StatusCode::CREATED, json!({"bookId": "abc"}))
            .with_message("Buku berhasil ditambahkan")
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({
                "status": "success",
                "message": "Buku berhasil ditambahkan",
                "data": {"bookId": "abc"}
            })
        );
    }
}
