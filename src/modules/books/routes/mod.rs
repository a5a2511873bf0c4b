//! HTTP handlers for `/books`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use bookshelf_http::{ApiError, ApiResponse};

use super::error::BookError;
use super::models::{BookDetail, BookList, BookPayload, CreatedBook, ListQuery};
use super::service::BookService;

const CREATED: &str = "Buku berhasil ditambahkan";
const CREATE_MISSING_NAME: &str = "Gagal menambahkan buku. Mohon isi nama buku";
const CREATE_INVALID_RANGE: &str =
    "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount";
const CREATE_FAILED: &str = "Buku gagal ditambahkan";

const NOT_FOUND: &str = "Buku tidak ditemukan";

const UPDATED: &str = "Buku berhasil diperbarui";
const UPDATE_MISSING_NAME: &str = "Gagal memperbarui buku. Mohon isi nama buku";
const UPDATE_INVALID_RANGE: &str =
    "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount";
const UPDATE_NOT_FOUND: &str = "Gagal memperbarui buku. Id tidak ditemukan";

const DELETED: &str = "Buku berhasil dihapus";
const DELETE_NOT_FOUND: &str = "Buku gagal dihapus. Id tidak ditemukan";

type AppState = Arc<BookService>;

/// Routes carry absolute paths; the module is merged at the root.
pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/books", post(create_book).get(list_books))
        .route(
            "/books/{bookId}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(service)
}

async fn create_book(
    State(service): State<AppState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse<CreatedBook>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| payload_error("menambahkan", rejection))?;

    let book_id = service.create(payload).map_err(|err| match err {
        BookError::MissingName => ApiError::bad_request(CREATE_MISSING_NAME),
        BookError::InvalidPageRange { .. } => ApiError::bad_request(CREATE_INVALID_RANGE),
        BookError::InternalInconsistency(_) => ApiError::server(CREATE_FAILED),
        other => ApiError::Internal(other.into()),
    })?;

    Ok(ApiResponse::data(StatusCode::CREATED, CreatedBook { book_id }).with_message(CREATED))
}

/// Listing never fails on its query string: repeated keys keep their first
/// value, and a query that cannot be decoded applies no filter.
async fn list_books(
    State(service): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<ApiResponse<BookList>, ApiError> {
    let query = match pairs {
        Ok(Query(pairs)) => ListQuery::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "ignoring undecodable list query");
            ListQuery::default()
        }
    };

    let books = service
        .list(&query)
        .map_err(|err| ApiError::Internal(err.into()))?;

    Ok(ApiResponse::data(StatusCode::OK, BookList { books }))
}

async fn get_book(
    State(service): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<ApiResponse<BookDetail>, ApiError> {
    let book = service.get(&book_id).map_err(|err| match err {
        BookError::NotFound(_) => ApiError::not_found(NOT_FOUND),
        other => ApiError::Internal(other.into()),
    })?;

    Ok(ApiResponse::data(StatusCode::OK, BookDetail { book }))
}

async fn update_book(
    State(service): State<AppState>,
    Path(book_id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| payload_error("memperbarui", rejection))?;

    service.update(&book_id, payload).map_err(|err| match err {
        BookError::MissingName => ApiError::bad_request(UPDATE_MISSING_NAME),
        BookError::InvalidPageRange { .. } => ApiError::bad_request(UPDATE_INVALID_RANGE),
        BookError::NotFound(_) => ApiError::not_found(UPDATE_NOT_FOUND),
        other => ApiError::Internal(other.into()),
    })?;

    Ok(ApiResponse::message(StatusCode::OK, UPDATED))
}

async fn delete_book(
    State(service): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    service.delete(&book_id).map_err(|err| match err {
        BookError::NotFound(_) => ApiError::not_found(DELETE_NOT_FOUND),
        other => ApiError::Internal(other.into()),
    })?;

    Ok(ApiResponse::message(StatusCode::OK, DELETED))
}

/// Unparseable bodies fail with the same envelope as validation errors.
fn payload_error(action: &str, rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(format!(
        "Gagal {} buku. {}",
        action,
        rejection.body_text()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, extract::Request, http::Method};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(
        router: Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn poisoned_store_answers_with_error_envelope() {
        let service = Arc::new(BookService::default());
        service.poison_store();
        let router = router(service);

        let payload = json!({ "name": "Tes", "pageCount": 10, "readPage": 1 });
        let requests = [
            (Method::POST, "/books", Some(payload.clone())),
            (Method::GET, "/books", None),
            (Method::GET, "/books/abc", None),
            (Method::PUT, "/books/abc", Some(payload)),
            (Method::DELETE, "/books/abc", None),
        ];

        for (method, uri, body) in requests {
            let (status, body) = send(router.clone(), method.clone(), uri, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
            assert_eq!(body["status"], "error", "{method} {uri}");
            assert!(body["message"].is_string(), "{method} {uri}");
        }
    }
}
