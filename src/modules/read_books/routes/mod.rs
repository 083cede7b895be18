//! HTTP handlers for `/read_books`. Successes are bare JSON; failures are a
//! single plain-text line.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use libris_http::{error::INTERNAL_ERROR, AppError, TextError};

use super::models::{CommentPayload, ReadBook, ReadBookPayload};
use super::service::{ReadBookError, ReadBookService};

const NOT_FOUND: &str = "read book not found";
pub const COMMENT_ADDED: &str = "Comment added successfully";

pub fn router(service: ReadBookService) -> Router {
    Router::new()
        .route("/read_books", post(create_read_book).get(list_read_books))
        .route(
            "/read_books/{id}",
            get(get_read_book)
                .put(update_read_book)
                .delete(delete_read_book),
        )
        .route("/read_books/{id}/comments", post(add_comment))
        .with_state(service)
}

fn reject(err: ReadBookError) -> TextError {
    let err = match err {
        ReadBookError::Validation(invalid) => AppError::validation(invalid.to_string()),
        ReadBookError::NotFound => AppError::not_found(NOT_FOUND),
        ReadBookError::Store(cause) => AppError::internal(INTERNAL_ERROR, cause),
    };
    TextError(err)
}

async fn create_read_book(
    State(service): State<ReadBookService>,
    payload: Result<Json<ReadBookPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ReadBook>), TextError> {
    let Json(payload) = payload?;
    let read_book = service.create_read_book(payload).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(read_book)))
}

async fn get_read_book(
    State(service): State<ReadBookService>,
    Path(id): Path<String>,
) -> Result<Json<ReadBook>, TextError> {
    let read_book = service.get_read_book(&id).await.map_err(reject)?;
    Ok(Json(read_book))
}

async fn list_read_books(
    State(service): State<ReadBookService>,
) -> Result<Json<Vec<ReadBook>>, TextError> {
    let read_books = service.list_read_books().await.map_err(reject)?;
    Ok(Json(read_books))
}

async fn update_read_book(
    State(service): State<ReadBookService>,
    Path(id): Path<String>,
    payload: Result<Json<ReadBookPayload>, JsonRejection>,
) -> Result<Json<ReadBook>, TextError> {
    let Json(payload) = payload?;
    let read_book = service
        .update_read_book(&id, payload)
        .await
        .map_err(reject)?;
    Ok(Json(read_book))
}

async fn delete_read_book(
    State(service): State<ReadBookService>,
    Path(id): Path<String>,
) -> Result<StatusCode, TextError> {
    service.delete_read_book(&id).await.map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

/// The record is addressed by the route's own `{id}` segment.
async fn add_comment(
    State(service): State<ReadBookService>,
    Path(id): Path<String>,
    payload: Result<Json<CommentPayload>, JsonRejection>,
) -> Result<&'static str, TextError> {
    let Json(payload) = payload?;
    service.add_comment(&id, payload).await.map_err(reject)?;
    Ok(COMMENT_ADDED)
}
