//! HTTP handlers for `/books`. Every response uses the `{"data"}` /
//! `{"message"}` envelope.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use libris_http::{error::INTERNAL_ERROR, AppError, Envelope};

use super::models::{Book, BookPayload};
use super::service::{BookError, BookService};

const NOT_FOUND: &str = "Book not found";
const CREATE_FAILED: &str = "Failed to create book";

pub fn router(service: BookService) -> Router {
    Router::new()
        .route("/books", post(create_book).get(list_books))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(service)
}

/// Map a use-case failure onto the response, using `failure` as the 500 message.
fn reject(err: BookError, failure: &str) -> AppError {
    match err {
        BookError::Validation(invalid) => AppError::validation(invalid.to_string()),
        BookError::NotFound => AppError::not_found(NOT_FOUND),
        BookError::Store(cause) => AppError::internal(failure, cause),
    }
}

async fn create_book(
    State(service): State<BookService>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<(StatusCode, Envelope<Book>), AppError> {
    let Json(payload) = payload?;
    let book = service
        .create_book(payload)
        .await
        .map_err(|err| reject(err, CREATE_FAILED))?;
    Ok((StatusCode::CREATED, Envelope::new(book)))
}

async fn get_book(
    State(service): State<BookService>,
    Path(id): Path<String>,
) -> Result<Envelope<Book>, AppError> {
    let book = service
        .get_book(&id)
        .await
        .map_err(|err| reject(err, INTERNAL_ERROR))?;
    Ok(Envelope::new(book))
}

async fn update_book(
    State(service): State<BookService>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Envelope<Book>, AppError> {
    let Json(payload) = payload?;
    let book = service
        .update_book(&id, payload)
        .await
        .map_err(|err| reject(err, INTERNAL_ERROR))?;
    Ok(Envelope::new(book))
}

async fn delete_book(
    State(service): State<BookService>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    service
        .delete_book(&id)
        .await
        .map_err(|err| reject(err, INTERNAL_ERROR))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_books(
    State(service): State<BookService>,
) -> Result<Envelope<Vec<Book>>, AppError> {
    let books = service
        .list_books()
        .await
        .map_err(|err| reject(err, INTERNAL_ERROR))?;
    Ok(Envelope::new(books))
}
