use std::sync::Arc;

use libris_db::StoreError;
use thiserror::Error;

use super::models::{Book, BookPayload};
use super::repository::BookRepository;
use crate::validation::{validate_book, ValidationError};

#[derive(Error, Debug)]
pub enum BookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No book has this id, or the id is not a well-formed book id.
    #[error("book not found")]
    NotFound,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for BookError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            BookError::NotFound
        } else {
            BookError::Store(err)
        }
    }
}

/// Book use cases: validate on the way in, otherwise delegate to the repository.
#[derive(Clone)]
pub struct BookService {
    repository: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_book(&self, payload: BookPayload) -> Result<Book, BookError> {
        validate_book(&payload)?;
        let book = self.repository.create(payload.into_book(String::new())).await?;
        tracing::info!(book_id = %book.id, "book created");
        Ok(book)
    }

    pub async fn get_book(&self, id: &str) -> Result<Book, BookError> {
        Ok(self.repository.get_by_id(id).await?)
    }

    /// Replace the book stored under `id`; the payload's own `id` is ignored.
    pub async fn update_book(&self, id: &str, payload: BookPayload) -> Result<Book, BookError> {
        validate_book(&payload)?;
        let book = payload.into_book(id);
        self.repository.update(&book).await?;
        Ok(book)
    }

    pub async fn delete_book(&self, id: &str) -> Result<(), BookError> {
        self.repository.delete(id).await?;
        tracing::info!(book_id = %id, "book deleted");
        Ok(())
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        Ok(self.repository.get_all().await?)
    }
}
