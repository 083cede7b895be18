use std::sync::Arc;

use libris_db::StoreError;
use thiserror::Error;

use super::models::{CommentPayload, ReadBook, ReadBookPayload};
use super::repository::ReadBookRepository;
use crate::validation::{validate_comment, validate_read_book, ValidationError};

#[derive(Error, Debug)]
pub enum ReadBookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("read book not found")]
    NotFound,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ReadBookError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            ReadBookError::NotFound
        } else {
            ReadBookError::Store(err)
        }
    }
}

/// Read-book use cases. `book_id` is taken as given; it is not looked up
/// in the books collection.
#[derive(Clone)]
pub struct ReadBookService {
    repository: Arc<dyn ReadBookRepository>,
}

impl ReadBookService {
    pub fn new(repository: Arc<dyn ReadBookRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_read_book(
        &self,
        payload: ReadBookPayload,
    ) -> Result<ReadBook, ReadBookError> {
        validate_read_book(&payload)?;
        let read_book = self
            .repository
            .create(payload.into_read_book(String::new()))
            .await?;
        tracing::info!(
            read_book_id = %read_book.id,
            book_id = %read_book.book_id,
            "read book created"
        );
        Ok(read_book)
    }

    pub async fn get_read_book(&self, id: &str) -> Result<ReadBook, ReadBookError> {
        Ok(self.repository.get_by_id(id).await?)
    }

    pub async fn list_read_books(&self) -> Result<Vec<ReadBook>, ReadBookError> {
        Ok(self.repository.get_all().await?)
    }

    pub async fn update_read_book(
        &self,
        id: &str,
        payload: ReadBookPayload,
    ) -> Result<ReadBook, ReadBookError> {
        validate_read_book(&payload)?;
        let read_book = payload.into_read_book(id);
        self.repository.update(&read_book).await?;
        Ok(read_book)
    }

    pub async fn delete_read_book(&self, id: &str) -> Result<(), ReadBookError> {
        self.repository.delete(id).await?;
        tracing::info!(read_book_id = %id, "read book deleted");
        Ok(())
    }

    pub async fn add_comment(
        &self,
        id: &str,
        payload: CommentPayload,
    ) -> Result<(), ReadBookError> {
        validate_comment(&payload)?;
        self.repository.add_comment(id, &payload.comment).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::read_books::repository::InMemoryReadBookRepository;

    fn payload(book_id: &str) -> ReadBookPayload {
        ReadBookPayload {
            id: None,
            book_id: book_id.to_string(),
            start_date: "2024-03-01T09:30:00Z".parse().unwrap(),
            expected_end_date: None,
            actual_end_date: None,
            comments: Vec::new(),
            rating: None,
        }
    }

    fn comment(text: &str) -> CommentPayload {
        CommentPayload {
            comment: text.to_string(),
        }
    }

    fn service() -> ReadBookService {
        ReadBookService::new(Arc::new(InMemoryReadBookRepository::new()))
    }

    #[tokio::test]
    async fn blank_book_id_is_rejected_on_create_and_update() {
        let service = service();

        assert!(matches!(
            service.create_read_book(payload("")).await,
            Err(ReadBookError::Validation(ValidationError::BookIdRequired))
        ));

        let created = service.create_read_book(payload("b-1")).await.unwrap();
        assert!(matches!(
            service.update_read_book(&created.id, payload(" ")).await,
            Err(ReadBookError::Validation(ValidationError::BookIdRequired))
        ));
        assert!(service.list_read_books().await.unwrap().len() == 1);
    }

    #[tokio::test]
    async fn update_keeps_path_id() {
        let service = service();
        let created = service.create_read_book(payload("b-1")).await.unwrap();

        let mut change = payload("b-1");
        change.id = Some("other".to_string());
        change.rating = Some(4);
        let updated = service.update_read_book(&created.id, change).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(
            service.get_read_book(&created.id).await.unwrap().rating,
            Some(4)
        );
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found() {
        let result = service().update_read_book("missing", payload("b-1")).await;
        assert!(matches!(result, Err(ReadBookError::NotFound)));
    }

    #[tokio::test]
    async fn comments_keep_append_order() {
        let service = service();
        let created = service.create_read_book(payload("b-1")).await.unwrap();

        service.add_comment(&created.id, comment("a")).await.unwrap();
        service.add_comment(&created.id, comment("b")).await.unwrap();

        let fetched = service.get_read_book(&created.id).await.unwrap();
        assert_eq!(fetched.comments, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn blank_comment_is_rejected() {
        let service = service();
        let created = service.create_read_book(payload("b-1")).await.unwrap();

        assert!(matches!(
            service.add_comment(&created.id, comment("")).await,
            Err(ReadBookError::Validation(ValidationError::CommentRequired))
        ));
        assert!(service
            .get_read_book(&created.id)
            .await
            .unwrap()
            .comments
            .is_empty());
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let service = service();
        let created = service.create_read_book(payload("b-1")).await.unwrap();

        service.delete_read_book(&created.id).await.unwrap();
        assert!(matches!(
            service.delete_read_book(&created.id).await,
            Err(ReadBookError::NotFound)
        ));
    }
}
