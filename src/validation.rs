//! Structural checks run before anything reaches the store.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::modules::books::models::BookPayload;
use crate::modules::read_books::models::{CommentPayload, ReadBookPayload};

/// First structural rule a record breaks. The message is shown to clients verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is required")]
    TitleRequired,
    #[error("author is required")]
    AuthorRequired,
    #[error("pages must be greater than zero")]
    PagesNotPositive,
    #[error("book_id is required")]
    BookIdRequired,
    #[error("start_date is required")]
    StartDateRequired,
    #[error("comment is required")]
    CommentRequired,
}

/// Checks title, then author, then pages.
pub fn validate_book(book: &BookPayload) -> Result<(), ValidationError> {
    if book.title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if book.author.trim().is_empty() {
        return Err(ValidationError::AuthorRequired);
    }
    if book.pages <= 0 {
        return Err(ValidationError::PagesNotPositive);
    }
    Ok(())
}

pub fn validate_read_book(read_book: &ReadBookPayload) -> Result<(), ValidationError> {
    if read_book.book_id.trim().is_empty() {
        return Err(ValidationError::BookIdRequired);
    }
    if is_zero_timestamp(&read_book.start_date) {
        return Err(ValidationError::StartDateRequired);
    }
    Ok(())
}

pub fn validate_comment(comment: &CommentPayload) -> Result<(), ValidationError> {
    if comment.comment.trim().is_empty() {
        return Err(ValidationError::CommentRequired);
    }
    Ok(())
}

/// `0001-01-01T00:00:00Z`, what clients send for an unset timestamp.
fn is_zero_timestamp(timestamp: &DateTime<Utc>) -> bool {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .is_some_and(|zero| timestamp.naive_utc() == zero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: &str, pages: i32) -> BookPayload {
        BookPayload {
            id: None,
            title: title.to_string(),
            subtitle: String::new(),
            author: author.to_string(),
            pages,
            publisher: String::new(),
            comments: String::new(),
        }
    }

    fn read_book(book_id: &str, start_date: &str) -> ReadBookPayload {
        ReadBookPayload {
            id: None,
            book_id: book_id.to_string(),
            start_date: start_date.parse().unwrap(),
            expected_end_date: None,
            actual_end_date: None,
            comments: Vec::new(),
            rating: None,
        }
    }

    #[test]
    fn accepts_complete_book() {
        assert_eq!(validate_book(&book("Dune", "Herbert", 412)), Ok(()));
    }

    #[test]
    fn whitespace_title_is_blank() {
        assert_eq!(
            validate_book(&book("   ", "Herbert", 412)),
            Err(ValidationError::TitleRequired)
        );
    }

    #[test]
    fn blank_author_is_rejected() {
        assert_eq!(
            validate_book(&book("Dune", "\t", 412)),
            Err(ValidationError::AuthorRequired)
        );
    }

    #[test]
    fn non_positive_pages_are_rejected() {
        for pages in [0, -1, i32::MIN] {
            assert_eq!(
                validate_book(&book("Dune", "Herbert", pages)),
                Err(ValidationError::PagesNotPositive)
            );
        }
    }

    #[test]
    fn title_is_reported_before_author_and_pages() {
        let err = validate_book(&book("", "", 0)).unwrap_err();
        assert_eq!(err.to_string(), "title is required");

        let err = validate_book(&book("Dune", "", 0)).unwrap_err();
        assert_eq!(err.to_string(), "author is required");
    }

    #[test]
    fn read_book_needs_book_id() {
        assert_eq!(
            validate_read_book(&read_book(" ", "2024-03-01T00:00:00Z")),
            Err(ValidationError::BookIdRequired)
        );
    }

    #[test]
    fn read_book_rejects_zero_start_date() {
        assert_eq!(
            validate_read_book(&read_book("b-1", "0001-01-01T00:00:00Z")),
            Err(ValidationError::StartDateRequired)
        );
        assert_eq!(
            validate_read_book(&read_book("b-1", "2024-03-01T09:30:00Z")),
            Ok(())
        );
    }

    #[test]
    fn blank_comment_is_rejected() {
        let comment = CommentPayload {
            comment: "  ".to_string(),
        };
        assert_eq!(
            validate_comment(&comment),
            Err(ValidationError::CommentRequired)
        );
    }
}
