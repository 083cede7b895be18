use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reading-progress record for one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadBook {
    pub id: String,
    /// Id of the book being read. Not checked against the books collection.
    pub book_id: String,
    pub start_date: DateTime<Utc>,
    pub expected_end_date: Option<DateTime<Utc>>,
    pub actual_end_date: Option<DateTime<Utc>>,
    /// Reading log, oldest entry first
    #[serde(default)]
    pub comments: Vec<String>,
    pub rating: Option<i32>,
}

/// Request body for creating or replacing a read-book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadBookPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub book_id: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub expected_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub rating: Option<i32>,
}

impl ReadBookPayload {
    pub fn into_read_book(self, id: impl Into<String>) -> ReadBook {
        ReadBook {
            id: id.into(),
            book_id: self.book_id,
            start_date: self.start_date,
            expected_end_date: self.expected_end_date,
            actual_end_date: self.actual_end_date,
            comments: self.comments,
            rating: self.rating,
        }
    }
}

/// Body of `POST /read_books/{id}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentPayload {
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_payload_decodes() {
        let payload: ReadBookPayload = serde_json::from_value(json!({
            "book_id": "65f0c0ffee0000000000abcd",
            "start_date": "2024-03-01T09:30:00Z"
        }))
        .unwrap();

        assert!(payload.comments.is_empty());
        assert_eq!(payload.rating, None);
        assert_eq!(payload.actual_end_date, None);
    }

    #[test]
    fn missing_start_date_is_rejected() {
        let result = serde_json::from_value::<ReadBookPayload>(json!({
            "book_id": "65f0c0ffee0000000000abcd"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn unset_optional_fields_serialize_as_null() {
        let read_book = ReadBook {
            id: "r-1".to_string(),
            book_id: "b-1".to_string(),
            start_date: "2024-03-01T09:30:00Z".parse().unwrap(),
            expected_end_date: None,
            actual_end_date: None,
            comments: vec!["chapter one".to_string()],
            rating: None,
        };

        let value = serde_json::to_value(&read_book).unwrap();
        assert_eq!(value["start_date"], "2024-03-01T09:30:00Z");
        assert!(value["actual_end_date"].is_null());
        assert!(value["rating"].is_null());
        assert_eq!(value["comments"], json!(["chapter one"]));
    }

    #[test]
    fn comment_payload_rejects_other_keys() {
        assert!(serde_json::from_value::<CommentPayload>(json!({"text": "hi"})).is_err());
    }
}
