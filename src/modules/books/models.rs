use serde::{Deserialize, Serialize};

/// A catalogued book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier for the book, assigned by the store
    pub id: String,
    /// Title of the book
    pub title: String,
    pub subtitle: String,
    /// Author of the book
    pub author: String,
    /// Page count, always positive once stored
    pub pages: i32,
    pub publisher: String,
    /// Freeform notes about the book
    pub comments: String,
}

/// Request body for creating or replacing a book.
///
/// An `id` key is tolerated so clients can send back what they fetched, but
/// it never overrides the server-assigned or path identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub author: String,
    pub pages: i32,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub comments: String,
}

impl BookPayload {
    pub fn into_book(self, id: impl Into<String>) -> Book {
        Book {
            id: id.into(),
            title: self.title,
            subtitle: self.subtitle,
            author: self.author,
            pages: self.pages,
            publisher: self.publisher,
            comments: self.comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_default_to_empty() {
        let payload: BookPayload =
            serde_json::from_value(json!({"title": "Dune", "author": "Herbert", "pages": 412}))
                .unwrap();

        assert_eq!(payload.subtitle, "");
        assert_eq!(payload.publisher, "");
        assert_eq!(payload.comments, "");
        assert_eq!(payload.id, None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_value::<BookPayload>(json!({
            "title": "Dune",
            "author": "Herbert",
            "pages": 412,
            "isbn": "978-0441013593"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let result = serde_json::from_value::<BookPayload>(json!({"title": "Dune", "pages": 412}));
        assert!(result.is_err());
    }

    #[test]
    fn into_book_uses_given_id_over_payload_id() {
        let payload = BookPayload {
            id: Some("client-chosen".to_string()),
            title: "Dune".to_string(),
            subtitle: String::new(),
            author: "Herbert".to_string(),
            pages: 412,
            publisher: "Chilton".to_string(),
            comments: String::new(),
        };

        let book = payload.into_book("65f0c0ffee0000000000abcd");
        assert_eq!(book.id, "65f0c0ffee0000000000abcd");
        assert_eq!(book.publisher, "Chilton");
    }
}
