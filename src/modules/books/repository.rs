use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection,
};
use serde::{Deserialize, Serialize};

use libris_db::{Deadline, DocumentStore, MemoryCollection, Result, StoreError};

use super::models::Book;

/// Persistence gateway for books.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Store `book` under a freshly generated id, ignoring `book.id`.
    async fn create(&self, book: Book) -> Result<Book>;
    async fn get_by_id(&self, id: &str) -> Result<Book>;
    /// Overwrite every mutable field of the book matching `book.id`.
    async fn update(&self, book: &Book) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
    async fn get_all(&self) -> Result<Vec<Book>>;
}

/// Book ids are the hex form of the store's native object id.
fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Lowercase hex form, matching how ids are handed out; the store's own
/// parser accepts either case.
fn canonical_id(id: &str) -> Result<String> {
    parse_id(id).map(|object_id| object_id.to_hex())
}

/// On-disk shape: the book id lives in `_id` as a native object id.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    subtitle: String,
    author: String,
    pages: i32,
    publisher: String,
    comments: String,
}

impl BookDocument {
    fn new(id: ObjectId, book: &Book) -> Self {
        Self {
            id,
            title: book.title.clone(),
            subtitle: book.subtitle.clone(),
            author: book.author.clone(),
            pages: book.pages,
            publisher: book.publisher.clone(),
            comments: book.comments.clone(),
        }
    }
}

impl From<BookDocument> for Book {
    fn from(document: BookDocument) -> Self {
        Book {
            id: document.id.to_hex(),
            title: document.title,
            subtitle: document.subtitle,
            author: document.author,
            pages: document.pages,
            publisher: document.publisher,
            comments: document.comments,
        }
    }
}

/// MongoDB-backed book repository.
pub struct MongoBookRepository {
    collection: Collection<BookDocument>,
    deadline: Deadline,
}

impl MongoBookRepository {
    pub fn new(store: &DocumentStore, collection: &str) -> Self {
        Self {
            collection: store.collection(collection),
            deadline: store.deadline(),
        }
    }
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn create(&self, mut book: Book) -> Result<Book> {
        let id = ObjectId::new();
        let document = BookDocument::new(id, &book);

        self.deadline
            .run(async {
                self.collection
                    .insert_one(&document)
                    .await
                    .map_err(StoreError::from)
            })
            .await?;

        book.id = id.to_hex();
        Ok(book)
    }

    async fn get_by_id(&self, id: &str) -> Result<Book> {
        let object_id = parse_id(id)?;

        let document = self
            .deadline
            .run(async {
                self.collection
                    .find_one(doc! { "_id": object_id })
                    .await
                    .map_err(StoreError::from)
            })
            .await?;

        document.map(Book::from).ok_or(StoreError::NotFound)
    }

    async fn update(&self, book: &Book) -> Result<()> {
        let object_id = parse_id(&book.id)?;
        let document = BookDocument::new(object_id, book);

        let result = self
            .deadline
            .run(async {
                self.collection
                    .replace_one(doc! { "_id": object_id }, &document)
                    .await
                    .map_err(StoreError::from)
            })
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let object_id = parse_id(id)?;

        let result = self
            .deadline
            .run(async {
                self.collection
                    .delete_one(doc! { "_id": object_id })
                    .await
                    .map_err(StoreError::from)
            })
            .await?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Book>> {
        let documents: Vec<BookDocument> = self
            .deadline
            .run(async {
                let cursor = self.collection.find(doc! {}).await?;
                cursor.try_collect::<Vec<_>>().await.map_err(StoreError::from)
            })
            .await?;

        Ok(documents.into_iter().map(Book::from).collect())
    }
}

/// Book repository kept entirely in process memory.
///
/// Ids have the same shape as the MongoDB backend's, so malformed ids are
/// rejected the same way.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: MemoryCollection<Book>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, mut book: Book) -> Result<Book> {
        book.id = ObjectId::new().to_hex();
        self.books.insert(&book.id, book.clone())?;
        Ok(book)
    }

    async fn get_by_id(&self, id: &str) -> Result<Book> {
        self.books.get(&canonical_id(id)?)
    }

    async fn update(&self, book: &Book) -> Result<()> {
        let id = canonical_id(&book.id)?;
        let mut book = book.clone();
        book.id = id.clone();
        self.books.replace(&id, book)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.books.remove(&canonical_id(id)?)
    }

    async fn get_all(&self) -> Result<Vec<Book>> {
        self.books.list()
    }
}
