use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};
use uuid::Uuid;

use libris_db::{Deadline, DocumentStore, MemoryCollection, Result, StoreError};

use super::models::ReadBook;

/// Persistence gateway for read-book records.
#[async_trait]
pub trait ReadBookRepository: Send + Sync {
    /// Store `read_book` under a freshly generated id, ignoring `read_book.id`.
    async fn create(&self, read_book: ReadBook) -> Result<ReadBook>;
    async fn get_by_id(&self, id: &str) -> Result<ReadBook>;
    /// Overwrite the whole record matching `read_book.id`, comments included.
    async fn update(&self, read_book: &ReadBook) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
    async fn get_all(&self) -> Result<Vec<ReadBook>>;
    /// Append one entry to the end of the record's comments.
    async fn add_comment(&self, id: &str, comment: &str) -> Result<()>;
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// MongoDB-backed read-book repository, keyed by the `id` field.
pub struct MongoReadBookRepository {
    collection: Collection<ReadBook>,
    deadline: Deadline,
}

impl MongoReadBookRepository {
    pub fn new(store: &DocumentStore, collection: &str) -> Self {
        Self {
            collection: store.collection(collection),
            deadline: store.deadline(),
        }
    }
}

#[async_trait]
impl ReadBookRepository for MongoReadBookRepository {
    async fn create(&self, mut read_book: ReadBook) -> Result<ReadBook> {
        read_book.id = new_id();

        self.deadline
            .run(async {
                self.collection
                    .insert_one(&read_book)
                    .await
                    .map_err(StoreError::from)
            })
            .await?;

        Ok(read_book)
    }

    async fn get_by_id(&self, id: &str) -> Result<ReadBook> {
        let found = self
            .deadline
            .run(async {
                self.collection
                    .find_one(doc! { "id": id })
                    .await
                    .map_err(StoreError::from)
            })
            .await?;

        found.ok_or(StoreError::NotFound)
    }

    async fn update(&self, read_book: &ReadBook) -> Result<()> {
        let result = self
            .deadline
            .run(async {
                self.collection
                    .replace_one(doc! { "id": read_book.id.as_str() }, read_book)
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
        let result = self
            .deadline
            .run(async {
                self.collection
                    .delete_one(doc! { "id": id })
                    .await
                    .map_err(StoreError::from)
            })
            .await?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<ReadBook>> {
        self.deadline
            .run(async {
                let cursor = self.collection.find(doc! {}).await?;
                cursor.try_collect::<Vec<_>>().await.map_err(StoreError::from)
            })
            .await
    }

    async fn add_comment(&self, id: &str, comment: &str) -> Result<()> {
        // `$push` appends server-side, so concurrent appends never overwrite each other.
        let result = self
            .deadline
            .run(async {
                self.collection
                    .update_one(doc! { "id": id }, doc! { "$push": { "comments": comment } })
                    .await
                    .map_err(StoreError::from)
            })
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

/// Read-book repository kept entirely in process memory.
#[derive(Default)]
pub struct InMemoryReadBookRepository {
    read_books: MemoryCollection<ReadBook>,
}

impl InMemoryReadBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReadBookRepository for InMemoryReadBookRepository {
    async fn create(&self, mut read_book: ReadBook) -> Result<ReadBook> {
        read_book.id = new_id();
        self.read_books.insert(&read_book.id, read_book.clone())?;
        Ok(read_book)
    }

    async fn get_by_id(&self, id: &str) -> Result<ReadBook> {
        self.read_books.get(id)
    }

    async fn update(&self, read_book: &ReadBook) -> Result<()> {
        self.read_books.replace(&read_book.id, read_book.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.read_books.remove(id)
    }

    async fn get_all(&self) -> Result<Vec<ReadBook>> {
        self.read_books.list()
    }

    async fn add_comment(&self, id: &str, comment: &str) -> Result<()> {
        self.read_books
            .update(id, |read_book| read_book.comments.push(comment.to_string()))
    }
}
