pub mod books;
pub mod read_books;

use std::sync::Arc;

use libris_db::DocumentStore;
use libris_kernel::{
    settings::{DatabaseSettings, StoreBackend},
    ModuleRegistry,
};

use books::repository::{BookRepository, InMemoryBookRepository, MongoBookRepository};
use read_books::repository::{
    InMemoryReadBookRepository, MongoReadBookRepository, ReadBookRepository,
};

/// The storage handles every module is built from.
#[derive(Clone)]
pub struct Repositories {
    pub books: Arc<dyn BookRepository>,
    pub read_books: Arc<dyn ReadBookRepository>,
}

impl Repositories {
    /// Open the configured backend.
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        match settings.backend {
            StoreBackend::Mongo => {
                let store = DocumentStore::connect(settings).await?;
                Ok(Self::mongo(&store, settings))
            }
            StoreBackend::Memory => {
                tracing::warn!("using the in-memory store; data is lost on shutdown");
                Ok(Self::in_memory())
            }
        }
    }

    pub fn mongo(store: &DocumentStore, settings: &DatabaseSettings) -> Self {
        Self {
            books: Arc::new(MongoBookRepository::new(store, &settings.books_collection)),
            read_books: Arc::new(MongoReadBookRepository::new(
                store,
                &settings.read_books_collection,
            )),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(InMemoryBookRepository::new()),
            read_books: Arc::new(InMemoryReadBookRepository::new()),
        }
    }
}

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, repositories: &Repositories) {
    registry.register(books::create_module(repositories.books.clone()));
    registry.register(read_books::create_module(repositories.read_books.clone()));
}
