pub mod models;
pub mod repository;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use libris_kernel::{InitCtx, Module};
use serde_json::json;

use repository::BookRepository;
use service::BookService;

/// Books catalog module: CRUD over `/books`
pub struct BooksModule {
    service: BookService,
}

impl BooksModule {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self {
            service: BookService::new(repository),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            collection = %ctx.settings.database.books_collection,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let with_description = |description: &str| {
            let mut response = error.clone();
            response["description"] = json!(description);
            response
        };
        let book_envelope = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/BookEnvelope" }
                    }
                }
            })
        };
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "description": "Book ID",
            "schema": { "type": "string" }
        }]);
        let book_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookPayload" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "All books",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookListEnvelope" }
                                    }
                                }
                            },
                            "500": with_description("Internal server error")
                        }
                    },
                    "post": {
                        "summary": "Create a new book",
                        "tags": ["Books"],
                        "requestBody": book_body.clone(),
                        "responses": {
                            "201": book_envelope("Created book, including its generated id"),
                            "400": with_description("Invalid payload or validation failure"),
                            "500": with_description("Failed to create book")
                        }
                    }
                },
                "/books/{id}": {
                    "get": {
                        "summary": "Get a book by ID",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "responses": {
                            "200": book_envelope("The book"),
                            "404": with_description("Book not found"),
                            "500": with_description("Internal server error")
                        }
                    },
                    "put": {
                        "summary": "Replace a book by ID",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "requestBody": book_body,
                        "responses": {
                            "200": book_envelope("The updated book"),
                            "400": with_description("Invalid payload or validation failure"),
                            "404": with_description("Book not found"),
                            "500": with_description("Internal server error")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book by ID",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "204": { "description": "Deleted" },
                            "404": with_description("Book not found"),
                            "500": with_description("Internal server error")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "description": "Unique identifier for the book" },
                            "title": { "type": "string" },
                            "subtitle": { "type": "string" },
                            "author": { "type": "string" },
                            "pages": { "type": "integer", "minimum": 1 },
                            "publisher": { "type": "string" },
                            "comments": { "type": "string" }
                        },
                        "required": ["id", "title", "subtitle", "author", "pages", "publisher", "comments"]
                    },
                    "BookPayload": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "subtitle": { "type": "string" },
                            "author": { "type": "string" },
                            "pages": { "type": "integer", "minimum": 1 },
                            "publisher": { "type": "string" },
                            "comments": { "type": "string" }
                        },
                        "required": ["title", "author", "pages"]
                    },
                    "BookEnvelope": {
                        "type": "object",
                        "properties": {
                            "data": { "$ref": "#/components/schemas/Book" }
                        },
                        "required": ["data"]
                    },
                    "BookListEnvelope": {
                        "type": "object",
                        "properties": {
                            "data": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }
                        },
                        "required": ["data"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(repository: Arc<dyn BookRepository>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(repository))
}
