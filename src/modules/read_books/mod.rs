pub mod models;
pub mod repository;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use libris_kernel::{InitCtx, Module};
use serde_json::json;

use repository::ReadBookRepository;
use service::ReadBookService;

/// Reading-progress module: CRUD over `/read_books` plus comment appends
pub struct ReadBooksModule {
    service: ReadBookService,
}

impl ReadBooksModule {
    pub fn new(repository: Arc<dyn ReadBookRepository>) -> Self {
        Self {
            service: ReadBookService::new(repository),
        }
    }
}

#[async_trait]
impl Module for ReadBooksModule {
    fn name(&self) -> &'static str {
        "read_books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            collection = %ctx.settings.database.read_books_collection,
            "read_books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let text = |description: &str| {
            json!({
                "description": description,
                "content": { "text/plain": { "schema": { "type": "string" } } }
            })
        };
        let read_book = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ReadBook" }
                    }
                }
            })
        };
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "description": "Read book ID",
            "schema": { "type": "string", "format": "uuid" }
        }]);
        let body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ReadBookPayload" }
                }
            }
        });
        let date = json!({ "type": "string", "format": "date-time" });
        let nullable_date = json!({ "type": ["string", "null"], "format": "date-time" });

        Some(json!({
            "paths": {
                "/read_books": {
                    "get": {
                        "summary": "List read books",
                        "tags": ["ReadBooks"],
                        "responses": {
                            "200": {
                                "description": "All read books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/ReadBook" }
                                        }
                                    }
                                }
                            },
                            "500": text("Internal server error")
                        }
                    },
                    "post": {
                        "summary": "Start tracking a book being read",
                        "tags": ["ReadBooks"],
                        "requestBody": body.clone(),
                        "responses": {
                            "201": read_book("Created record, including its generated id"),
                            "400": text("Invalid payload or validation failure"),
                            "500": text("Internal server error")
                        }
                    }
                },
                "/read_books/{id}": {
                    "get": {
                        "summary": "Get a read book by ID",
                        "tags": ["ReadBooks"],
                        "parameters": id_param.clone(),
                        "responses": {
                            "200": read_book("The record"),
                            "404": text("read book not found"),
                            "500": text("Internal server error")
                        }
                    },
                    "put": {
                        "summary": "Replace a read book by ID",
                        "tags": ["ReadBooks"],
                        "parameters": id_param.clone(),
                        "requestBody": body,
                        "responses": {
                            "200": read_book("The updated record"),
                            "400": text("Invalid payload or validation failure"),
                            "404": text("read book not found"),
                            "500": text("Internal server error")
                        }
                    },
                    "delete": {
                        "summary": "Delete a read book by ID",
                        "tags": ["ReadBooks"],
                        "parameters": id_param.clone(),
                        "responses": {
                            "204": { "description": "Deleted" },
                            "404": text("read book not found"),
                            "500": text("Internal server error")
                        }
                    }
                },
                "/read_books/{id}/comments": {
                    "post": {
                        "summary": "Append a comment to a read book",
                        "tags": ["ReadBooks"],
                        "parameters": id_param,
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CommentPayload" }
                                }
                            }
                        },
                        "responses": {
                            "200": text(routes::COMMENT_ADDED),
                            "400": text("Invalid payload or validation failure"),
                            "404": text("read book not found"),
                            "500": text("Internal server error")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "ReadBook": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "format": "uuid" },
                            "book_id": { "type": "string" },
                            "start_date": date.clone(),
                            "expected_end_date": nullable_date.clone(),
                            "actual_end_date": nullable_date.clone(),
                            "comments": { "type": "array", "items": { "type": "string" } },
                            "rating": { "type": ["integer", "null"] }
                        },
                        "required": ["id", "book_id", "start_date", "comments"]
                    },
                    "ReadBookPayload": {
                        "type": "object",
                        "properties": {
                            "book_id": { "type": "string" },
                            "start_date": date,
                            "expected_end_date": nullable_date.clone(),
                            "actual_end_date": nullable_date,
                            "comments": { "type": "array", "items": { "type": "string" } },
                            "rating": { "type": ["integer", "null"] }
                        },
                        "required": ["book_id", "start_date"]
                    },
                    "CommentPayload": {
                        "type": "object",
                        "properties": {
                            "comment": { "type": "string" }
                        },
                        "required": ["comment"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "read_books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "read_books module stopped");
        Ok(())
    }
}

pub fn create_module(repository: Arc<dyn ReadBookRepository>) -> Arc<dyn Module> {
    Arc::new(ReadBooksModule::new(repository))
}
