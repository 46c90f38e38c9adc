pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use libris_kernel::{InitCtx, Module};
use serde_json::json;

use routes::SharedStore;
use store::BookStore;

/// Books module: the in-memory catalog and its HTTP surface
pub struct BooksModule {
    store: SharedStore,
}

impl BooksModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Handle to the catalog this module serves
    pub fn store(&self) -> &SharedStore {
        &self.store
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
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            records = self.store.len(),
            active = self.store.active().len(),
            "books module stopped; catalog discarded"
        );
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn book_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        }
    })
}

fn id_param() -> serde_json::Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    })
}

fn html_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": { "text/html": { "schema": { "type": "string" } } }
    })
}

fn openapi_fragment() -> serde_json::Value {
    json!({
        "paths": {
            "/books": {
                "get": {
                    "summary": "List active books",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "Active books in creation order",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            }
                        },
                        "204": { "description": "No active books" }
                    }
                },
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CreateBook" }
                            }
                        }
                    },
                    "responses": {
                        "201": book_response("Book created"),
                        "422": error_response("Validation error")
                    }
                }
            },
            "/books/{id}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": [id_param()],
                    "responses": {
                        "200": book_response("Book"),
                        "400": error_response("Negative id"),
                        "404": error_response("Unknown id"),
                        "410": error_response("Book archived")
                    }
                },
                "put": {
                    "summary": "Update the supplied fields of a book",
                    "tags": ["Books"],
                    "parameters": [id_param()],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/UpdateBook" }
                            }
                        }
                    },
                    "responses": {
                        "200": book_response("Updated book"),
                        "404": error_response("Unknown id"),
                        "422": error_response("Validation error")
                    }
                },
                "delete": {
                    "summary": "Archive a book",
                    "tags": ["Books"],
                    "parameters": [id_param()],
                    "responses": {
                        "204": { "description": "Book archived" },
                        "400": error_response("Negative id"),
                        "404": error_response("Unknown id"),
                        "410": error_response("Book already archived")
                    }
                }
            },
            "/books/html": {
                "get": {
                    "summary": "Active books as HTML",
                    "tags": ["Books"],
                    "responses": { "200": html_response("Book list page") }
                }
            },
            "/books/{id}/html": {
                "get": {
                    "summary": "Book detail as HTML",
                    "tags": ["Books"],
                    "parameters": [id_param()],
                    "responses": {
                        "200": html_response("Book detail page"),
                        "400": error_response("Negative id"),
                        "404": error_response("Unknown id"),
                        "410": error_response("Book archived")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "title": { "type": "string", "minLength": 1 },
                        "rating": { "type": "number", "minimum": 0, "maximum": 5 },
                        "description": { "type": ["string", "null"] },
                        "archived": { "type": "boolean" }
                    },
                    "required": ["id", "title", "rating", "description", "archived"]
                },
                "CreateBook": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string", "minLength": 1 },
                        "rating": { "type": "number", "minimum": 0, "maximum": 5 },
                        "description": { "type": ["string", "null"] }
                    },
                    "required": ["title", "rating"]
                },
                "UpdateBook": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string", "minLength": 1 },
                        "rating": { "type": "number", "minimum": 0, "maximum": 5 },
                        "description": { "type": ["string", "null"] }
                    }
                }
            }
        }
    })
}

/// Create a new instance of the books module over a fresh catalog
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new(Arc::new(BookStore::new())))
}
