pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use service::BookService;

/// In-memory book records served under `/books`
pub struct BooksModule {
    service: Arc<BookService>,
}

impl BooksModule {
    pub fn new(service: Arc<BookService>) -> Self {
        Self { service }
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
        routes::router(self.service.clone())
    }

    fn route_prefix(&self) -> Option<String> {
        None
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        // Records live only in memory; report what is being dropped.
        let discarded = self.service.count().unwrap_or_default();
        tracing::info!(module = self.name(), discarded, "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module with an empty store
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new(Arc::new(BookService::default())))
}

fn fail_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn success_response(description: &str, data: serde_json::Value) -> serde_json::Value {
    let mut properties = json!({
        "status": { "type": "string", "enum": ["success"] },
        "message": { "type": "string" }
    });
    if !data.is_null() {
        properties["data"] = data;
    }

    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": properties,
                    "required": ["status"]
                }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let book_id_param = json!({
        "name": "bookId",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    });
    let flag_param = |name: &str, description: &str| {
        json!({
            "name": name,
            "in": "query",
            "required": false,
            "description": description,
            "schema": { "type": "string", "enum": ["0", "1"] }
        })
    };
    let payload_body = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookPayload" }
            }
        }
    });

    json!({
        "paths": {
            "/books": {
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": payload_body.clone(),
                    "responses": {
                        "201": success_response("Book added", json!({
                            "type": "object",
                            "properties": { "bookId": { "type": "string" } }
                        })),
                        "400": fail_response("Missing name or readPage above pageCount"),
                        "500": fail_response("Book could not be stored")
                    }
                },
                "get": {
                    "summary": "List books",
                    "description": "At most one filter applies: reading, then finished, then name.",
                    "tags": ["Books"],
                    "parameters": [
                        flag_param("reading", "1 for books being read, 0 otherwise"),
                        flag_param("finished", "1 for finished books, 0 otherwise"),
                        {
                            "name": "name",
                            "in": "query",
                            "required": false,
                            "description": "Case-insensitive substring of the book name",
                            "schema": { "type": "string" }
                        }
                    ],
                    "responses": {
                        "200": success_response("Book summaries", json!({
                            "type": "object",
                            "properties": {
                                "books": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/BookSummary" }
                                }
                            }
                        }))
                    }
                }
            },
            "/books/{bookId}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param.clone()],
                    "responses": {
                        "200": success_response("Book details", json!({
                            "type": "object",
                            "properties": { "book": { "$ref": "#/components/schemas/Book" } }
                        })),
                        "404": fail_response("Unknown book id")
                    }
                },
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param.clone()],
                    "requestBody": payload_body,
                    "responses": {
                        "200": success_response("Book updated", serde_json::Value::Null),
                        "400": fail_response("Missing name or readPage above pageCount"),
                        "404": fail_response("Unknown book id")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param],
                    "responses": {
                        "200": success_response("Book deleted", serde_json::Value::Null),
                        "404": fail_response("Unknown book id")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "year": { "type": "integer" },
                        "author": { "type": "string" },
                        "summary": { "type": "string" },
                        "publisher": { "type": "string" },
                        "pageCount": { "type": "integer", "minimum": 0 },
                        "readPage": { "type": "integer", "minimum": 0 },
                        "finished": { "type": "boolean" },
                        "reading": { "type": "boolean" },
                        "insertedAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    },
                    "required": [
                        "id", "name", "year", "author", "summary", "publisher",
                        "pageCount", "readPage", "finished", "reading",
                        "insertedAt", "updatedAt"
                    ]
                },
                "BookPayload": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "year": { "type": "integer" },
                        "author": { "type": "string" },
                        "summary": { "type": "string" },
                        "publisher": { "type": "string" },
                        "pageCount": { "type": "integer", "minimum": 0 },
                        "readPage": { "type": "integer", "minimum": 0 },
                        "reading": { "type": "boolean" }
                    },
                    "required": ["name"]
                },
                "BookSummary": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "publisher": { "type": "string" }
                    },
                    "required": ["id", "name", "publisher"]
                }
            }
        }
    })
}
