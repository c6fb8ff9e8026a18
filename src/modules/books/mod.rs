pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
pub mod validation;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{settings::BooksSettings, InitCtx, Module};
use serde_json::json;

use service::BookService;
use validation::ValidationRules;

/// Books module: an in-memory catalogue served under `/api/books`
pub struct BooksModule {
    service: BookService,
    seed_on_startup: bool,
}

impl BooksModule {
    pub fn new(settings: &BooksSettings) -> Self {
        Self {
            service: BookService::new(ValidationRules::from(settings)),
            seed_on_startup: settings.seed_on_startup,
        }
    }

    /// Handle to the module's book service.
    pub fn service(&self) -> &BookService {
        &self.service
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let inserted = if self.seed_on_startup {
            self.service.seed().await
        } else {
            0
        };

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            description_max_len = self.service.rules().description_max_len,
            seeded = inserted,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment(self.service.rules()))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.service.len().await;
        tracing::info!(module = self.name(), books, "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.service.len().await;
        tracing::info!(
            module = self.name(),
            books,
            "books module stopped, in-memory records discarded"
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

fn json_response(description: &str, schema: serde_json::Value) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": schema }
        }
    })
}

fn book_id_parameter() -> serde_json::Value {
    json!({
        "name": "book_id",
        "in": "path",
        "required": true,
        "schema": { "type": "string", "format": "uuid" }
    })
}

fn openapi_fragment(rules: ValidationRules) -> serde_json::Value {
    let book_ref = json!({ "$ref": "#/components/schemas/Book" });
    let book_list = json!({ "type": "array", "items": { "$ref": "#/components/schemas/Book" } });
    let book_input_body = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookInput" }
            }
        }
    });
    let not_found = error_response("Book not found");
    let invalid = error_response("Validation error");

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List all books",
                    "tags": ["Books"],
                    "responses": {
                        "200": json_response("All books in insertion order", book_list.clone())
                    }
                },
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": book_input_body.clone(),
                    "responses": {
                        "201": json_response("Created book", book_ref.clone()),
                        "409": error_response("A book with this id already exists"),
                        "422": invalid.clone()
                    }
                }
            },
            "/read_some_books": {
                "get": {
                    "summary": "List the first N books",
                    "tags": ["Books"],
                    "parameters": [{
                        "name": "books_to_return",
                        "in": "query",
                        "required": false,
                        "schema": { "type": "integer", "format": "int64" }
                    }],
                    "responses": {
                        "200": json_response("Prefix of the book list", book_list),
                        "418": error_response("Negative number given as the limit"),
                        "422": invalid.clone()
                    }
                }
            },
            "/no_rating/{book_id}": {
                "get": {
                    "summary": "Get a book without its rating",
                    "tags": ["Books"],
                    "parameters": [book_id_parameter()],
                    "responses": {
                        "200": json_response(
                            "Book without rating",
                            json!({ "$ref": "#/components/schemas/BookNoRating" })
                        ),
                        "404": not_found.clone()
                    }
                }
            },
            "/{book_id}": {
                "get": {
                    "summary": "Get a book by id",
                    "tags": ["Books"],
                    "parameters": [book_id_parameter()],
                    "responses": {
                        "200": json_response("Book", book_ref.clone()),
                        "404": not_found.clone()
                    }
                },
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "parameters": [book_id_parameter()],
                    "requestBody": book_input_body,
                    "responses": {
                        "200": json_response("Replaced book", book_ref),
                        "404": not_found.clone(),
                        "422": invalid
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [book_id_parameter()],
                    "responses": {
                        "200": json_response(
                            "Deletion confirmation",
                            json!({
                                "type": "object",
                                "properties": { "message": { "type": "string" } },
                                "required": ["message"]
                            })
                        ),
                        "404": not_found
                    }
                }
            },
            "/seed": {
                "post": {
                    "summary": "Populate an empty store with sample books",
                    "tags": ["Books"],
                    "responses": {
                        "200": json_response(
                            "Number of inserted books",
                            json!({
                                "type": "object",
                                "properties": { "inserted": { "type": "integer" } },
                                "required": ["inserted"]
                            })
                        )
                    }
                }
            },
            "/login": {
                "post": {
                    "summary": "Echo submitted credentials",
                    "tags": ["Books"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/x-www-form-urlencoded": {
                                "schema": { "$ref": "#/components/schemas/LoginForm" }
                            }
                        }
                    },
                    "responses": {
                        "200": json_response(
                            "Submitted credentials",
                            json!({ "$ref": "#/components/schemas/LoginForm" })
                        ),
                        "422": error_response("Missing form field")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Books health check",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {
                                "text/plain": { "schema": { "type": "string" } }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "title": { "type": "string", "minLength": 1 },
                        "author": {
                            "type": "string",
                            "minLength": 1,
                            "maxLength": validation::AUTHOR_MAX_LEN
                        },
                        "description": {
                            "type": "string",
                            "minLength": 1,
                            "maxLength": rules.description_max_len
                        },
                        "rating": {
                            "type": "integer",
                            "minimum": validation::RATING_MIN,
                            "maximum": validation::RATING_MAX
                        }
                    },
                    "required": ["id", "title", "author", "rating"]
                },
                "BookInput": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "string",
                            "format": "uuid",
                            "description": "Generated when omitted on create; must match the path on replace"
                        },
                        "title": { "type": "string", "minLength": 1 },
                        "author": {
                            "type": "string",
                            "minLength": 1,
                            "maxLength": validation::AUTHOR_MAX_LEN
                        },
                        "description": {
                            "type": "string",
                            "minLength": 1,
                            "maxLength": rules.description_max_len
                        },
                        "rating": {
                            "type": "integer",
                            "minimum": validation::RATING_MIN,
                            "maximum": validation::RATING_MAX
                        }
                    },
                    "required": ["title", "author", "rating"],
                    "example": {
                        "id": "a12d756f-4ca3-46ee-a5dc-4d81000c36f7",
                        "title": "book1 title",
                        "author": "author1",
                        "description": "description1",
                        "rating": 90
                    }
                },
                "BookNoRating": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "description": { "type": "string" }
                    },
                    "required": ["id", "title", "author"]
                },
                "LoginForm": {
                    "type": "object",
                    "properties": {
                        "username": { "type": "string" },
                        "password": { "type": "string" }
                    },
                    "required": ["username", "password"]
                }
            }
        }
    })
}

/// Create a new instance of the books module
pub fn create_module(settings: &BooksSettings) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(settings))
}
