//! Stateless demo endpoints kept for API walkthroughs.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query,
    },
    routing::get,
    Json, Router,
};
use libris_http::error::AppResult;
use libris_kernel::Module;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Demo module with greeting, arithmetic and user listing endpoints
pub struct DemoModule;

impl DemoModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for DemoModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for DemoModule {
    fn name(&self) -> &'static str {
        "demo"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/hello", get(hello))
            .route("/greet/{name}", get(greet))
            .route("/square", get(square))
            .route("/api/users", get(list_users))
            .route("/api/users/{id}", get(get_user))
    }

    fn openapi(&self) -> Option<Value> {
        let message = json!({
            "description": "Greeting",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Message" }
                }
            }
        });
        let user = json!({ "$ref": "#/components/schemas/User" });

        Some(json!({
            "paths": {
                "/hello": {
                    "get": {
                        "summary": "Say hello",
                        "tags": ["Demo"],
                        "responses": { "200": message.clone() }
                    }
                },
                "/greet/{name}": {
                    "get": {
                        "summary": "Greet someone by name",
                        "tags": ["Demo"],
                        "parameters": [{
                            "name": "name",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": { "200": message }
                    }
                },
                "/square": {
                    "get": {
                        "summary": "Calculate square",
                        "description": "Returns the square of a number",
                        "tags": ["Demo"],
                        "parameters": [{
                            "name": "number",
                            "in": "query",
                            "required": true,
                            "schema": { "type": "integer", "format": "int64" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Number and its square",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Square" }
                                    }
                                }
                            },
                            "422": {
                                "description": "Missing or non-integer number",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/api/users": {
                    "get": {
                        "summary": "List users",
                        "tags": ["Users"],
                        "responses": {
                            "200": {
                                "description": "List of users",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "array", "items": user.clone() }
                                    }
                                }
                            }
                        }
                    }
                },
                "/api/users/{id}": {
                    "get": {
                        "summary": "Get a user",
                        "tags": ["Users"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer", "format": "int64" }
                        }],
                        "responses": {
                            "200": {
                                "description": "User",
                                "content": { "application/json": { "schema": user } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Message": {
                        "type": "object",
                        "properties": { "message": { "type": "string" } },
                        "required": ["message"]
                    },
                    "Square": {
                        "type": "object",
                        "properties": {
                            "number": { "type": "integer" },
                            "square": { "type": "integer" }
                        },
                        "required": ["number", "square"]
                    },
                    "User": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string" }
                        },
                        "required": ["id", "name"]
                    }
                }
            }
        }))
    }
}

/// Demo user record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct SquareQuery {
    number: i64,
}

#[derive(Debug, PartialEq, Serialize)]
struct Square {
    number: i64,
    /// Widened so every `i64` input squares exactly
    square: i128,
}

async fn hello() -> Json<Value> {
    Json(json!({"message": "Hello, world!"}))
}

async fn greet(Path(name): Path<String>) -> Json<Value> {
    Json(json!({"message": format!("Hello, {name}!")}))
}

async fn square(query: Result<Query<SquareQuery>, QueryRejection>) -> AppResult<Json<Square>> {
    let Query(SquareQuery { number }) = query?;
    Ok(Json(Square {
        number,
        square: i128::from(number) * i128::from(number),
    }))
}

async fn list_users() -> Json<Vec<User>> {
    Json(vec![
        User {
            id: 1,
            name: "Alice".to_string(),
        },
        User {
            id: 2,
            name: "Bob".to_string(),
        },
    ])
}

async fn get_user(path: Result<Path<i64>, PathRejection>) -> AppResult<Json<User>> {
    let Path(id) = path?;
    Ok(Json(User {
        id,
        name: format!("User {id}"),
    }))
}

/// Create a new instance of the demo module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(DemoModule::new())
}
