use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Json, Router};
use libris_authz::{SharedVerifier, TokenGuard};
use libris_kernel::Module;
use serde_json::{json, Value};

/// Token-gated endpoint backed by an injected verifier
pub struct SecureModule {
    verifier: SharedVerifier,
}

impl SecureModule {
    pub fn new(verifier: SharedVerifier) -> Self {
        Self { verifier }
    }
}

#[async_trait]
impl Module for SecureModule {
    fn name(&self) -> &'static str {
        "secure"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/secure-data", get(secure_data))
            .with_state(self.verifier.clone())
    }

    fn openapi(&self) -> Option<Value> {
        Some(json!({
            "paths": {
                "/secure-data": {
                    "get": {
                        "summary": "Token-gated message",
                        "tags": ["Secure"],
                        "parameters": [{
                            "name": "token",
                            "in": "query",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Access granted",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Message" }
                                    }
                                }
                            },
                            "401": {
                                "description": "Missing or wrong token",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
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
                    }
                }
            }
        }))
    }
}

async fn secure_data(_guard: TokenGuard) -> Json<Value> {
    Json(json!({"message": "Secure data access granted"}))
}

/// Create a new instance of the secure module
pub fn create_module(verifier: SharedVerifier) -> Arc<dyn Module> {
    Arc::new(SecureModule::new(verifier))
}
