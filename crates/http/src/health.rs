//! Liveness probe, registered as a core module.

use async_trait::async_trait;
use axum::{routing::get, Router};
use serde_json::json;
use std::sync::Arc;

use bookshelf_kernel::Module;

pub struct HealthModule;

#[async_trait]
impl Module for HealthModule {
    fn name(&self) -> &'static str {
        "health"
    }

    fn routes(&self) -> Router {
        Router::new().route("/healthz", get(health_check))
    }

    fn route_prefix(&self) -> Option<String> {
        None
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/healthz": {
                    "get": {
                        "summary": "Health check",
                        "tags": ["System"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": {
                                        "schema": { "type": "string" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }))
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

pub fn create_module() -> Arc<dyn Module> {
    Arc::new(HealthModule)
}
