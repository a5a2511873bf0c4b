//! OpenAPI document assembled from module fragments.

use serde_json::{json, Value};

use bookshelf_kernel::ModuleRegistry;

const API_TITLE: &str = "Bookshelf API";
const API_VERSION: &str = "1.0.0";

/// Merge the `paths` and `components.schemas` of every module fragment into
/// one OpenAPI document. Module paths are prefixed with the module's mount
/// point when it has one.
pub fn merged_spec(registry: &ModuleRegistry) -> Value {
    let mut openapi_spec = json!({
        "openapi": "3.1.0",
        "info": {
            "title": API_TITLE,
            "version": API_VERSION,
            "description": "In-memory book records"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    openapi_spec["components"]["schemas"]["ErrorResponse"] = json!({
        "type": "object",
        "properties": {
            "status": {
                "type": "string",
                "enum": ["fail", "error"]
            },
            "message": {
                "type": "string"
            }
        },
        "required": ["status", "message"]
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };
        let prefix = module.route_prefix().unwrap_or_default();

        if let Some(paths) = module_spec.get("paths").and_then(Value::as_object) {
            for (path, path_item) in paths {
                let prefixed_path = format!("{}{}", prefix, path);
                openapi_spec["paths"][prefixed_path] = path_item.clone();
            }
        }

        if let Some(schemas) = module_spec
            .get("components")
            .and_then(|components| components.get("schemas"))
            .and_then(Value::as_object)
        {
            for (schema_name, schema_def) in schemas {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}

/// Convert the merged JSON into a typed utoipa document for Swagger UI,
/// falling back to a bare document when the JSON does not fit the model.
pub fn to_utoipa(spec: &Value) -> utoipa::openapi::OpenApi {
    serde_json::from_value(spec.clone()).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "merged OpenAPI document rejected by utoipa model");
        utoipa::openapi::OpenApiBuilder::new()
            .info(
                utoipa::openapi::InfoBuilder::new()
                    .title(API_TITLE)
                    .version(API_VERSION)
                    .build(),
            )
            .build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bookshelf_kernel::Module;
    use std::sync::Arc;

    struct Shelves {
        prefix: Option<String>,
    }

    #[async_trait]
    impl Module for Shelves {
        fn name(&self) -> &'static str {
            "shelves"
        }

        fn route_prefix(&self) -> Option<String> {
            self.prefix.clone()
        }

        fn openapi(&self) -> Option<Value> {
            Some(json!({
                "paths": { "/shelves": { "get": { "summary": "List shelves" } } },
                "components": { "schemas": { "Shelf": { "type": "object" } } }
            }))
        }
    }

    #[test]
    fn merges_paths_and_schemas() {
        let mut registry = ModuleRegistry::new();
        registry.register_custom(Arc::new(Shelves { prefix: None }));

        let spec = merged_spec(&registry);
        assert_eq!(spec["paths"]["/shelves"]["get"]["summary"], "List shelves");
        assert!(spec["components"]["schemas"]["Shelf"].is_object());
        assert!(spec["components"]["schemas"]["ErrorResponse"].is_object());
    }

    #[test]
    fn prefixes_nested_module_paths() {
        let mut registry = ModuleRegistry::new();
        registry.register_custom(Arc::new(Shelves {
            prefix: Some("/api/v2".to_string()),
        }));

        let spec = merged_spec(&registry);
        assert!(spec["paths"]["/api/v2/shelves"].is_object());
        assert!(spec["paths"].get("/shelves").is_none());
    }
}
