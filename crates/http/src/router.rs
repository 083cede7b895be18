//! Router builder for the Libris HTTP server

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::{Timestamp, Uuid};

use libris_kernel::ModuleRegistry;

/// Path the merged OpenAPI document is served from.
pub const OPENAPI_PATH: &str = "/docs/openapi.json";

/// Builder for constructing the main HTTP router.
///
/// Middleware switches are recorded and applied in [`RouterBuilder::build`],
/// so they wrap every route regardless of call order.
pub struct RouterBuilder {
    router: Router,
    tracing: bool,
    cors: bool,
    request_id: bool,
    timeout: Option<Duration>,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            tracing: false,
            cors: false,
            request_id: false,
            timeout: None,
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Merge a module's router. Module routes carry their own absolute paths.
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        tracing::debug!(module = module_name, "merging module routes");
        self.router = self.router.merge(module_router);
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.tracing = true;
        self
    }

    /// Add CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.cors = true;
        self
    }

    /// Add request ID middleware (`x-request-id`, set and echoed back)
    pub fn with_request_id(mut self) -> Self {
        self.request_id = true;
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout = Some(Duration::from_millis(timeout_ms));
        self
    }

    /// Collect the OpenAPI fragments of all modules into one document
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let document = merged_openapi(registry);

        // Round-trip through utoipa so a malformed fragment is caught at startup.
        let served = match serde_json::from_value::<utoipa::openapi::OpenApi>(document.clone()) {
            Ok(openapi) => serde_json::to_value(&openapi).unwrap_or(document),
            Err(err) => {
                tracing::warn!(error = %err, "OpenAPI document failed schema check, serving raw");
                document
            }
        };

        self.router = self.router.route(
            OPENAPI_PATH,
            get(move || {
                let served = served.clone();
                async move { Json(served) }
            }),
        );
        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        let mut router = self.router;

        // Innermost first: each `layer` call wraps everything added before it.
        if let Some(timeout) = self.timeout {
            router = router.layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                timeout,
            ));
        }
        if self.cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }
        if self.tracing {
            router = router.layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                    .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
            );
        }
        if self.request_id {
            router = router
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        }

        router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn merged_openapi(registry: &ModuleRegistry) -> serde_json::Value {
    let mut openapi_spec = serde_json::json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Libris API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Personal library catalog: books and reading progress"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    openapi_spec["components"]["schemas"]["ErrorResponse"] = serde_json::json!({
        "type": "object",
        "properties": {
            "message": {
                "type": "string"
            }
        },
        "required": ["message"]
    });

    openapi_spec["paths"]["/healthz"] = serde_json::json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": {
                            "schema": {
                                "type": "string"
                            }
                        }
                    }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };

        if let Some(paths) = module_spec.get("paths").and_then(|p| p.as_object()) {
            for (path, path_item) in paths {
                openapi_spec["paths"][path] = path_item.clone();
            }
        }

        if let Some(schemas) = module_spec
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.as_object())
        {
            for (schema_name, schema_def) in schemas {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}

/// Request ID generator for tracing
#[derive(Clone, Copy)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use libris_kernel::Module;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct ShelfModule;

    #[async_trait]
    impl Module for ShelfModule {
        fn name(&self) -> &'static str {
            "shelves"
        }

        fn routes(&self) -> Router {
            Router::new().route("/shelves", get(|| async { "shelves" }))
        }

        fn openapi(&self) -> Option<serde_json::Value> {
            Some(serde_json::json!({
                "paths": {
                    "/shelves": {
                        "get": {
                            "summary": "List shelves",
                            "responses": { "200": { "description": "OK" } }
                        }
                    }
                },
                "components": {
                    "schemas": {
                        "Shelf": { "type": "object" }
                    }
                }
            }))
        }
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_module_routes_are_merged_at_root() {
        let module = ShelfModule;
        let router = RouterBuilder::new()
            .mount_module(module.name(), module.routes())
            .build();

        let response = router.oneshot(get_request("/shelves")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let router = RouterBuilder::new()
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(5000)
            .route("/health", get(|| async { "ok" }))
            .build();

        let response = router.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request_id = response.headers()["x-request-id"].to_str().unwrap();
        assert!(Uuid::parse_str(request_id).is_ok());
    }

    #[tokio::test]
    async fn test_slow_handler_times_out_with_408() {
        let router = RouterBuilder::new()
            .with_timeout(10)
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .build();

        let response = router.oneshot(get_request("/slow")).await.unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_openapi_collects_module_fragments() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(ShelfModule));

        let router = RouterBuilder::new().with_openapi(&registry).build();
        let response = router.oneshot(get_request(OPENAPI_PATH)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let document: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(document["paths"]["/shelves"].is_object());
        assert!(document["paths"]["/healthz"].is_object());
        assert!(document["components"]["schemas"]["Shelf"].is_object());
    }
}
