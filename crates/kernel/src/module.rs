use async_trait::async_trait;
use axum::Router;

use crate::settings::Settings;

/// Read-only view handed to every lifecycle hook.
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
}

/// A feature slice of the service (books, read books).
///
/// Hooks default to no-ops so a module only overrides what it needs.
#[async_trait]
pub trait Module: Sync + Send {
    /// Stable identifier, used in logs and lifecycle errors.
    fn name(&self) -> &'static str;

    /// Runs once at startup, before any route is served.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// HTTP surface of the module. Paths are absolute; the router is merged
    /// at the server root.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment with `paths` and `components.schemas` keys.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs after the server has drained, in reverse registration order.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
