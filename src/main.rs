use anyhow::Context;
use libris::{register_all, Repositories};
use libris_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Libris settings")?;
    libris_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.database.backend,
        database = %settings.database.name,
        "libris bootstrap starting"
    );

    let repositories = Repositories::connect(&settings.database)
        .await
        .with_context(|| "failed to open the document store")?;

    let mut registry = ModuleRegistry::new();
    register_all(&mut registry, &repositories);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = libris_http::start_server(&registry, &settings).await;

    if let Err(err) = registry.stop_modules().await {
        tracing::error!(error = ?err, "module shutdown failed");
    }

    served
}
