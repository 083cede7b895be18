use std::time::Duration;

use anyhow::{anyhow, Context};
use mongodb::{bson::doc, options::ClientOptions, Client, Collection, Database};

use libris_kernel::settings::DatabaseSettings;

use crate::deadline::Deadline;

/// Connected MongoDB handle shared by every repository for the process lifetime.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    database: Database,
    deadline: Deadline,
}

impl DocumentStore {
    /// Connect to the configured deployment and verify it answers a ping.
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        let connect_timeout = Duration::from_millis(settings.connect_timeout_ms);

        let mut options = ClientOptions::parse(&settings.uri)
            .await
            .with_context(|| "failed to parse MongoDB connection string")?;
        options.app_name = Some("libris".to_string());
        options.connect_timeout = Some(connect_timeout);
        options.server_selection_timeout = Some(connect_timeout);

        let client =
            Client::with_options(options).with_context(|| "failed to build MongoDB client")?;
        let database = client.database(&settings.name);

        tokio::time::timeout(connect_timeout, async {
            database.run_command(doc! { "ping": 1 }).await
        })
        .await
        .map_err(|_| anyhow!("MongoDB ping exceeded {:?}", connect_timeout))?
        .with_context(|| "MongoDB ping failed")?;

        tracing::info!(
            target: "libris-db",
            database = %settings.name,
            "connected to document store"
        );

        Ok(Self {
            database,
            deadline: Deadline::from_millis(settings.operation_timeout_ms),
        })
    }

    /// Typed handle onto one collection of the configured database.
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.database.collection(name)
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }
}
