// Persistence handle — one shared MongoDB client for the life of the process.
//
// The handle is constructed at most once per `SharedDatabase` slot; every
// later access returns the same `Arc`. Services receive the handle by
// injection rather than looking it up globally, and `DatabaseHandle::shared`
// is the one place the process-wide slot is touched.
//
// The driver connects lazily: building the client performs no network I/O,
// so connection failures surface on the first operation. Pooling and retries
// are left to the driver.

use std::sync::Arc;

use mongodb::bson::{doc, Document};
use mongodb::{Client, Database};
use tokio::sync::OnceCell;

use auth_demo_core::env::AuthEnv;
use auth_demo_core::error::{AuthError, Result};

/// Database used when the connection string names none.
pub const DEFAULT_DATABASE_NAME: &str = "better-auth-demo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// MongoDB connection string.
    pub url: String,
    /// Overrides the database named in `url`.
    pub database_name: Option<String>,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database_name: None,
        }
    }

    pub fn from_env(env: &AuthEnv) -> Self {
        Self::new(env.database_url.clone())
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseHandle {
    client: Client,
    database: Database,
    config: DatabaseConfig,
}

static GLOBAL: SharedDatabase = SharedDatabase::new();

impl DatabaseHandle {
    /// Build a new client. Prefer [`DatabaseHandle::shared`] outside tests.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.url)
            .await
            .map_err(|e| AuthError::Database(format!("MongoDB client creation failed: {e}")))?;

        let database = match &config.database_name {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE_NAME)),
        };

        tracing::debug!(database = database.name(), "created MongoDB client");
        Ok(Self {
            client,
            database,
            config: config.clone(),
        })
    }

    /// The process-wide handle, created on first call.
    pub async fn shared(config: &DatabaseConfig) -> Result<Arc<Self>> {
        GLOBAL.get_or_connect(config).await
    }

    /// The process-wide handle, if [`DatabaseHandle::shared`] already ran.
    pub fn global() -> Option<Arc<Self>> {
        GLOBAL.get()
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Round-trip a `ping` command to check the server is reachable.
    pub async fn ping(&self) -> Result<()> {
        let reply: Document = self
            .database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AuthError::Database(format!("MongoDB ping failed: {e}")))?;
        tracing::debug!(?reply, "MongoDB ping");
        Ok(())
    }
}

/// A construction-once slot for a [`DatabaseHandle`].
///
/// Concurrent first callers are serialized: exactly one client is built and
/// all of them receive it.
#[derive(Debug)]
pub struct SharedDatabase {
    cell: OnceCell<Arc<DatabaseHandle>>,
}

impl SharedDatabase {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    pub async fn get_or_connect(&self, config: &DatabaseConfig) -> Result<Arc<DatabaseHandle>> {
        let handle = self
            .cell
            .get_or_try_init(|| async { DatabaseHandle::connect(config).await.map(Arc::new) })
            .await?;

        if handle.config() != config {
            tracing::warn!(
                requested = %config.url,
                active = %handle.config().url,
                "database handle already initialized with a different config; reusing it"
            );
        }
        Ok(Arc::clone(handle))
    }

    pub fn get(&self) -> Option<Arc<DatabaseHandle>> {
        self.cell.get().cloned()
    }
}

impl Default for SharedDatabase {
    fn default() -> Self {
        Self::new()
    }
}
