use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::MIGRATOR;
use crate::database::ports::health::StoreHealth;
use crate::error::{CatalogError, Result};

/// Connection pool sizing. Unset values fall back to CPU-derived defaults.
#[derive(Debug, Clone, Default)]
pub struct PoolSettings {
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout: Option<Duration>,
}

const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
    min_connections: u32,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(
        connection_string: &str,
        settings: PoolSettings,
    ) -> Result<Self> {
        let max_connections = settings
            .max_connections
            .unwrap_or_else(|| num_cpus::get().max(2) as u32);
        let min_connections = settings
            .min_connections
            .unwrap_or(DEFAULT_MIN_CONNECTIONS)
            .min(max_connections);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(
                settings.acquire_timeout.unwrap_or(DEFAULT_ACQUIRE_TIMEOUT),
            )
            .test_before_acquire(true)
            .connect(connection_string)
            .await
            .map_err(|e| {
                CatalogError::Internal(format!(
                    "Database connection failed: {}",
                    e
                ))
            })?;

        info!(
            "Database pool initialized with max_connections={}, min_connections={}",
            max_connections, min_connections
        );

        Ok(Self {
            pool,
            max_connections,
            min_connections,
        })
    }

    /// Wrap an already configured pool, as handed out by `#[sqlx::test]`.
    pub fn from_pool(pool: PgPool) -> Self {
        let max_connections = pool.options().get_max_connections();
        let min_connections = pool.options().get_min_connections();
        Self {
            pool,
            max_connections,
            min_connections,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply every pending migration from `rigdex-core/migrations`.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.map_err(|e| {
            CatalogError::Internal(format!("Failed to run migrations: {}", e))
        })?;
        info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for PostgresDatabase {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
