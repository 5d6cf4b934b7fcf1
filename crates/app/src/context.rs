//! App Context

use std::{sync::Arc, time::Duration};

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db},
    domain::{
        checkout::RetryPolicy,
        products::{InMemoryProductsService, PgProductsService, ProductsService},
        registers::{InMemoryRegistersService, RegistersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] MigrateError),
}

/// Database connection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseOptions {
    /// How long to wait for a pooled connection
    pub acquire_timeout: Duration,

    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            acquire_timeout: database::DEFAULT_ACQUIRE_TIMEOUT,
            run_migrations: false,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub registers: Arc<dyn RegistersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        options: DatabaseOptions,
        retry: RetryPolicy,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with_timeout(url, options.acquire_timeout)
            .await
            .map_err(AppInitError::Database)?;

        if options.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;

            info!("database migrations applied");
        }

        Ok(Self::with_products(
            Arc::new(PgProductsService::new(Db::new(pool))),
            retry,
        ))
    }

    /// Build application context over a process-local product store.
    #[must_use]
    pub fn in_memory(retry: RetryPolicy) -> Self {
        Self::with_products(Arc::new(InMemoryProductsService::new()), retry)
    }

    /// Build application context over any product store.
    #[must_use]
    pub fn with_products(products: Arc<dyn ProductsService>, retry: RetryPolicy) -> Self {
        Self {
            registers: Arc::new(InMemoryRegistersService::new(Arc::clone(&products), retry)),
            products,
        }
    }
}
