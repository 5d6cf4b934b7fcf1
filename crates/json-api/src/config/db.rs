//! Database Config

use std::time::Duration;

use clap::Args;

use kasir_app::context::DatabaseOptions;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string; products are kept in memory when unset
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// How long to wait for a pooled connection, in milliseconds
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub db_acquire_timeout_ms: u64,

    /// Apply pending migrations on startup
    #[arg(long, env = "RUN_MIGRATIONS", default_value_t = false)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Connection options for the app context.
    #[must_use]
    pub fn options(&self) -> DatabaseOptions {
        DatabaseOptions {
            acquire_timeout: Duration::from_millis(self.db_acquire_timeout_ms),
            run_migrations: self.run_migrations,
        }
    }
}
