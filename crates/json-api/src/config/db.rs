//! Database Config

use clap::Args;

/// Store database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string for products, promo codes and orders
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Apply pending migrations before serving
    #[arg(long = "migrate", env = "DATABASE_MIGRATE", default_value_t = false)]
    pub run_migrations: bool,
}
