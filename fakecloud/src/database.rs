use sqlx::{SqlitePool, migrate::MigrateError, sqlite::SqlitePoolOptions};

use crate::configuration::DatabaseSettings;

/// Open the store described by `settings`.
///
/// An in-memory store is bound to a single connection that is never recycled,
/// since its contents vanish with the last connection.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let options = settings.connect_options()?;
    let pool_options = if settings.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(settings.max_connections)
    };

    tracing::info!(path = %settings.path, "Opening database");
    pool_options.connect_with(options).await
}

/// Create the `virtual_machines` table if it doesn't exist yet.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
