//! SQLite pool construction.
//!
//! [`create_pool`] opens the database (creating the file if needed), turns on
//! foreign keys and applies every migration under `migrations/` before the
//! pool is handed out, so callers always see the current schema.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::AppError;

/// Upper bound on pooled connections for file-backed databases.
const MAX_CONNECTIONS: u32 = 5;

/// Open a pool for `database_url` and run pending migrations.
///
/// In-memory URLs (`sqlite::memory:`) get a single connection that is never
/// recycled, because every SQLite connection owns its own in-memory database.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?
    };

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::debug!("Database ready at {}", database_url);
    Ok(pool)
}
