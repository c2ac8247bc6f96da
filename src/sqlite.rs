use sqlx::SqlitePool;

use crate::error::StoreError;

pub const SQLITE_CONNECTION_STRING: &str = "sqlite://uptime_charts.db?mode=rwc";

pub async fn connect_sqlite(connection_string: &str) -> Result<SqlitePool, StoreError> {
    let pool = SqlitePool::connect(connection_string).await?;
    migrate_sqlite(&pool).await?;
    Ok(pool)
}

pub async fn migrate_sqlite(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations_sq").run(pool).await?;
    Ok(())
}

/// Single-connection in-memory database; every new connection would see an
/// empty database, so the pool never opens a second one or recycles the first.
#[cfg(test)]
pub async fn memory_pool() -> Result<SqlitePool, StoreError> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    migrate_sqlite(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
pub(crate) async fn insert_check(
    pool: &SqlitePool,
    url: &str,
    timestamp: chrono::DateTime<chrono::Utc>,
    success: bool,
    response_time: f64,
) {
    sqlx::query(crate::sqlite_queries::CREATE_CHECK)
        .bind(url)
        .bind(timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
        .bind(success)
        .bind(response_time)
        .execute(pool)
        .await
        .expect("insert check");
}
