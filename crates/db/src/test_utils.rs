//! Test utilities for database operations.
//!
//! Integration tests run against an in-memory SQLite database with the real
//! migrations applied. The pool holds exactly one connection: every pooled
//! connection to `sqlite::memory:` would otherwise see its own empty database.

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::migrations::Migrator;

/// In-memory SQLite URL.
pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Open a fresh in-memory database and run all migrations.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(SQLITE_MEMORY_URL);
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let conn = Database::connect(opt).await?;
    Migrator::up(&conn, None).await?;

    info!("Created in-memory test database");
    Ok(conn)
}
