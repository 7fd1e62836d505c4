/// CRUD operations against a live Postgres for all models
pub mod crud_tests;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Connect and migrate, or `None` when no database is configured for this run.
pub(crate) async fn setup_test_db() -> anyhow::Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("skip: no DATABASE_URL (or SKIP_DB_TESTS set)");
        return Ok(None);
    }
    let db = crate::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}
