#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::connect_with_config;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn db_config() -> Option<configs::DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return None; }
    let mut cfg = configs::load_default().map(|c| c.database).unwrap_or_default();
    cfg.normalize_from_env();
    cfg.validate().ok()?;
    cfg.min_connections = cfg.min_connections.min(1);
    cfg.acquire_timeout_secs = 10;
    Some(cfg)
}

/// Migrated connection, or `None` when no database is configured for this run.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    let Some(cfg) = db_config() else {
        eprintln!("skip: no database configured (or SKIP_DB_TESTS set)");
        return Ok(None);
    };

    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            drop(db);
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Return a fresh connection for the current test's runtime
    Ok(Some(connect_with_config(&cfg).await?))
}
