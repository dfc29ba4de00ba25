use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::info;

/// Connect and bring the schema up to date.
pub async fn init_database(database_url: &str) -> Result<()> {
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("connecting to {database_url}"))?;
    Migrator::up(&db, None)
        .await
        .context("applying migrations")?;
    info!("Database schema is up to date");
    Ok(())
}
