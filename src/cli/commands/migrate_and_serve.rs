use anyhow::Result;

use super::initdb::init_database;
use super::serve::serve;

/// Apply pending migrations, then hand off to the regular server path.
pub async fn migrate_and_serve(database_url: &str, bind_address: &str) -> Result<()> {
    init_database(database_url).await?;
    serve(database_url, bind_address).await
}
