use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::initialize_app_state_with_url;
use crate::router::create_router;

/// Run the HTTP server against an already-migrated database.
pub async fn serve(database_url: &str, bind_address: &str) -> Result<()> {
    let state = initialize_app_state_with_url(database_url)
        .await
        .context("initializing application state")?;
    let app = create_router(state);

    let listener = TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("binding {bind_address}"))?;
    info!("Reship API listening on http://{}", bind_address);
    info!("Swagger UI at http://{}/swagger-ui", bind_address);

    axum::serve(listener, app).await.context("server error")?;
    info!("Server shut down");
    Ok(())
}
