//! Preview server command.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;

/// Run the serve command.
pub async fn run(port: u16, dir: PathBuf) -> Result<()> {
    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'phosphor build' first.",
            dir.display()
        );
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let url = format!("http://{}", addr);
    tracing::info!("Serving {} at {}", dir.display(), url);

    let app = Router::new().fallback_service(ServeDir::new(&dir));

    if let Err(e) = open::that(&url) {
        tracing::debug!("Could not open browser: {}", e);
    }

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
