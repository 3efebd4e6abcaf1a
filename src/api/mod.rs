//! HTTP API module for the ML pipeline, health and metrics endpoints.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod routes;

use tokio::net::TcpListener;
use tracing::info;

use crate::utils::shutdown_signal;

pub use error::{ApiError, ErrorResponse};
pub use handlers::AppState;
pub use routes::create_router;

/// Serve the API on `listener` until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> crate::Result<()> {
    info!(addr = ?listener.local_addr().ok(), "HTTP server listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
