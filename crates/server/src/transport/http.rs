//! HTTP transport.

use crate::handler;
use axum::Router;
use axum::routing::get;
use geo_nearby::NearbyService;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

/// Routes served by the HTTP transport.
pub fn router(service: NearbyService) -> Router {
    Router::new()
        .route("/nearby", get(handler::nearby))
        .with_state(service)
}

/// Serve `service` on `listener` until `shutdown` resolves.
///
/// Each connection runs on its own task; they all share the one read-only
/// index inside `service`.
pub async fn run_server(
    listener: TcpListener,
    service: NearbyService,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    info!("geo-nearby HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
