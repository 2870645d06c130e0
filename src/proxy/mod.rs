//! Thin read-only HTTP proxy in front of the device backend.
//!
//! Exposes `/api/devices`, `/api/device/:id` and `/api/health`. Every
//! upstream failure is translated into a fixed JSON error body; upstream
//! bodies are never forwarded.

mod handlers;

pub use handlers::validate_device_id;

use std::net::SocketAddr;

use axum::{routing::get, Router};
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

use crate::client::FleetClient;

/// Shared state for the proxy handlers.
#[derive(Debug, Clone)]
pub struct ProxyState {
    pub client: FleetClient,
}

/// Build the proxy router.
pub fn router(client: FleetClient) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/devices", get(handlers::list_devices))
        .route("/api/device", get(handlers::missing_device_id))
        .route("/api/device/", get(handlers::missing_device_id))
        .route("/api/device/:id", get(handlers::get_device))
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .with_state(ProxyState { client })
}

/// Bind `addr` and serve the proxy in the background.
///
/// Returns the bound address (useful with port 0) and the server task.
pub async fn serve_proxy_on(
    addr: SocketAddr,
    client: FleetClient,
) -> color_eyre::Result<(SocketAddr, JoinHandle<()>)> {
    let backend = client.base_url().to_string();
    let app = router(client);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("Proxy listening on http://{} (backend: {})", actual_addr, backend);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Proxy server error: {}", e);
        }
    });

    Ok((actual_addr, handle))
}
