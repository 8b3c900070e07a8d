use std::future::Future;
use std::net::SocketAddr;
use surfsup_climate::ClimateClient;
use surfsup_core::AppError;

use crate::routes::routes;

/// Bind the listener and return the bound address with the server future.
///
/// The server stops accepting connections once `shutdown` resolves and the
/// future completes after in-flight requests finish.
pub fn bind(
    addr: SocketAddr,
    client: ClimateClient,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(SocketAddr, impl Future<Output = ()>), AppError> {
    let (bound, server) = warp::serve(routes(client))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(|e| anyhow::Error::new(e).context(format!("Failed to bind {}", addr)))?;

    tracing::info!("Listening on http://{}", bound);
    Ok((bound, server))
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    addr: SocketAddr,
    client: ClimateClient,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), AppError> {
    let (_, server) = bind(addr, client, shutdown)?;
    server.await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await
}

/// Resolves once `signal` reports a delivery. If the listener itself fails,
/// never resolves, so the server keeps running instead of stopping at once.
async fn wait_for_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
