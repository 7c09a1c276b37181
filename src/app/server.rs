use crate::adapters::HttpGeoEngine;
use crate::app::routes::router;
use crate::core::{ConfigProvider, RequestTranslator};
use crate::utils::error::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Serves the gateway on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, translator: RequestTranslator, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "gee-gateway listening");

    axum::serve(listener, router(translator))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("gee-gateway stopped");
    Ok(())
}

/// Wires the HTTP engine client from `config` and serves until Ctrl-C.
pub async fn run<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let engine = HttpGeoEngine::from_config(config)?;
    info!(endpoint = %engine.base_url(), "Using geospatial engine");

    let translator = RequestTranslator::new(Arc::new(engine));
    let listener = TcpListener::bind(config.bind_address()).await?;
    serve(listener, translator, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("ctrl_c received; shutting down http server"),
        Err(e) => {
            error!("Failed to listen for ctrl_c: {}", e);
            std::future::pending::<()>().await
        }
    }
}
