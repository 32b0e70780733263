use jambopay_gateway::config::AppConfig;
use jambopay_gateway::logging::init_tracing;
use jambopay_gateway::payments::forwarder::JamboPayForwarder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!(e)
    })?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    init_tracing(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        merchant = %config.jambopay.merchant_name,
        "Starting JamboPay payment gateway"
    );
    info!(
        base_url = %config.jambopay.base_url,
        candidates = config.jambopay.endpoint_paths.len(),
        timeout_secs = config.jambopay.timeout.as_secs(),
        "JamboPay upstream configuration loaded"
    );

    let forwarder = Arc::new(JamboPayForwarder::new(config.jambopay.clone()).map_err(|e| {
        error!("Failed to initialize payment forwarder: {}", e);
        anyhow::anyhow!(e.to_string())
    })?);

    let app = jambopay_gateway::app(&config.server.static_dir, forwarder);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind to address {}: {}", addr, e);
        e
    })?;

    info!(
        address = %addr,
        static_dir = %config.server.static_dir,
        "Server listening on http://{}",
        addr
    );
    info!("POST /process-payment  - forward a payment to JamboPay");
    info!("GET  /health           - health probe");
    info!("GET  /                 - payment form");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
