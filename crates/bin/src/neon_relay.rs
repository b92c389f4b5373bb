//! Neon Relay - Standalone score relay without the front end.

use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Neon Relay v{}", env!("CARGO_PKG_VERSION"));

    let config = relay::Config::load()?;
    let (relay, _sweeper) = relay::start(&config);

    let app = relay::router(relay, &config.server.submit_path)
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()));

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Relay listening on http://{}{}", addr, config.server.submit_path);

    axum::serve(listener, app).await?;
    Ok(())
}
