use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::{HotelProvider, api, config::ServerConfig};

/// In-flight requests get this long to finish once TLS shutdown starts
#[cfg(feature = "tls")]
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

pub fn app(provider: HotelProvider, server: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(provider))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(TimeoutLayer::new(Duration::from_secs(
                    server.request_timeout_seconds.into(),
                ))),
        )
}

pub async fn run(server: &ServerConfig, provider: HotelProvider) -> Result<()> {
    let app = app(provider, server);
    let addr = server.bind_address();

    if let Some((cert, key)) = server.tls_paths() {
        return serve_tls(&addr, cert, key, app).await;
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Hotel gateway running at http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

#[cfg(feature = "tls")]
async fn serve_tls(addr: &str, cert: &str, key: &str, app: Router) -> Result<()> {
    use axum_server::{Handle, tls_rustls::RustlsConfig};

    let tls = RustlsConfig::from_pem_file(cert, key)
        .await
        .with_context(|| format!("Failed to load TLS certificate {cert} and key {key}"))?;
    let addr: std::net::SocketAddr = addr
        .parse()
        .with_context(|| format!("Invalid bind address {addr}"))?;

    let handle = Handle::new();
    shutdown_on(handle.clone(), shutdown_signal());

    tracing::info!("Hotel gateway running at https://{}", addr);
    axum_server::bind_rustls(addr, tls)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("HTTPS server failed")
}

/// Start a graceful shutdown of `handle` once `signal` resolves
#[cfg(feature = "tls")]
fn shutdown_on<F>(handle: axum_server::Handle, signal: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        signal.await;
        handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    });
}

#[cfg(not(feature = "tls"))]
async fn serve_tls(_addr: &str, _cert: &str, _key: &str, _app: Router) -> Result<()> {
    anyhow::bail!("TLS is configured but the `tls` feature is disabled")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutting down");
    }
}
