//! HTTP transport for the bank branch directory.
//!
//! A thin axum layer: every route parses its query string, hands an
//! [`EngineQuery`](ifsc_engine::EngineQuery) to the engine on the blocking
//! pool and serializes the result.

mod error;
mod routes;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use ifsc_engine::QueryEngine;
use ifsc_store::SqliteExecutor;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::AppError;

/// Shared handler state.
pub type AppState = Arc<QueryEngine<SqliteExecutor>>;

/// Runtime options used to boot the HTTP server.
#[derive(Clone, Debug)]
pub struct ServeOptions {
    /// Network interface to bind to.
    pub host: IpAddr,
    /// Listening port.
    pub port: u16,
    /// Allowed CORS origins; empty disables the CORS layer.
    pub allow_origins: Vec<String>,
}

/// Errors that can occur while running the server.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Binding the listener or serving connections failed.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serve the directory until Ctrl-C.
pub async fn serve(engine: AppState, options: ServeOptions) -> Result<(), ServeError> {
    let app = build_router(engine, &options.allow_origins);
    let addr = SocketAddr::from((options.host, options.port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(
        component = module_path!(),
        %addr,
        allow_origins = ?options.allow_origins,
        "listening"
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Build the application router.
pub fn build_router(engine: AppState, allow_origins: &[String]) -> Router {
    let mut router = routes::routes();

    if let Some(layer) = build_cors_layer(allow_origins) {
        router = router.layer(layer);
    }

    router.with_state(engine).layer(TraceLayer::new_for_http())
}

fn build_cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    if origins.iter().any(|o| o.trim() == "*") {
        return Some(
            CorsLayer::new()
                .allow_origin(AllowOrigin::any())
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([ACCEPT, CONTENT_TYPE]),
        );
    }

    let mut allowed = Vec::new();
    for origin in origins {
        let normalized = origin.trim().trim_end_matches('/');
        match HeaderValue::from_str(normalized) {
            Ok(value) if !normalized.is_empty() => allowed.push(value),
            _ => tracing::warn!(%origin, "ignoring invalid CORS origin"),
        }
    }

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([ACCEPT, CONTENT_TYPE]),
    )
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => tracing::error!(?err, "failed to listen for shutdown signal"),
    }
}
