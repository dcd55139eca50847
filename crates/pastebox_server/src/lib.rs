//! HTTP server wiring for PasteBox (routes, handlers, shared state, sweeper).

/// HTTP error mapping for handlers.
pub mod error;
/// HTTP handlers for paste endpoints and pages.
pub mod handlers;
/// Background retention sweeper.
pub mod sweeper;

pub use error::HttpError;
pub use pastebox_core::{
    archive, config, db, detection, ids, models, AppError, Config, Database, RetentionConfig,
    DEFAULT_PORT,
};
pub use sweeper::{RetentionSweeper, SweeperHandle, SweeperState};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct shared application state.
    ///
    /// # Arguments
    /// - `config`: Loaded configuration.
    /// - `db`: Open database handle.
    pub fn new(config: Config, db: Database) -> Self {
        Self::with_shared_db(config, Arc::new(db))
    }

    /// Construct state around a database handle that is also used elsewhere
    /// (for example by the retention sweeper).
    pub fn with_shared_db(config: Config, db: Arc<Database>) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
///
/// # Returns
/// Configured `axum::Router`.
pub fn create_app(state: AppState) -> Router {
    let body_limit = request_body_limit(state.config.max_paste_size);

    Router::new()
        .route("/", get(handlers::view::index))
        .route("/paste", post(handlers::paste::create_paste))
        .route("/directory", post(handlers::paste::create_directory))
        .route("/p/:id", get(handlers::view::view_paste))
        .route("/p/:id/raw", get(handlers::paste::raw_paste))
        .route("/p/:id/file/:file_id/raw", get(handlers::paste::raw_file))
        .route("/p/:id/download", get(handlers::paste::download_zip))
        .route("/api/recent", get(handlers::paste::recent_pastes))
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                )),
        )
}

/// Transport limit for request bodies. Percent-encoded form bytes take up to
/// three times their decoded size; the decoded size is checked by handlers.
fn request_body_limit(max_paste_size: usize) -> usize {
    max_paste_size.saturating_mul(3).saturating_add(64 * 1024)
}

/// Resolve the listener address from the `BIND` override or the configured port.
///
/// # Returns
/// `BIND` when it parses, otherwise `0.0.0.0:{port}`.
pub fn resolve_bind_address(config: &Config) -> SocketAddr {
    let default_bind = SocketAddr::from(([0, 0, 0, 0], config.port));
    match std::env::var("BIND") {
        Ok(value) => parse_bind_override(&value, default_bind),
        Err(_) => default_bind,
    }
}

fn parse_bind_override(value: &str, default_bind: SocketAddr) -> SocketAddr {
    match value.trim().parse::<SocketAddr>() {
        Ok(addr) => addr,
        Err(err) => {
            tracing::warn!(
                "Invalid BIND='{}': {}. Falling back to {}",
                value,
                err,
                default_bind
            );
            default_bind
        }
    }
}

/// Run the Axum server with graceful shutdown support.
///
/// # Arguments
/// - `listener`: Bound TCP listener for the server.
/// - `state`: Shared application state.
/// - `shutdown_signal`: Future that resolves when shutdown should start.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

#[cfg(test)]
mod tests {
    use super::{parse_bind_override, request_body_limit};
    use std::net::SocketAddr;

    #[test]
    fn bind_override_accepts_valid_addresses() {
        let default_bind = SocketAddr::from(([0, 0, 0, 0], 5000));
        assert_eq!(
            parse_bind_override(" 127.0.0.1:8080 ", default_bind),
            SocketAddr::from(([127, 0, 0, 1], 8080))
        );
    }

    #[test]
    fn request_body_limit_leaves_room_for_encoding() {
        assert_eq!(request_body_limit(1000), 3000 + 64 * 1024);
        assert_eq!(request_body_limit(usize::MAX), usize::MAX);
    }

    #[test]
    fn bind_override_falls_back_on_invalid_values() {
        let default_bind = SocketAddr::from(([0, 0, 0, 0], 5000));
        assert_eq!(parse_bind_override("bad:host", default_bind), default_bind);
    }
}
