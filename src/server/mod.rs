//! # HTTP Server for Signed Agreements
//!
//! Serves the localized form text and turns form submissions into signed
//! PNG documents.
//!
//! ## Usage
//!
//! ```bash
//! undersign serve --listen 0.0.0.0:8080 --font assets/font.ttf
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/locales` | Available locales |
//! | GET | `/api/locales/:tag` | Content bundle for one locale |
//! | POST | `/api/documents` | Multipart form → PNG attachment |

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::UndersignError;

/// Signature uploads are small canvas exports; anything near this is abuse.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/locales", get(handlers::locales::list))
        .route("/api/locales/:tag", get(handlers::locales::bundle))
        .route(
            "/api/documents",
            post(handlers::documents::create).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use undersign::compose::AssetPaths;
/// use undersign::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), undersign::UndersignError> {
/// let config = ServerConfig::new("0.0.0.0:8080", AssetPaths::default());
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), UndersignError> {
    let listen_addr = config.listen_addr.clone();
    let locales = config.content.locales();
    let app_state = Arc::new(AppState::new(config)?);
    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| UndersignError::Server(format!("Failed to bind to {}: {}", listen_addr, e)))?;

    tracing::info!(
        addr = %listen_addr,
        locales = ?locales.iter().map(|l| l.tag()).collect::<Vec<_>>(),
        "undersign HTTP server listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| UndersignError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
