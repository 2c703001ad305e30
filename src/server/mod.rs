//! # HTTP API for Label Generation
//!
//! Upload a workbook once, then ask for statistics, previews and the final
//! PDF as often as needed with different settings.
//!
//! ## Usage
//!
//! ```bash
//! hangtag serve --listen 0.0.0.0:8080 --font /usr/share/fonts/msyh.ttf
//! ```
//!
//! ## Endpoints
//!
//! | Method | Path                          | Body / query            |
//! |--------|-------------------------------|-------------------------|
//! | POST   | `/api/products`               | multipart field `file`  |
//! | GET    | `/api/products/:id`           | `?q=term`               |
//! | POST   | `/api/labels/:id/stats`       | `{ config, selected }`  |
//! | POST   | `/api/labels/:id/pdf`         | `{ config, selected }`  |
//! | POST   | `/api/labels/:id/preview`     | `?index=N`, same body   |

mod handlers;
mod state;

pub use handlers::ApiError;
pub use state::{AppState, ServerConfig};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::error::{HangtagError, Result};
use crate::font::LabelFont;
use crate::store::{MemoryProductStore, ProductSource};

/// Upload size limit for workbooks.
const UPLOAD_LIMIT_BYTES: usize = 20 * 1024 * 1024;

/// How often expired product lists are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Build the API router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/products",
            post(handlers::products::upload).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route("/api/products/:id", get(handlers::products::list))
        .route("/api/labels/:id/stats", post(handlers::labels::stats))
        .route("/api/labels/:id/pdf", post(handlers::labels::pdf))
        .route("/api/labels/:id/preview", post(handlers::labels::preview))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use hangtag::server::{serve, ServerConfig};
///
/// # async fn example() -> hangtag::Result<()> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     font_path: Some("msyh.ttf".into()),
///     ..ServerConfig::default()
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<()> {
    let font = match &config.font_path {
        Some(path) => Some(LabelFont::from_file(path)?),
        None => {
            warn!("no font configured; PDF and preview endpoints are disabled");
            None
        }
    };

    let listen_addr = config.listen_addr.clone();
    let products = Arc::new(MemoryProductStore::with_ttl(config.list_ttl));
    let state = Arc::new(AppState::new(config, font, products));

    // Spawn background cleanup of expired product lists
    tokio::spawn(sweep_expired_lists(state.products.clone()));

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| {
            HangtagError::Configuration(format!("Failed to bind to {}: {}", listen_addr, e))
        })?;
    info!(addr = %listen_addr, "hangtag HTTP server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Background task dropping product lists nobody has touched lately.
async fn sweep_expired_lists(products: Arc<dyn ProductSource>) {
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        let removed = products.purge_expired();
        if removed > 0 {
            debug!(removed, "swept expired product lists");
        }
    }
}
