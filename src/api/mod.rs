//! REST API over the results of a finished run.
//!
//! Provides two GET endpoints:
//! - `/summary`: annual consumption per category
//! - `/profiles`: hourly rows with optional range filtering

mod handlers;
mod types;

pub use types::{ErrorResponse, ProfileQuery, ProfileRecord};

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::reporting::AnnualSummary;
use crate::table::DemandTable;

/// Immutable application state shared across all request handlers.
///
/// Built once after the pipeline completes; all data is read-only.
pub struct AppState {
    /// Annual consumption summary.
    pub summary: AnnualSummary,
    /// Hourly demand table.
    pub table: DemandTable,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/profiles", get(handlers::get_profiles))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
