//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, ProfileQuery, ProfileRecord};
use crate::reporting::AnnualSummary;

/// `GET /summary` → 200 + `AnnualSummary` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<AnnualSummary> {
    Json(state.summary.clone())
}

/// Returns hourly rows, optionally restricted to a row range.
///
/// `GET /profiles` → 200 + every row
/// `GET /profiles?from=N&to=M` → rows N..=M
/// `GET /profiles?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_profiles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProfileQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let last = to.min(state.table.row_count().saturating_sub(1));
    let records: Vec<ProfileRecord> = (from..=last)
        .filter_map(|i| ProfileRecord::from_row(&state.table, i))
        .collect();

    Ok(Json(records))
}
