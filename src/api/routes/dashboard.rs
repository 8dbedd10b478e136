//! Dashboard Routes
//!
//! The page itself plus JSON access to the selector and chart for clients
//! that do not hold a WebSocket open.
//!
//! - GET / - Dashboard page
//! - GET /api/v1/symbols - Selector options and default
//! - GET /api/v1/chart?symbol=S - Chart description for S

use axum::{
    extract::{Query, State},
    http::Uri,
    response::Html,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ChartQuery, SymbolsResponse};
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::dashboard::{build_chart, render_page, ChartDescription};

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.config.title, &state.table))
}

/// GET /api/v1/symbols
pub async fn list_symbols(State(state): State<Arc<AppState>>) -> Json<SymbolsResponse> {
    Json(SymbolsResponse {
        symbols: state.table.symbols().to_vec(),
        default: state.table.default_symbol().to_string(),
    })
}

/// GET /api/v1/chart
///
/// Unknown symbols are not an error: they get an empty chart.
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Json<ChartDescription> {
    let symbol = query
        .symbol
        .as_deref()
        .unwrap_or_else(|| state.table.default_symbol());

    tracing::debug!(symbol = %symbol, "Chart requested");

    Json(build_chart(&state.table, symbol))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
