//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{
    AppState,
    dashboard::{get_catalog, get_dashboard, get_transactions, post_dashboard},
    endpoints,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::DASHBOARD_API,
            get(get_dashboard).post(post_dashboard),
        )
        .route(endpoints::TRANSACTIONS_API, get(get_transactions))
        .route(endpoints::CATALOG_API, get(get_catalog))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested resource could not be found" })),
    )
        .into_response()
}
