//! Dashboard HTTP handlers.
//!
//! Every handler answers with JSON. Errors are converted by
//! [Error](crate::Error)'s `IntoResponse` implementation.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    catalog::{Catalog, catalog},
    dashboard::{
        aggregation::{AggregateResult, AggregationPolicy},
        filter::{FilterCriteria, FilterQuery},
        query::{compute_dashboard, compute_dashboard_with_report},
    },
    transaction::{Transaction, TransactionRecord},
    validation::DataQualityWarning,
};

/// The state needed for answering dashboard queries.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The transactions loaded at start up.
    pub transactions: Arc<[Transaction]>,
    /// The policy for the summary statistics.
    pub policy: AggregationPolicy,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            policy: state.policy,
        }
    }
}

/// The body of a dashboard query over client supplied transactions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRequest {
    /// The transactions to aggregate.
    pub transactions: Vec<TransactionRecord>,
    /// The filter criteria. Omitted criteria include everything.
    #[serde(default)]
    pub criteria: FilterQuery,
    /// Overrides the server's policy when present.
    #[serde(default)]
    pub policy: Option<AggregationPolicy>,
}

/// The dashboard over client supplied transactions, with a warning for each
/// category or payment method outside the catalogs.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// The dashboard data.
    #[serde(flatten)]
    pub result: AggregateResult,
    /// The data-quality warnings for the request's transactions.
    pub warnings: Vec<DataQualityWarning>,
}

/// Compute the dashboard over the server's transactions.
pub async fn get_dashboard(
    State(state): State<DashboardState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<AggregateResult>, Error> {
    let criteria = FilterCriteria::try_from(query)?;

    Ok(Json(compute_dashboard(
        &state.transactions,
        &criteria,
        state.policy,
    )))
}

/// Compute the dashboard over the transactions in the request body.
pub async fn post_dashboard(
    State(state): State<DashboardState>,
    Json(request): Json<DashboardRequest>,
) -> Result<Json<DashboardResponse>, Error> {
    let criteria = FilterCriteria::try_from(request.criteria)?;
    let policy = request.policy.unwrap_or(state.policy);

    let (result, report) =
        compute_dashboard_with_report(request.transactions, &criteria, policy)?;

    Ok(Json(DashboardResponse {
        result,
        warnings: report.warnings,
    }))
}

/// List the server's transactions, newest first.
pub async fn get_transactions(State(state): State<DashboardState>) -> Json<Vec<Transaction>> {
    let mut transactions = state.transactions.to_vec();
    // Stable sort keeps input order within a day.
    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    Json(transactions)
}

/// List the categories and payment methods with their display metadata.
pub async fn get_catalog() -> Json<Catalog> {
    Json(catalog())
}
