//! Spendboard is a dashboard for tracking personal spending.
//!
//! This library filters a list of expense and income transactions by date
//! range, payment method, category and type, and aggregates the matching
//! transactions into per-category, per-payment-method, per-month and per-day
//! totals along with summary statistics. The results are served as JSON by a
//! REST API and printed by the `spendboard` command line tool.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod catalog;
mod dashboard;
mod data_source;
mod endpoints;
mod error;
mod format;
mod logging;
mod routing;
mod sample_data;
mod transaction;
mod validation;

pub use app_state::AppState;
pub use catalog::{
    Catalog, CatalogEntry, CatalogItem, CatalogValue, Category, PaymentMethod, catalog,
};
pub use dashboard::{
    AggregateResult, AggregationPolicy, FilterCriteria, FilterQuery, MonthlySplit, Selector,
    Totals, aggregate, compute_dashboard, compute_dashboard_from_records,
    compute_dashboard_with_report, filter_transactions, matches,
};
pub use data_source::{load_records, load_transactions, parse_csv_records, parse_json_records};
pub use error::Error;
pub use format::format_currency;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use sample_data::sample_transactions;
pub use transaction::{
    Transaction, TransactionBuilder, TransactionRecord, TransactionType, format_date, parse_date,
};
pub use validation::{
    DataQualityWarning, ValidationReport, WarningField, check_data_quality, validate_records,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
