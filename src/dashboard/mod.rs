//! Dashboard module
//!
//! Filters transactions and aggregates them into the totals and statistics
//! shown on the dashboard, and serves them over HTTP.

mod aggregation;
mod filter;
mod handlers;
mod query;
mod totals;

pub use aggregation::{AggregateResult, AggregationPolicy, MonthlySplit, aggregate};
pub use filter::{FilterCriteria, FilterQuery, Selector, filter_transactions, matches};
pub use handlers::{get_catalog, get_dashboard, get_transactions, post_dashboard};
pub use query::{compute_dashboard, compute_dashboard_from_records, compute_dashboard_with_report};
pub use totals::Totals;
