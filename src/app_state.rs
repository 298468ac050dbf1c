//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::{dashboard::AggregationPolicy, transaction::Transaction};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transactions served by the dashboard, shared read-only between
    /// requests.
    pub transactions: Arc<[Transaction]>,

    /// The policy for the dashboard summary statistics.
    pub policy: AggregationPolicy,
}

impl AppState {
    /// Create a new [AppState] serving `transactions`.
    pub fn new(transactions: Vec<Transaction>, policy: AggregationPolicy) -> Self {
        Self {
            transactions: transactions.into(),
            policy,
        }
    }
}
