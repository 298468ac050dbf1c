//! The API endpoints URIs.

/// The route for dashboard data: GET filters the server's transactions,
/// POST aggregates the transactions in the request body.
pub const DASHBOARD_API: &str = "/api/dashboard";
/// The route to list the server's transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to list categories and payment methods.
pub const CATALOG_API: &str = "/api/catalog";
