//! The single entry point that turns transactions and filter criteria into
//! dashboard data.

use crate::{
    Error,
    dashboard::{
        aggregation::{AggregateResult, AggregationPolicy, aggregate},
        filter::{FilterCriteria, filter_transactions},
    },
    transaction::{Transaction, TransactionRecord},
    validation::{ValidationReport, validate_records},
};

/// Filters `transactions` with `criteria` and aggregates the survivors.
///
/// This is a pure function of its inputs: calling it again with the same
/// arguments gives an identical result, and an empty input or an empty
/// filtered subset gives zero statistics and empty groups.
pub fn compute_dashboard(
    transactions: &[Transaction],
    criteria: &FilterCriteria,
    policy: AggregationPolicy,
) -> AggregateResult {
    let result = aggregate(filter_transactions(transactions, criteria), policy);

    tracing::debug!(
        "aggregated {} of {} transactions into {} categories and {} months",
        result.transaction_count,
        transactions.len(),
        result.totals_by_category.len(),
        result.totals_by_month.len(),
    );

    result
}

/// Validates raw `records`, then computes the dashboard as
/// [compute_dashboard] does.
///
/// # Errors
/// Returns [Error::MalformedTransaction] naming the first record that fails
/// validation, or [Error::TotalOverflow] if the amounts are too large to
/// total.
pub fn compute_dashboard_from_records(
    records: Vec<TransactionRecord>,
    criteria: &FilterCriteria,
    policy: AggregationPolicy,
) -> Result<AggregateResult, Error> {
    compute_dashboard_with_report(records, criteria, policy).map(|(result, _)| result)
}

/// Like [compute_dashboard_from_records], but also returns the data-quality
/// report for `records`.
///
/// # Errors
/// The same as [compute_dashboard_from_records].
pub fn compute_dashboard_with_report(
    records: Vec<TransactionRecord>,
    criteria: &FilterCriteria,
    policy: AggregationPolicy,
) -> Result<(AggregateResult, ValidationReport), Error> {
    let (transactions, report) = validate_records(records)?;

    Ok((compute_dashboard(&transactions, criteria, policy), report))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use crate::{
        Error,
        dashboard::{
            aggregation::AggregationPolicy,
            filter::{FilterCriteria, Selector},
            query::{
                compute_dashboard, compute_dashboard_from_records, compute_dashboard_with_report,
            },
        },
        transaction::{Transaction, TransactionRecord, TransactionType},
        validation::WarningField,
    };

    fn example_transactions() -> Vec<Transaction> {
        vec![
            Transaction::build("1", 100.0, date!(2024 - 01 - 05), "Food")
                .finalise()
                .unwrap(),
            Transaction::build("2", 50.0, date!(2024 - 02 - 10), "Bills")
                .transaction_type(TransactionType::Income)
                .finalise()
                .unwrap(),
        ]
    }

    #[test]
    fn empty_input_gives_zero_result_for_any_criteria() {
        let criteria = FilterCriteria {
            date_start: Some(date!(2024 - 01 - 01)),
            category: Selector::parse("Food"),
            ..Default::default()
        };

        let result = compute_dashboard(&[], &criteria, AggregationPolicy::default());

        assert_eq!(result.total_expense, 0.0);
        assert_eq!(result.average_transaction, 0.0);
        assert_eq!(result.largest_transaction, 0.0);
        assert!(result.totals_by_category.is_empty());
        assert!(result.totals_by_payment_method.is_empty());
        assert!(result.totals_by_month.is_empty());
    }

    #[test]
    fn unfiltered_example() {
        let result = compute_dashboard(
            &example_transactions(),
            &FilterCriteria::default(),
            AggregationPolicy::default(),
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalsByCategory"], json!({ "Food": 100.0, "Bills": 50.0 }));
        assert_eq!(
            json["totalsByMonth"],
            json!({
                "1/2024": { "income": 0.0, "expense": 100.0 },
                "2/2024": { "income": 50.0, "expense": 0.0 }
            })
        );
        assert_eq!(result.total_expense, 100.0);
        assert_eq!(result.average_transaction, 100.0);
        assert_eq!(result.largest_transaction, 100.0);
    }

    #[test]
    fn february_example() {
        let criteria = FilterCriteria {
            date_start: Some(date!(2024 - 02 - 01)),
            date_end: Some(date!(2024 - 02 - 28)),
            ..Default::default()
        };

        let result = compute_dashboard(
            &example_transactions(),
            &criteria,
            AggregationPolicy::default(),
        );

        assert_eq!(result.transaction_count, 1);
        assert_eq!(
            result.totals_by_category.iter().collect::<Vec<_>>(),
            vec![("Bills", &50.0)]
        );
    }

    #[test]
    fn filtered_out_everything_gives_zero_result() {
        let criteria = FilterCriteria {
            category: Selector::parse("Travel"),
            ..Default::default()
        };

        let result = compute_dashboard(
            &example_transactions(),
            &criteria,
            AggregationPolicy::default(),
        );

        assert_eq!(result.transaction_count, 0);
        assert_eq!(result.largest_transaction, 0.0);
        assert!(result.totals_by_category.is_empty());
    }

    #[test]
    fn computing_twice_gives_identical_results() {
        let transactions = example_transactions();
        let criteria = FilterCriteria::default();

        let first = compute_dashboard(&transactions, &criteria, AggregationPolicy::default());
        let second = compute_dashboard(&transactions, &criteria, AggregationPolicy::default());

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn from_records_validates_first() {
        let records: Vec<TransactionRecord> = serde_json::from_value(json!([
            { "id": "1", "date": "2024-01-05", "amount": 100, "type": "expense", "category": "Food" },
            { "id": "2", "date": "2024-01-06", "amount": -3, "type": "expense", "category": "Food" }
        ]))
        .unwrap();

        let result = compute_dashboard_from_records(
            records,
            &FilterCriteria::default(),
            AggregationPolicy::default(),
        );

        assert!(
            matches!(&result, Err(Error::MalformedTransaction { id, .. }) if id == "2"),
            "got {result:?}"
        );
    }

    #[test]
    fn from_records_aggregates_valid_records() {
        let records: Vec<TransactionRecord> = serde_json::from_value(json!([
            { "id": "1", "date": "2024-01-05", "amount": 100, "type": "expense", "category": "Food" },
            { "id": "2", "date": "2024-02-10", "amount": 50, "type": "income", "category": "Bills" }
        ]))
        .unwrap();

        let result = compute_dashboard_from_records(
            records,
            &FilterCriteria::default(),
            AggregationPolicy::default(),
        )
        .unwrap();

        assert_eq!(result.total_expense, 100.0);
        assert_eq!(result.total_income, 50.0);
    }

    #[test]
    fn from_records_rejects_totals_that_would_overflow() {
        let records: Vec<TransactionRecord> = serde_json::from_value(json!([
            { "id": "1", "date": "2024-01-05", "amount": 1.5e308, "category": "Food" },
            { "id": "2", "date": "2024-01-06", "amount": 1.5e308, "category": "Food" }
        ]))
        .unwrap();

        let result = compute_dashboard_from_records(
            records,
            &FilterCriteria::default(),
            AggregationPolicy::default(),
        );

        assert!(
            matches!(result, Err(Error::TotalOverflow(2))),
            "got {result:?}"
        );
    }

    #[test]
    fn with_report_returns_data_quality_warnings() {
        let records: Vec<TransactionRecord> = serde_json::from_value(json!([
            { "id": "1", "date": "2024-01-05", "amount": 10, "category": "Groceries" },
            { "id": "2", "date": "2024-01-06", "amount": 20, "category": "Food" }
        ]))
        .unwrap();

        let (result, report) = compute_dashboard_with_report(
            records,
            &FilterCriteria::default(),
            AggregationPolicy::default(),
        )
        .unwrap();

        assert_eq!(result.totals_by_category.get("Groceries"), Some(&10.0));
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].transaction_id, "1");
        assert_eq!(report.warnings[0].field, WarningField::Category);
    }
}
