//! Transaction aggregation for dashboard charts.
//!
//! Provides grouped totals by category, payment method, month and day, and
//! the summary statistics shown on the dashboard cards.

use serde::{Deserialize, Serialize};

use crate::{
    dashboard::totals::Totals,
    transaction::{Transaction, TransactionType, format_date},
};

/// Controls which transactions count towards the summary statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationPolicy {
    /// When `false` (the default), `totalExpense`, `averageTransaction` and
    /// `largestTransaction` only consider expense transactions. When `true`
    /// they consider every filtered transaction, income included.
    #[serde(default)]
    pub include_income_in_total: bool,
}

impl AggregationPolicy {
    fn counts(self, transaction: &Transaction) -> bool {
        self.include_income_in_total || transaction.transaction_type == TransactionType::Expense
    }
}

/// Income and expense totals for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthlySplit {
    /// The sum of income amounts.
    pub income: f64,
    /// The sum of expense amounts.
    pub expense: f64,
}

/// Everything the dashboard charts and cards display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    /// Sum of amounts per category, income and expenses alike.
    pub totals_by_category: Totals<f64>,
    /// Sum of amounts per payment method. Transactions without a payment
    /// method are not included.
    pub totals_by_payment_method: Totals<f64>,
    /// Income and expenses per month, keyed "M/YYYY", e.g. "1/2024".
    pub totals_by_month: Totals<MonthlySplit>,
    /// Sum of amounts per day, keyed "YYYY-MM-DD".
    pub daily_totals: Totals<f64>,
    /// Sum of amounts counted by the [AggregationPolicy].
    pub total_expense: f64,
    /// Sum of income amounts.
    pub total_income: f64,
    /// `total_expense` divided by the number of counted transactions, or 0.
    pub average_transaction: f64,
    /// The largest counted amount, or 0.
    pub largest_transaction: f64,
    /// The number of transactions aggregated.
    pub transaction_count: usize,
}

/// Formats the month bucket key for a date: 1-indexed month and full year.
pub(super) fn month_key(date: time::Date) -> String {
    format!("{}/{}", u8::from(date.month()), date.year())
}

/// Aggregates already filtered transactions in a single pass.
///
/// Groups are created on first sight and keep that order. An empty input
/// produces empty groups and zero statistics.
pub fn aggregate<'a, I>(transactions: I, policy: AggregationPolicy) -> AggregateResult
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut result = AggregateResult::default();
    let mut counted = 0usize;

    for transaction in transactions {
        let amount = transaction.amount;
        result.transaction_count += 1;

        *result
            .totals_by_category
            .entry(transaction.category.as_str()) += amount;

        if let Some(payment_method) = &transaction.payment_method {
            *result
                .totals_by_payment_method
                .entry(payment_method.as_str()) += amount;
        }

        let month = result.totals_by_month.entry(&month_key(transaction.date));
        match transaction.transaction_type {
            TransactionType::Income => {
                month.income += amount;
                result.total_income += amount;
            }
            TransactionType::Expense => month.expense += amount,
        }

        *result.daily_totals.entry(&format_date(transaction.date)) += amount;

        if policy.counts(transaction) {
            counted += 1;
            result.total_expense += amount;
            // Amounts are never negative, so zero is a valid floor.
            result.largest_transaction = result.largest_transaction.max(amount);
        }
    }

    if counted > 0 {
        result.average_transaction = result.total_expense / counted as f64;
    }

    result
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        dashboard::aggregation::{AggregateResult, AggregationPolicy, aggregate, month_key},
        transaction::{Transaction, TransactionType},
    };

    fn expense(id: &str, amount: f64, date: time::Date, category: &str) -> Transaction {
        Transaction::build(id, amount, date, category)
            .finalise()
            .unwrap()
    }

    fn income(id: &str, amount: f64, date: time::Date, category: &str) -> Transaction {
        Transaction::build(id, amount, date, category)
            .transaction_type(TransactionType::Income)
            .finalise()
            .unwrap()
    }

    #[test]
    fn month_key_is_not_zero_padded() {
        assert_eq!(month_key(date!(2024 - 01 - 31)), "1/2024");
        assert_eq!(month_key(date!(2023 - 12 - 01)), "12/2023");
    }

    #[test]
    fn empty_input_gives_zero_result() {
        let transactions: Vec<Transaction> = Vec::new();

        let result = aggregate(&transactions, AggregationPolicy::default());

        assert_eq!(result, AggregateResult::default());
        assert_eq!(result.total_expense, 0.0);
        assert_eq!(result.average_transaction, 0.0);
        assert_eq!(result.largest_transaction, 0.0);
        assert!(result.totals_by_category.is_empty());
        assert!(result.totals_by_payment_method.is_empty());
        assert!(result.totals_by_month.is_empty());
    }

    #[test]
    fn groups_by_category_and_payment_method() {
        let transactions = vec![
            Transaction::build("1", 100.0, date!(2024 - 01 - 05), "Food")
                .payment_method("PhonePe")
                .finalise()
                .unwrap(),
            Transaction::build("2", 40.0, date!(2024 - 01 - 06), "Bills")
                .payment_method("CRED")
                .finalise()
                .unwrap(),
            Transaction::build("3", 60.0, date!(2024 - 01 - 07), "Food")
                .payment_method("CRED")
                .finalise()
                .unwrap(),
            expense("4", 5.0, date!(2024 - 01 - 07), "Food"),
        ];

        let result = aggregate(&transactions, AggregationPolicy::default());

        assert_eq!(
            result.totals_by_category.keys().collect::<Vec<_>>(),
            vec!["Food", "Bills"]
        );
        assert_eq!(result.totals_by_category.get("Food"), Some(&165.0));
        assert_eq!(result.totals_by_category.get("Bills"), Some(&40.0));
        assert_eq!(
            result.totals_by_payment_method.keys().collect::<Vec<_>>(),
            vec!["PhonePe", "CRED"]
        );
        assert_eq!(result.totals_by_payment_method.get("CRED"), Some(&100.0));
        assert_eq!(result.totals_by_payment_method.get("Paytm"), None);
    }

    #[test]
    fn splits_months_by_type() {
        let transactions = vec![
            expense("1", 100.0, date!(2024 - 01 - 05), "Food"),
            income("2", 50.0, date!(2024 - 02 - 10), "Bills"),
            expense("3", 25.0, date!(2024 - 02 - 11), "Food"),
        ];

        let result = aggregate(&transactions, AggregationPolicy::default());

        let january = result.totals_by_month.get("1/2024").unwrap();
        assert_eq!((january.income, january.expense), (0.0, 100.0));
        let february = result.totals_by_month.get("2/2024").unwrap();
        assert_eq!((february.income, february.expense), (50.0, 25.0));
    }

    #[test]
    fn default_policy_only_counts_expenses() {
        let transactions = vec![
            expense("1", 100.0, date!(2024 - 01 - 05), "Food"),
            income("2", 500.0, date!(2024 - 02 - 10), "Bills"),
            expense("3", 50.0, date!(2024 - 02 - 11), "Food"),
        ];

        let result = aggregate(&transactions, AggregationPolicy::default());

        assert_eq!(result.total_expense, 150.0);
        assert_eq!(result.average_transaction, 75.0);
        assert_eq!(result.largest_transaction, 100.0);
        assert_eq!(result.total_income, 500.0);
        assert_eq!(result.transaction_count, 3);
    }

    #[test]
    fn inclusive_policy_counts_every_transaction() {
        let transactions = vec![
            expense("1", 100.0, date!(2024 - 01 - 05), "Food"),
            income("2", 500.0, date!(2024 - 02 - 10), "Bills"),
            expense("3", 60.0, date!(2024 - 02 - 11), "Food"),
        ];
        let policy = AggregationPolicy {
            include_income_in_total: true,
        };

        let result = aggregate(&transactions, policy);

        assert_eq!(result.total_expense, 660.0);
        assert_eq!(result.average_transaction, 220.0);
        assert_eq!(result.largest_transaction, 500.0);
    }

    #[test]
    fn only_income_gives_zero_expense_statistics() {
        let transactions = vec![income("1", 500.0, date!(2024 - 02 - 10), "Bills")];

        let result = aggregate(&transactions, AggregationPolicy::default());

        assert_eq!(result.total_expense, 0.0);
        assert_eq!(result.average_transaction, 0.0);
        assert_eq!(result.largest_transaction, 0.0);
        assert_eq!(result.totals_by_category.get("Bills"), Some(&500.0));
    }

    #[test]
    fn single_zero_amount_transaction() {
        let transactions = vec![expense("1", 0.0, date!(2024 - 02 - 10), "Food")];

        let result = aggregate(&transactions, AggregationPolicy::default());

        assert_eq!(result.largest_transaction, 0.0);
        assert_eq!(result.average_transaction, 0.0);
        assert!(!result.average_transaction.is_nan());
        assert_eq!(result.transaction_count, 1);
    }

    #[test]
    fn unknown_category_is_grouped_under_its_literal_name() {
        let transactions = vec![
            expense("1", 12.5, date!(2024 - 02 - 10), "Groceries"),
            expense("2", 7.5, date!(2024 - 02 - 11), "Groceries"),
        ];

        let result = aggregate(&transactions, AggregationPolicy::default());

        assert_eq!(result.totals_by_category.get("Groceries"), Some(&20.0));
    }

    #[test]
    fn category_totals_partition_the_total() {
        let transactions = vec![
            expense("1", 10.5, date!(2024 - 01 - 01), "Food"),
            income("2", 20.25, date!(2024 - 01 - 02), "Bills"),
            expense("3", 30.0, date!(2024 - 02 - 03), "Travel"),
            expense("4", 0.25, date!(2024 - 03 - 04), "Food"),
        ];

        let result = aggregate(&transactions, AggregationPolicy::default());

        let grouped: f64 = result.totals_by_category.values().sum();
        let total: f64 = transactions.iter().map(|transaction| transaction.amount).sum();
        assert_eq!(grouped, total);

        let monthly: f64 = result
            .totals_by_month
            .values()
            .map(|month| month.income + month.expense)
            .sum();
        assert_eq!(monthly, total);
    }

    #[test]
    fn daily_totals_follow_first_seen_order() {
        let transactions = vec![
            expense("1", 10.0, date!(2024 - 01 - 02), "Food"),
            expense("2", 5.0, date!(2024 - 01 - 01), "Food"),
            income("3", 1.0, date!(2024 - 01 - 02), "Bills"),
        ];

        let result = aggregate(&transactions, AggregationPolicy::default());

        assert_eq!(
            result.daily_totals.keys().collect::<Vec<_>>(),
            vec!["2024-01-02", "2024-01-01"]
        );
        assert_eq!(result.daily_totals.get("2024-01-02"), Some(&11.0));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let transactions = vec![expense("1", 100.0, date!(2024 - 01 - 05), "Food")];

        let json = serde_json::to_value(aggregate(&transactions, AggregationPolicy::default()))
            .unwrap();

        assert_eq!(json["totalsByCategory"]["Food"], 100.0);
        assert_eq!(json["totalsByMonth"]["1/2024"]["expense"], 100.0);
        assert_eq!(json["totalsByMonth"]["1/2024"]["income"], 0.0);
        assert_eq!(json["totalExpense"], 100.0);
        assert_eq!(json["averageTransaction"], 100.0);
        assert_eq!(json["largestTransaction"], 100.0);
        assert_eq!(json["transactionCount"], 1);
        assert!(json["totalsByPaymentMethod"].as_object().unwrap().is_empty());
    }
}
