//! Boundary validation of transaction records.
//!
//! Malformed records fail validation outright. Records whose category or
//! payment method falls outside the catalogs are accepted, since they still
//! aggregate under their literal name, but each one is reported as a
//! [DataQualityWarning].

use serde::Serialize;

use crate::{
    Error,
    transaction::{Transaction, TransactionRecord},
};

/// Which field of a transaction a [DataQualityWarning] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningField {
    /// The `category` field.
    Category,
    /// The `paymentMethod` field.
    PaymentMethod,
}

/// A transaction that was accepted but uses a value outside a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityWarning {
    /// The ID of the transaction.
    pub transaction_id: String,
    /// The field holding the unknown value.
    pub field: WarningField,
    /// The unknown value, verbatim.
    pub value: String,
}

impl std::fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field = match self.field {
            WarningField::Category => "category",
            WarningField::PaymentMethod => "payment method",
        };

        write!(
            f,
            "transaction {} has unknown {field} \"{}\"",
            self.transaction_id, self.value
        )
    }
}

/// The data-quality findings for a batch of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// One entry per unknown category or payment method.
    pub warnings: Vec<DataQualityWarning>,
}

impl ValidationReport {
    /// Whether every transaction only used catalog values.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Collect a warning for every catalog value in `transactions` that is not
/// a member of its catalog.
pub fn check_data_quality(transactions: &[Transaction]) -> ValidationReport {
    let mut warnings = Vec::new();

    for transaction in transactions {
        if !transaction.category.is_known() {
            warnings.push(DataQualityWarning {
                transaction_id: transaction.id.clone(),
                field: WarningField::Category,
                value: transaction.category.as_str().to_owned(),
            });
        }

        if let Some(payment_method) = &transaction.payment_method
            && !payment_method.is_known()
        {
            warnings.push(DataQualityWarning {
                transaction_id: transaction.id.clone(),
                field: WarningField::PaymentMethod,
                value: payment_method.as_str().to_owned(),
            });
        }
    }

    for warning in &warnings {
        tracing::warn!("data quality: {warning}");
    }

    ValidationReport { warnings }
}

/// Validate `records` and convert them into transactions, in input order.
///
/// # Errors
/// Returns [Error::MalformedTransaction] for the first record that cannot be
/// converted, or [Error::TotalOverflow] if the amounts sum to infinity. No
/// partial result is returned.
pub fn validate_records(
    records: Vec<TransactionRecord>,
) -> Result<(Vec<Transaction>, ValidationReport), Error> {
    let transactions = records
        .into_iter()
        .enumerate()
        .map(|(position, record)| record.into_transaction(position))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|error| tracing::warn!("rejected transaction records: {error}"))?;

    // Amounts are non-negative, so every grouped total and statistic is at
    // most the grand total.
    let grand_total: f64 = transactions.iter().map(|transaction| transaction.amount).sum();
    if !grand_total.is_finite() {
        let error = Error::TotalOverflow(transactions.len());
        tracing::warn!("rejected transaction records: {error}");
        return Err(error);
    }

    let report = check_data_quality(&transactions);

    Ok((transactions, report))
}
