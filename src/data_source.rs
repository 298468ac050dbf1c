//! Loads transaction records from JSON and CSV files.
//!
//! JSON files hold an array of records in either of the shapes accepted by
//! [TransactionRecord]. CSV files must have a header row; the columns are
//! `id,date,amount,type,category,paymentMethod,description,merchant,location`
//! and every column after `amount` may be left out or empty.

use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;
use serde_json::Value;

use crate::{
    Error,
    transaction::{Transaction, TransactionRecord},
    validation::{ValidationReport, validate_records},
};

/// One row of a transactions CSV file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    id: Option<String>,
    date: Option<String>,
    amount: Option<String>,
    #[serde(default, rename = "type")]
    transaction_type: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "payment_method")]
    payment_method: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    merchant: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

impl From<CsvRow> for TransactionRecord {
    fn from(row: CsvRow) -> Self {
        TransactionRecord {
            id: row.id.map(Value::String),
            date: row.date,
            amount: row.amount.map(Value::String),
            transaction_type: row.transaction_type,
            category: row.category.map(Value::String),
            payment_method: row.payment_method,
            description: row.description,
            merchant: row.merchant,
            location: row.location,
        }
    }
}

/// Read transaction records from a JSON array.
///
/// # Errors
/// Returns [Error::Json] if the text is not an array of records.
pub fn parse_json_records<R: std::io::Read>(reader: R) -> Result<Vec<TransactionRecord>, Error> {
    Ok(serde_json::from_reader(reader)?)
}

/// Read transaction records from CSV text with a header row.
///
/// # Errors
/// Returns [Error::Csv] if a row cannot be parsed.
pub fn parse_csv_records<R: std::io::Read>(reader: R) -> Result<Vec<TransactionRecord>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        records.push(row?.into());
    }

    Ok(records)
}

/// Read the transaction records in the file at `path`.
///
/// The format is chosen by the file extension, `.json` or `.csv`.
///
/// # Errors
/// Returns [Error::UnsupportedFileType] for other extensions, [Error::Io] if
/// the file cannot be opened, or the parse error for its format.
pub fn load_records(path: &Path) -> Result<Vec<TransactionRecord>, Error> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    let records = match extension.as_deref() {
        Some("json") => parse_json_records(BufReader::new(File::open(path)?))?,
        Some("csv") => parse_csv_records(BufReader::new(File::open(path)?))?,
        _ => return Err(Error::UnsupportedFileType(path.display().to_string())),
    };

    tracing::debug!("read {} records from {}", records.len(), path.display());

    Ok(records)
}

/// Read and validate the transactions in the file at `path`.
///
/// # Errors
/// Returns the errors of [load_records], or [Error::MalformedTransaction] for
/// the first record that fails validation.
pub fn load_transactions(path: &Path) -> Result<(Vec<Transaction>, ValidationReport), Error> {
    validate_records(load_records(path)?)
}
