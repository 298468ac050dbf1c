//! Defines the transaction model and its validation from loosely-typed records.
//!
//! Transactions arrive from the data source as [TransactionRecord]s, which
//! mirror whatever shape the document store or an uploaded file used. A record
//! must be turned into a [Transaction] with [TransactionRecord::into_transaction]
//! before it can be filtered or aggregated.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

use crate::{
    Error,
    catalog::{CatalogValue, Category, PaymentMethod},
};

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const ISO_LOCAL_DATE_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Parse a calendar date from an ISO-8601 string.
///
/// Accepts plain dates ("2024-01-05"), RFC 3339 date-times
/// ("2024-01-05T10:30:00.000Z") and local date-times ("2024-01-05T10:30:00").
/// For date-times, the calendar date as written is kept; no timezone
/// conversion is applied.
pub fn parse_date(text: &str) -> Option<Date> {
    let text = text.trim();

    Date::parse(text, ISO_DATE)
        .ok()
        .or_else(|| OffsetDateTime::parse(text, &Rfc3339).ok().map(|dt| dt.date()))
        .or_else(|| {
            PrimitiveDateTime::parse(text, ISO_LOCAL_DATE_TIME)
                .ok()
                .map(|dt| dt.date())
        })
}

/// Format a date as "YYYY-MM-DD".
pub fn format_date(date: Date) -> String {
    date.format(ISO_DATE).unwrap_or_else(|_| date.to_string())
}

fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(*date))
}

/// Whether money was spent or earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
}

impl TransactionType {
    /// The lowercase wire name, "expense" or "income".
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }

    /// Parse the lowercase wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "expense" => Some(TransactionType::Expense),
            "income" => Some(TransactionType::Income),
            _ => None,
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction` in code, use [Transaction::build]. Data from
/// outside the program should go through [TransactionRecord::into_transaction].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The opaque ID of the transaction, stable for its lifetime.
    pub id: String,
    /// When the transaction happened.
    #[serde(serialize_with = "serialize_date")]
    pub date: Date,
    /// The amount of money spent or earned. Never negative.
    pub amount: f64,
    /// Whether the money was spent or earned.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// What the money was spent on (or earned from).
    pub category: CatalogValue<Category>,
    /// How the transaction was paid, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<CatalogValue<PaymentMethod>>,
    /// A text description of the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Who was paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    /// Where the transaction happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Transaction {
    /// Create a new expense transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(id: &str, amount: f64, date: Date, category: &str) -> TransactionBuilder {
        TransactionBuilder {
            id: id.to_owned(),
            amount,
            date,
            transaction_type: TransactionType::Expense,
            category: category.to_owned(),
            payment_method: None,
            description: None,
            merchant: None,
            location: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    id: String,
    amount: f64,
    date: Date,
    transaction_type: TransactionType,
    category: String,
    payment_method: Option<String>,
    description: Option<String>,
    merchant: Option<String>,
    location: Option<String>,
}

impl TransactionBuilder {
    /// Set whether the transaction is an expense or income.
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = transaction_type;
        self
    }

    /// Set the payment method by name.
    pub fn payment_method(mut self, payment_method: &str) -> Self {
        self.payment_method = Some(payment_method.to_owned());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Set the merchant.
    pub fn merchant(mut self, merchant: &str) -> Self {
        self.merchant = Some(merchant.to_owned());
        self
    }

    /// Set the location.
    pub fn location(mut self, location: &str) -> Self {
        self.location = Some(location.to_owned());
        self
    }

    /// Create the [Transaction].
    ///
    /// # Errors
    /// Returns [Error::MalformedTransaction] if the amount is negative or not
    /// a finite number.
    pub fn finalise(self) -> Result<Transaction, Error> {
        let amount = check_amount(&self.id, self.amount)?;

        Ok(Transaction {
            id: self.id,
            date: self.date,
            amount,
            transaction_type: self.transaction_type,
            category: CatalogValue::parse(&self.category),
            payment_method: self.payment_method.as_deref().map(CatalogValue::parse),
            description: self.description,
            merchant: self.merchant,
            location: self.location,
        })
    }
}

fn check_amount(id: &str, amount: f64) -> Result<f64, Error> {
    if !amount.is_finite() {
        return Err(Error::malformed(id, format!("amount {amount} is not a finite number")));
    }

    if amount < 0.0 {
        return Err(Error::malformed(id, format!("amount {amount} is negative")));
    }

    Ok(amount)
}

/// A transaction as it arrives from a data source, before validation.
///
/// This accepts both shapes the expense tracker has stored over time: the
/// document store shape (`_id`, `type`, `description`) and the payment
/// dashboard shape (`id`, `paymentMethod`, `merchant`, `location`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// A string or integer ID.
    #[serde(default, alias = "_id")]
    pub id: Option<Value>,
    /// An ISO-8601 date or date-time.
    #[serde(default)]
    pub date: Option<String>,
    /// A number, or a string holding a number.
    #[serde(default)]
    pub amount: Option<Value>,
    /// "expense" or "income". Absent means expense.
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    /// A category name, or an object with a `name` field.
    #[serde(default)]
    pub category: Option<Value>,
    /// A payment method name.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Free text.
    #[serde(default)]
    pub description: Option<String>,
    /// Free text.
    #[serde(default)]
    pub merchant: Option<String>,
    /// Free text.
    #[serde(default)]
    pub location: Option<String>,
}

impl TransactionRecord {
    /// The record's ID as a string, if it has a usable one.
    pub fn id_string(&self) -> Option<String> {
        match &self.id {
            Some(Value::String(id)) if !id.trim().is_empty() => Some(id.trim().to_owned()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Validate the record and convert it into a [Transaction].
    ///
    /// `position` is the record's index in its input and is used to identify
    /// the record in errors when it has no usable ID.
    ///
    /// # Errors
    /// Returns [Error::MalformedTransaction] if the ID is missing, the date
    /// does not parse, the amount is missing, non-numeric or negative, the type
    /// is not "expense" or "income", or the category is missing.
    pub fn into_transaction(self, position: usize) -> Result<Transaction, Error> {
        let id = self
            .id_string()
            .ok_or_else(|| Error::malformed(format!("#{position}"), "missing transaction ID"))?;

        let date = match self.date.as_deref() {
            Some(text) => parse_date(text)
                .ok_or_else(|| Error::malformed(&id, format!("invalid date \"{text}\"")))?,
            None => return Err(Error::malformed(&id, "missing date")),
        };

        let amount = match &self.amount {
            Some(Value::Number(number)) => number
                .as_f64()
                .ok_or_else(|| Error::malformed(&id, format!("amount {number} is not a number")))?,
            Some(Value::String(text)) => text.trim().parse::<f64>().map_err(|_| {
                Error::malformed(&id, format!("amount \"{text}\" is not a number"))
            })?,
            Some(other) => {
                return Err(Error::malformed(&id, format!("amount {other} is not a number")));
            }
            None => return Err(Error::malformed(&id, "missing amount")),
        };
        let amount = check_amount(&id, amount)?;

        let transaction_type = match self.transaction_type.as_deref().map(str::trim) {
            None | Some("") => TransactionType::Expense,
            Some(name) => TransactionType::from_name(name).ok_or_else(|| {
                Error::malformed(
                    &id,
                    format!("type \"{name}\" is neither \"expense\" nor \"income\""),
                )
            })?,
        };

        let category = match &self.category {
            Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_owned(),
            Some(Value::Object(fields)) => match fields.get("name") {
                Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_owned(),
                _ => return Err(Error::malformed(&id, "category object has no name")),
            },
            _ => return Err(Error::malformed(&id, "missing category")),
        };

        let payment_method = self
            .payment_method
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(CatalogValue::parse);

        Ok(Transaction {
            id,
            date,
            amount,
            transaction_type,
            category: CatalogValue::parse(&category),
            payment_method,
            description: self.description,
            merchant: self.merchant,
            location: self.location,
        })
    }
}
