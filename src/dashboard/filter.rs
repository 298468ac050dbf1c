//! Filter criteria and the predicate that decides which transactions are
//! included in a dashboard.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::Date;

use crate::{
    Error,
    catalog::{CatalogEntry, CatalogValue},
    transaction::{Transaction, TransactionType, format_date, parse_date},
};

/// Selects either every value of a dimension or one named value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selector {
    /// Every value, spelled "all" on the wire.
    #[default]
    All,
    /// Only the named value.
    Only(String),
}

impl Selector {
    /// Parse a selector. Empty strings and "all" (any case) select everything.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();

        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Selector::All
        } else {
            Selector::Only(value.to_owned())
        }
    }

    /// Whether the selector accepts `name`.
    fn matches_name(&self, name: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(selected) => selected == name,
        }
    }

    /// Whether the selector accepts a catalog value.
    ///
    /// A named selector only accepts known catalog members, so unknown and
    /// missing values only pass [Selector::All].
    fn matches_catalog<T: CatalogEntry>(&self, value: Option<&CatalogValue<T>>) -> bool {
        match (self, value) {
            (Selector::All, _) => true,
            (Selector::Only(selected), Some(CatalogValue::Known(entry))) => {
                entry.name() == selected
            }
            (Selector::Only(_), _) => false,
        }
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selector::All => serializer.serialize_str("all"),
            Selector::Only(name) => serializer.serialize_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Selector::parse).unwrap_or_default())
    }
}

/// The user-selected constraints on which transactions a dashboard covers.
///
/// Every bound must pass for a transaction to be included. The default
/// criteria include everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// The earliest included date, inclusive.
    pub date_start: Option<Date>,
    /// The latest included date, inclusive.
    pub date_end: Option<Date>,
    /// The payment method to include.
    pub payment_method: Selector,
    /// The category to include.
    pub category: Selector,
    /// The transaction type ("expense" or "income") to include.
    pub transaction_type: Selector,
}

/// Filter criteria as they arrive in a query string or JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    /// An ISO-8601 date, or null/empty for no lower bound.
    #[serde(default)]
    pub date_start: Option<String>,
    /// An ISO-8601 date, or null/empty for no upper bound.
    #[serde(default)]
    pub date_end: Option<String>,
    /// A payment method name or "all".
    #[serde(default)]
    pub payment_method: Selector,
    /// A category name or "all".
    #[serde(default)]
    pub category: Selector,
    /// "expense", "income" or "all", in any case.
    #[serde(default, rename = "type")]
    pub transaction_type: Selector,
}

fn parse_bound(field: &str, value: Option<&str>) -> Result<Option<Date>, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_date(text)
            .map(Some)
            .ok_or_else(|| Error::InvalidFilter(format!("{field} \"{text}\" is not a valid date"))),
    }
}

/// Type names are matched in any case and normalised to the lowercase wire
/// name.
fn parse_type_selector(selector: Selector) -> Result<Selector, Error> {
    match selector {
        Selector::All => Ok(Selector::All),
        Selector::Only(name) => TransactionType::from_name(&name.to_ascii_lowercase())
            .map(|transaction_type| Selector::Only(transaction_type.as_str().to_owned()))
            .ok_or_else(|| {
                Error::InvalidFilter(format!(
                    "type \"{name}\" is not \"expense\", \"income\" or \"all\""
                ))
            }),
    }
}

impl TryFrom<FilterQuery> for FilterCriteria {
    type Error = Error;

    fn try_from(query: FilterQuery) -> Result<Self, Self::Error> {
        Ok(FilterCriteria {
            date_start: parse_bound("dateStart", query.date_start.as_deref())?,
            date_end: parse_bound("dateEnd", query.date_end.as_deref())?,
            payment_method: query.payment_method,
            category: query.category,
            transaction_type: parse_type_selector(query.transaction_type)?,
        })
    }
}

impl From<&FilterCriteria> for FilterQuery {
    fn from(criteria: &FilterCriteria) -> Self {
        FilterQuery {
            date_start: criteria.date_start.map(format_date),
            date_end: criteria.date_end.map(format_date),
            payment_method: criteria.payment_method.clone(),
            category: criteria.category.clone(),
            transaction_type: criteria.transaction_type.clone(),
        }
    }
}

/// Whether `transaction` passes every bound in `criteria`.
///
/// Date bounds are inclusive. If `date_start` is after `date_end` no
/// transaction can pass.
pub fn matches(transaction: &Transaction, criteria: &FilterCriteria) -> bool {
    criteria
        .date_start
        .is_none_or(|start| transaction.date >= start)
        && criteria.date_end.is_none_or(|end| transaction.date <= end)
        && criteria
            .payment_method
            .matches_catalog(transaction.payment_method.as_ref())
        && criteria
            .category
            .matches_catalog(Some(&transaction.category))
        && criteria
            .transaction_type
            .matches_name(transaction.transaction_type.as_str())
}

/// The transactions that pass `criteria`, in input order.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    criteria: &'a FilterCriteria,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions
        .iter()
        .filter(move |transaction| matches(transaction, criteria))
}
