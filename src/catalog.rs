//! The closed sets of spending categories and payment methods.
//!
//! Each member carries the display color and icon used by the dashboard
//! charts. Values read from the outside world that are not members of a set
//! are kept as [CatalogValue::Unknown] so they still show up in grouped sums.

use std::fmt::Display;

use serde::{Serialize, Serializer};

/// A named member of a closed set with display metadata.
pub trait CatalogEntry: Copy + Sized + 'static {
    /// Every member of the set, in display order.
    const ALL: &'static [Self];

    /// The canonical name, e.g. "Food".
    fn name(self) -> &'static str;

    /// The display color as a hex string, e.g. "#ff922b".
    fn color(self) -> &'static str;

    /// The display icon.
    fn icon(self) -> &'static str;

    /// Look up a member by its exact (case-sensitive) name.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|entry| entry.name() == name)
    }
}

/// What a transaction was spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Clothes, gadgets and other goods.
    Shopping,
    /// Utilities and recurring bills.
    Bills,
    /// Groceries and eating out.
    Food,
    /// Movies, events and subscriptions.
    Entertainment,
    /// Transport and holidays.
    Travel,
    /// Doctors and pharmacies.
    Healthcare,
    /// Courses, books and fees.
    Education,
}

impl CatalogEntry for Category {
    const ALL: &'static [Self] = &[
        Category::Shopping,
        Category::Bills,
        Category::Food,
        Category::Entertainment,
        Category::Travel,
        Category::Healthcare,
        Category::Education,
    ];

    fn name(self) -> &'static str {
        match self {
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Food => "Food",
            Category::Entertainment => "Entertainment",
            Category::Travel => "Travel",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Category::Shopping => "#ff6b6b",
            Category::Bills => "#4dabf7",
            Category::Food => "#ff922b",
            Category::Entertainment => "#be4bdb",
            Category::Travel => "#20c997",
            Category::Healthcare => "#f06595",
            Category::Education => "#6741d9",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Category::Shopping => "🛍️",
            Category::Bills => "🧾",
            Category::Food => "🍔",
            Category::Entertainment => "🎬",
            Category::Travel => "✈️",
            Category::Healthcare => "🏥",
            Category::Education => "🎓",
        }
    }
}

/// How a transaction was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// The PhonePe UPI app.
    PhonePe,
    /// The CRED card payment app.
    Cred,
    /// Google Pay.
    GooglePay,
    /// The Paytm wallet.
    Paytm,
    /// Amazon Pay.
    AmazonPay,
}

impl CatalogEntry for PaymentMethod {
    const ALL: &'static [Self] = &[
        PaymentMethod::PhonePe,
        PaymentMethod::Cred,
        PaymentMethod::GooglePay,
        PaymentMethod::Paytm,
        PaymentMethod::AmazonPay,
    ];

    fn name(self) -> &'static str {
        match self {
            PaymentMethod::PhonePe => "PhonePe",
            PaymentMethod::Cred => "CRED",
            PaymentMethod::GooglePay => "GooglePay",
            PaymentMethod::Paytm => "Paytm",
            PaymentMethod::AmazonPay => "AmazonPay",
        }
    }

    fn color(self) -> &'static str {
        match self {
            PaymentMethod::PhonePe => "#5e5ce6",
            PaymentMethod::Cred => "#00c805",
            PaymentMethod::GooglePay => "#4285f4",
            PaymentMethod::Paytm => "#20336b",
            PaymentMethod::AmazonPay => "#ff9900",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            PaymentMethod::PhonePe => "📱",
            PaymentMethod::Cred => "💳",
            PaymentMethod::GooglePay => "Ⓜ️",
            PaymentMethod::Paytm => "🏦",
            PaymentMethod::AmazonPay => "📦",
        }
    }
}

/// A value that should be a member of a catalog, or the literal string if
/// it is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogValue<T> {
    /// A recognised member of the catalog.
    Known(T),
    /// A value outside the catalog, kept verbatim.
    Unknown(String),
}

impl<T: CatalogEntry> CatalogValue<T> {
    /// Classify `name` against the catalog `T`.
    pub fn parse(name: &str) -> Self {
        match T::from_name(name) {
            Some(entry) => CatalogValue::Known(entry),
            None => CatalogValue::Unknown(name.to_owned()),
        }
    }

    /// The grouping key: the canonical name or the unknown literal.
    pub fn as_str(&self) -> &str {
        match self {
            CatalogValue::Known(entry) => entry.name(),
            CatalogValue::Unknown(name) => name,
        }
    }

    /// Whether the value is a member of the catalog.
    pub fn is_known(&self) -> bool {
        matches!(self, CatalogValue::Known(_))
    }

    /// The display color, if the value is a member of the catalog.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            CatalogValue::Known(entry) => Some(entry.color()),
            CatalogValue::Unknown(_) => None,
        }
    }
}

impl<T: CatalogEntry> Display for CatalogValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: CatalogEntry> Serialize for CatalogValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Display metadata for one catalog member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    /// The canonical name.
    pub name: &'static str,
    /// The hex display color.
    pub color: &'static str,
    /// The display icon.
    pub icon: &'static str,
}

/// Both catalogs, as served to the dashboard client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// The spending categories.
    pub categories: Vec<CatalogItem>,
    /// The payment methods.
    pub payment_methods: Vec<CatalogItem>,
}

fn items<T: CatalogEntry>() -> Vec<CatalogItem> {
    T::ALL
        .iter()
        .map(|entry| CatalogItem {
            name: entry.name(),
            color: entry.color(),
            icon: entry.icon(),
        })
        .collect()
}

/// List every category and payment method with its display metadata.
pub fn catalog() -> Catalog {
    Catalog {
        categories: items::<Category>(),
        payment_methods: items::<PaymentMethod>(),
    }
}
