//! A deterministic sample data set for trying out the dashboard.

use time::{Date, Month, macros::date};

use crate::{
    catalog::{CatalogEntry, CatalogValue, Category, PaymentMethod},
    transaction::{Transaction, TransactionType},
};

const LOCATIONS: [&str; 5] = ["Mumbai", "Delhi", "Bangalore", "Chennai", "Kolkata"];

/// The number of generated transactions that follow the two fixed ones.
const GENERATED_COUNT: usize = 48;

fn expense(
    id: String,
    date: Date,
    payment_method: PaymentMethod,
    category: Category,
    amount: f64,
    merchant: String,
    location: &str,
) -> Transaction {
    Transaction {
        id,
        date,
        amount,
        transaction_type: TransactionType::Expense,
        category: CatalogValue::Known(category),
        payment_method: Some(CatalogValue::Known(payment_method)),
        description: None,
        merchant: Some(merchant),
        location: Some(location.to_owned()),
    }
}

/// Fifty expenses spread over March to August 2023, cycling through every
/// payment method, category and location.
///
/// Amounts are between 500 and 20,499 and are the same on every call.
pub fn sample_transactions() -> Vec<Transaction> {
    let mut transactions = vec![
        expense(
            "1".to_owned(),
            date!(2023 - 03 - 01),
            PaymentMethod::PhonePe,
            Category::Shopping,
            4500.0,
            "Myntra".to_owned(),
            "Mumbai",
        ),
        expense(
            "2".to_owned(),
            date!(2023 - 03 - 02),
            PaymentMethod::Cred,
            Category::Bills,
            12000.0,
            "Electricity Board".to_owned(),
            "Delhi",
        ),
    ];

    let generated = (0..GENERATED_COUNT).filter_map(|i| {
        let month = Month::March.nth_next((i / 8) as u8);
        let day = (i % 8 + 1) as u8;
        let date = Date::from_calendar_date(2023, month, day).ok()?;
        let amount = 500 + (i * 7919) % 20000;

        Some(expense(
            (i + 3).to_string(),
            date,
            PaymentMethod::ALL[i % PaymentMethod::ALL.len()],
            Category::ALL[i % Category::ALL.len()],
            amount as f64,
            format!("Merchant {}", i + 1),
            LOCATIONS[i % LOCATIONS.len()],
        ))
    });
    transactions.extend(generated);

    transactions
}
