use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};

use spendboard::{
    AggregateResult, AggregationPolicy, Error, FilterCriteria, FilterQuery, Selector,
    Transaction, check_data_quality, compute_dashboard, format_currency, load_transactions,
    sample_transactions,
};

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    /// The dashboard data as pretty-printed JSON.
    #[default]
    Json,
    /// A plain-text summary with currency-formatted amounts.
    Summary,
}

/// Summarise spending from a file of transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to a JSON or CSV file of transactions.
    #[arg(long, required_unless_present = "sample", conflicts_with = "sample")]
    data: Option<PathBuf>,

    /// Use the built-in sample transactions.
    #[arg(long)]
    sample: bool,

    /// The earliest date to include, e.g. 2024-01-31.
    #[arg(long)]
    from: Option<String>,

    /// The latest date to include, e.g. 2024-12-31.
    #[arg(long)]
    to: Option<String>,

    /// Only include this category.
    #[arg(long, default_value = "all")]
    category: String,

    /// Only include this payment method.
    #[arg(long, default_value = "all")]
    payment_method: String,

    /// Only include "expense" or "income" transactions.
    #[arg(long = "type", default_value = "all")]
    transaction_type: String,

    /// Count income towards the total, average and largest transaction.
    #[arg(long)]
    include_income_in_total: bool,

    /// How to print the results.
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::ERROR)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let transactions = read_transactions(&args)?;

    let criteria = FilterCriteria::try_from(FilterQuery {
        date_start: args.from,
        date_end: args.to,
        payment_method: Selector::parse(&args.payment_method),
        category: Selector::parse(&args.category),
        transaction_type: Selector::parse(&args.transaction_type),
    })?;
    let policy = AggregationPolicy {
        include_income_in_total: args.include_income_in_total,
    };

    let result = compute_dashboard(&transactions, &criteria, policy);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Summary => print!("{}", render_summary(&criteria, &result)),
    }

    Ok(())
}

fn read_transactions(args: &Args) -> Result<Vec<Transaction>, Error> {
    let (transactions, report) = match &args.data {
        Some(path) => load_transactions(path)?,
        None => {
            let transactions = sample_transactions();
            let report = check_data_quality(&transactions);
            (transactions, report)
        }
    };

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    Ok(transactions)
}

fn render_summary(criteria: &FilterCriteria, result: &AggregateResult) -> String {
    let query = FilterQuery::from(criteria);
    let mut summary = format!(
        "Filters: from {} to {}, category {}, payment method {}, type {}\n\n",
        query.date_start.as_deref().unwrap_or("the start"),
        query.date_end.as_deref().unwrap_or("the end"),
        selector_label(&query.category),
        selector_label(&query.payment_method),
        selector_label(&query.transaction_type),
    );

    summary.push_str(&format!("Transactions:        {}\n", result.transaction_count));
    summary.push_str(&format!(
        "Total expense:       {}\n",
        format_currency(result.total_expense)
    ));
    summary.push_str(&format!(
        "Total income:        {}\n",
        format_currency(result.total_income)
    ));
    summary.push_str(&format!(
        "Average transaction: {}\n",
        format_currency(result.average_transaction)
    ));
    summary.push_str(&format!(
        "Largest transaction: {}\n",
        format_currency(result.largest_transaction)
    ));

    push_section(&mut summary, "By category", result.totals_by_category.iter());
    push_section(
        &mut summary,
        "By payment method",
        result.totals_by_payment_method.iter(),
    );

    summary.push_str("\nBy month\n");
    for (month, split) in result.totals_by_month.iter() {
        summary.push_str(&format!(
            "  {month:<20} expense {}, income {}\n",
            format_currency(split.expense),
            format_currency(split.income)
        ));
    }

    summary
}

fn push_section<'a>(
    summary: &mut String,
    title: &str,
    totals: impl Iterator<Item = (&'a str, &'a f64)>,
) {
    summary.push_str(&format!("\n{title}\n"));

    for (name, total) in totals {
        summary.push_str(&format!("  {name:<20} {}\n", format_currency(*total)));
    }
}

fn selector_label(selector: &Selector) -> &str {
    match selector {
        Selector::All => "all",
        Selector::Only(name) => name.as_str(),
    }
}
