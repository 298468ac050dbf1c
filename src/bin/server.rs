use std::{
    fs::OpenOptions,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use spendboard::{
    AggregationPolicy, AppState, build_router, graceful_shutdown, load_transactions,
    logging_middleware, sample_transactions,
};

/// The REST API server for the spending dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to a JSON or CSV file of transactions. The sample data set
    /// is served if this is not given.
    #[arg(long)]
    data: Option<PathBuf>,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// File path to write debug logs to.
    #[arg(long)]
    log_path: Option<PathBuf>,

    /// Count income towards the total, average and largest transaction.
    #[arg(long)]
    include_income_in_total: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(args.log_path.as_deref());

    let transactions = match &args.data {
        Some(path) => match load_transactions(path) {
            Ok((transactions, report)) => {
                tracing::info!(
                    "Loaded {} transactions from {} with {} data quality warnings",
                    transactions.len(),
                    path.display(),
                    report.warnings.len()
                );
                transactions
            }
            Err(error) => {
                tracing::error!("Could not load transactions from {}: {error}", path.display());
                std::process::exit(1);
            }
        },
        None => {
            tracing::info!("No data file given, serving the sample transactions");
            sample_transactions()
        }
    };

    let policy = AggregationPolicy {
        include_income_in_total: args.include_income_in_total,
    };
    let app_state = AppState::new(transactions, policy);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(app_state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        std::process::exit(1);
    }
}

fn setup_logging(log_path: Option<&Path>) {
    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let debug_log = log_path.map(|path| {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("Could not create log file");

        tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(Arc::new(log_file))
            .with_filter(filter::LevelFilter::DEBUG)
    });

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
