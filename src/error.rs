//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transaction record could not be turned into a valid transaction.
    ///
    /// `id` identifies the offending record. When the record has no usable
    /// ID, it holds the record's position in the input instead, e.g. "#3".
    #[error("malformed transaction {id}: {reason}")]
    MalformedTransaction {
        /// The ID (or input position) of the offending record.
        id: String,
        /// What is wrong with the record.
        reason: String,
    },

    /// The amounts of a batch of transactions are too large to be totalled
    /// as finite numbers.
    #[error("the {0} transaction amounts add up to more than can be represented")]
    TotalOverflow(usize),

    /// The filter criteria could not be parsed, e.g. a date that is not an
    /// ISO-8601 calendar date.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// A data file has an extension that is neither `.json` nor `.csv`.
    #[error("unsupported data file \"{0}\", expected a .json or .csv file")]
    UnsupportedFileType(String),

    /// A data file could not be read.
    #[error("could not read data file: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be parsed.
    #[error("could not parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSV document could not be parsed.
    #[error("could not parse the CSV file: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Build a [Error::MalformedTransaction] for the record `id`.
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedTransaction {
            id: id.into(),
            reason: reason.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        match &self {
            Error::InvalidFilter(_) => tracing::debug!("rejected dashboard query: {self}"),
            Error::MalformedTransaction { .. } => tracing::warn!("{self}"),
            _ => tracing::error!("An unexpected error occurred: {self}"),
        }

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
