use std::{fmt, io};

use crate::error::mongo::extract_error_info;

/// Crate-wide `Result` type using [`BookstoreError`] as the error.
pub type Result<T> = std::result::Result<T, BookstoreError>;

/// Top-level error type for a bookstore query run.
#[derive(Debug)]
pub enum BookstoreError {
    /// Could not reach or authenticate to the store.
    Connection(ConnectionError),

    /// A query, write, aggregation, index or explain call was rejected.
    Operation(OperationError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors (writing the report).
    Io(io::Error),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// The connection URI could not be parsed.
    InvalidUri(String),

    /// Failed to build a client for the endpoint.
    ConnectionFailed(String),

    /// The server did not answer the initial ping.
    PingFailed(String),
}

/// Errors raised by the store for one named operation.
#[derive(Debug)]
pub enum OperationError {
    /// `find` was rejected.
    QueryFailed { label: String, reason: String },

    /// `updateOne` was rejected.
    UpdateFailed { label: String, reason: String },

    /// `deleteOne` was rejected.
    DeleteFailed { label: String, reason: String },

    /// `aggregate` was rejected.
    AggregateFailed { label: String, reason: String },

    /// `createIndex` was rejected, typically a conflicting index definition.
    IndexFailed { label: String, reason: String },

    /// `explain` was rejected or returned a plan without a winning stage.
    ExplainFailed { label: String, reason: String },

    /// Reading a result cursor failed part way through.
    CursorFailed { label: String, reason: String },
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Render a driver error through [`extract_error_info`].
pub(crate) fn describe(err: &mongodb::error::Error) -> String {
    let info = extract_error_info(err);
    if let Ok(json) = info.to_json_compact() {
        tracing::debug!("Driver error: {}", json);
    }
    info.summary()
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for BookstoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookstoreError::Connection(e) => write!(f, "Connection error: {e}"),
            BookstoreError::Operation(e) => write!(f, "Operation error: {e}"),
            BookstoreError::Config(e) => write!(f, "Configuration error: {e}"),
            BookstoreError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::InvalidUri(msg) => write!(f, "Invalid connection URI: {msg}"),
            ConnectionError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::PingFailed(msg) => write!(f, "Ping failed: {msg}"),
        }
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationError::QueryFailed { label, reason } => {
                write!(f, "Query '{label}' failed: {reason}")
            }
            OperationError::UpdateFailed { label, reason } => {
                write!(f, "Update '{label}' failed: {reason}")
            }
            OperationError::DeleteFailed { label, reason } => {
                write!(f, "Delete '{label}' failed: {reason}")
            }
            OperationError::AggregateFailed { label, reason } => {
                write!(f, "Aggregation '{label}' failed: {reason}")
            }
            OperationError::IndexFailed { label, reason } => {
                write!(f, "Index creation '{label}' failed: {reason}")
            }
            OperationError::ExplainFailed { label, reason } => {
                write!(f, "Explain '{label}' failed: {reason}")
            }
            OperationError::CursorFailed { label, reason } => {
                write!(f, "Reading results of '{label}' failed: {reason}")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for BookstoreError {}
impl std::error::Error for ConnectionError {}
impl std::error::Error for OperationError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to BookstoreError ========================= */

impl From<io::Error> for BookstoreError {
    fn from(err: io::Error) -> Self {
        BookstoreError::Io(err)
    }
}

impl From<ConnectionError> for BookstoreError {
    fn from(err: ConnectionError) -> Self {
        BookstoreError::Connection(err)
    }
}

impl From<OperationError> for BookstoreError {
    fn from(err: OperationError) -> Self {
        BookstoreError::Operation(err)
    }
}

impl From<ConfigError> for BookstoreError {
    fn from(err: ConfigError) -> Self {
        BookstoreError::Config(err)
    }
}
