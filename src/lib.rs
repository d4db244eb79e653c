//! Bookstore query runner
//!
//! Connects to MongoDB, runs a fixed sequence of CRUD queries, aggregation
//! pipelines, index creations and explain plans against the books
//! collection, and prints every result as a labeled table.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `connection`: Session open/close
//! - `error`: Error types and handling
//! - `executor`: Operation list, executors and runner
//! - `formatter`: Table output
//!
//! # Example
//!
//! ```no_run
//! use bookstore_queries::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let completed = bookstore_queries::run(&config, std::io::stdout()).await?;
//!     println!("{completed} operations completed");
//!     Ok(())
//! }
//! ```

use std::io::Write;

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod formatter;

// Re-export commonly used types
pub use config::Config;
pub use connection::Session;
pub use error::{BookstoreError, Result};
pub use executor::{Operation, OperationRunner, bookstore_operations};
pub use formatter::Reporter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

/// Open a session, run every bookstore operation, and close the session
///
/// The session is closed whether the operations succeed or fail, and
/// `Connection closed` is printed even when the connection could not be
/// opened. The first error is returned after that line.
///
/// # Arguments
/// * `config` - Effective configuration
/// * `out` - Sink for the report (stdout in the binary)
///
/// # Returns
/// * `Result<usize>` - Number of operations completed
pub async fn run<W: Write>(config: &Config, out: W) -> Result<usize> {
    let mut reporter = Reporter::new(out, &config.display);

    let outcome = match Session::open(&config.connection).await {
        Ok(session) => {
            let outcome = run_operations(&session, &mut reporter).await;
            session.close().await;
            outcome
        }
        Err(e) => Err(e),
    };

    let closed = reporter.note("\nConnection closed");

    let completed = outcome?;
    closed?;
    Ok(completed)
}

async fn run_operations<W: Write>(session: &Session, reporter: &mut Reporter<W>) -> Result<usize> {
    reporter.note("Successfully connected to MongoDB")?;

    let runner = OperationRunner::new(session.context());
    runner.run(&bookstore_operations(), reporter).await
}
