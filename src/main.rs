//! bookstore-queries
//!
//! Runs the bookstore CRUD, aggregation and index diagnostics against
//! MongoDB and prints each result as a table.
//!
//! # Usage
//!
//! ```bash
//! bookstore-queries --uri mongodb://localhost:27017 --database plp_bookstore
//! ```

use tracing::{Level, error, info};

use bookstore_queries::cli::CliInterface;

/// Application entry point
#[tokio::main]
async fn main() {
    let cli = match CliInterface::new() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    initialize_logging(&cli);

    if let Some(path) = cli.config_path() {
        info!("Loaded configuration from {}", path.display());
    }

    // Failures are logged, not turned into an exit status
    match bookstore_queries::run(cli.config(), std::io::stdout()).await {
        Ok(completed) => info!("Run finished after {} operations", completed),
        Err(e) => error!("Error: {}", e),
    }
}

/// Initialize logging system based on verbosity level
///
/// # Arguments
/// * `cli` - CLI interface with verbosity settings
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    // Logs go to stderr so they never interleave with the tables
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
