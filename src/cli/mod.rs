//! Command-line interface for bookstore-queries
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading, overrides and validation

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;

/// Run a fixed series of queries, aggregations and index diagnostics
/// against a MongoDB books collection
#[derive(Parser, Debug)]
#[command(
    name = "bookstore-queries",
    version,
    about = "Run bookstore CRUD, aggregation and index diagnostics against MongoDB",
    long_about = "Connects to MongoDB, runs a fixed sequence of queries, updates, \
aggregations, index creations and explain plans against the books collection, \
and prints each result as a table."
)]
pub struct CliArgs {
    /// MongoDB connection URI
    ///
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    #[arg(long, value_name = "URI")]
    pub uri: Option<String>,

    /// Database name
    #[arg(long, value_name = "NAME")]
    pub database: Option<String>,

    /// Collection name
    #[arg(long, value_name = "NAME")]
    pub collection: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Show execution time and document counts under each table
    #[arg(long)]
    pub timing: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Effective configuration
    config: Config,
}

impl CliInterface {
    /// Parse process arguments and load configuration
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Build from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;
        Self::apply_overrides(&mut config, args);
        config.validate()?;
        Ok(config)
    }

    /// Command-line values take precedence over the file
    fn apply_overrides(config: &mut Config, args: &CliArgs) {
        if let Some(uri) = &args.uri {
            config.connection.uri = uri.clone();
        }
        if let Some(database) = &args.database {
            config.connection.database = database.clone();
        }
        if let Some(collection) = &args.collection {
            config.connection.collection = collection.clone();
        }
        if args.no_color {
            config.display.color_output = false;
        }
        if args.timing {
            config.display.show_timing = true;
        }
    }

    /// Parsed arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Configuration file given on the command line
    pub fn config_path(&self) -> Option<&Path> {
        self.args.config_file.as_deref()
    }
}
