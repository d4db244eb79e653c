//! Connection management for MongoDB
//!
//! A [`Session`] owns the single client used for the whole run:
//! - opened once before the first operation (URI parse, client build, ping)
//! - handed out to operations as an [`ExecutionContext`]
//! - closed by value, so it can be released only once

use mongodb::bson::doc;
use mongodb::{Client, Database, options::ClientOptions};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::kinds::describe;
use crate::error::{ConnectionError, Result};
use crate::executor::ExecutionContext;

/// Application name reported to the server
const APP_NAME: &str = "bookstore-queries";

/// An open connection to the bookstore database
pub struct Session {
    /// MongoDB client instance
    client: Client,

    /// Target database handle
    database: Database,

    /// Target collection name
    collection: String,
}

impl Session {
    /// Establish a connection and verify the server answers
    ///
    /// # Arguments
    /// * `config` - Connection configuration
    ///
    /// # Returns
    /// * `Result<Session>` - Open session or a connection error
    pub async fn open(config: &ConnectionConfig) -> Result<Self> {
        let options = Self::parse_uri(&config.uri).await?;
        let options = Self::configure(options, config.timeout_duration());

        let client = Client::with_options(options)
            .map_err(|e| ConnectionError::ConnectionFailed(describe(&e)))?;
        let database = client.database(&config.database);

        debug!("Pinging database '{}'", config.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ConnectionError::PingFailed(describe(&e)))?;

        info!(
            "Connected to '{}' (database '{}', collection '{}')",
            config.uri, config.database, config.collection
        );

        Ok(Self {
            client,
            database,
            collection: config.collection.clone(),
        })
    }

    /// Handles threaded through every operation
    pub fn context(&self) -> ExecutionContext {
        ExecutionContext::new(self.database.clone(), &self.collection)
    }

    /// Release the connection
    ///
    /// Consumes the session; the driver waits for in-flight operations and
    /// closes its pooled connections.
    pub async fn close(self) {
        debug!("Shutting down MongoDB client");
        self.client.shutdown().await;
        info!("Connection closed");
    }

    /// Parse connection URI and create client options
    async fn parse_uri(uri: &str) -> Result<ClientOptions> {
        ClientOptions::parse(uri)
            .await
            .map_err(|e| ConnectionError::InvalidUri(describe(&e)).into())
    }

    /// Apply timeouts and the application name
    fn configure(mut options: ClientOptions, timeout: Duration) -> ClientOptions {
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        options
    }
}
