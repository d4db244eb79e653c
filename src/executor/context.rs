//! Execution context
//!
//! The database and collection handles every operation runs against. A
//! context is produced by [`crate::connection::Session::context`] and passed
//! explicitly to the executors; there is no global connection state.

use mongodb::bson::Document;
use mongodb::{Collection, Database};

/// Handles shared by all operations of one run
#[derive(Clone)]
pub struct ExecutionContext {
    /// Target database
    database: Database,

    /// Target collection
    collection: Collection<Document>,
}

impl ExecutionContext {
    /// Create a new execution context
    ///
    /// # Arguments
    /// * `database` - Database handle
    /// * `collection` - Collection name inside `database`
    pub fn new(database: Database, collection: &str) -> Self {
        let collection = database.collection::<Document>(collection);
        Self {
            database,
            collection,
        }
    }

    /// Database handle, used for `runCommand` (explain)
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Collection handle
    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }

    /// Collection name
    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }
}
