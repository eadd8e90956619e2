//! Error types for the MongoDB store.

use thiserror::Error;

/// Errors that can occur while setting up a MongoDB store.
#[derive(Error, Debug)]
pub enum MongoStoreError {
    /// MongoDB connection or query error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
