pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::Document;
use thiserror::Error;

use crate::config::{Config, StorageBackend};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Network, DNS, server selection or authentication failure.
    #[error("{0}")]
    Connection(String),
    /// The server answered but refused the operation.
    #[error("{0}")]
    Persistence(String),
    #[error(transparent)]
    Serialization(#[from] mongodb::bson::ser::Error),
}

/// Access to the document database, one attempt per call.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document and return its generated identifier.
    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError>;

    /// Every document of a collection, in storage order.
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Build the process-wide store selected by the configuration.
///
/// An unreachable MongoDB server is not fatal: the client is kept and every
/// request reports the outage until the server comes back.
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory document store, records are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Mongo => {
            let uri = config
                .mongo_uri
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("MongoDB connection string is not configured"))?;
            let store = MongoStore::connect(uri, &config.database_name).await?;
            match store.ping().await {
                Ok(()) => tracing::info!("Connected to MongoDB database {}", config.database_name),
                Err(e) => tracing::warn!("MongoDB not reachable at startup: {e}"),
            }
            Ok(Arc::new(store))
        }
    }
}
