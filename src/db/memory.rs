use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError};

/// In-process document store for tests and local runs.
///
/// `set_offline` and `set_reject_writes` make it fail the way an unreachable
/// server or a refused write would.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    offline: AtomicBool,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append documents to a collection, bypassing the failure switches.
    pub async fn seed(&self, collection: &str, documents: impl IntoIterator<Item = Document>) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
    }

    pub async fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, mut document: Document) -> Result<String, StoreError> {
        self.check_online()?;
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Persistence(format!(
                "write to {collection} rejected"
            )));
        }

        let id = match document.get_object_id("_id") {
            Ok(oid) => oid,
            Err(_) => {
                let oid = ObjectId::new();
                document.insert("_id", oid);
                oid
            }
        };

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id.to_hex())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.check_online()?;
        Ok(self.documents(collection).await)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}
