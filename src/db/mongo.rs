use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    error::{Error as MongoError, ErrorKind},
    options::ClientOptions,
    Client, Database,
};

use super::{DocumentStore, StoreError};

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// MongoDB-backed store. The wrapped client pools its own connections and is
/// shared for the lifetime of the process.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await.map_err(classify)?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        options.app_name = Some("athlete-diary-api".into());

        let client = Client::with_options(options).map_err(classify)?;
        Ok(Self {
            db: client.database(database_name),
        })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let result = self
            .db
            .collection::<Document>(collection)
            .insert_one(document)
            .await
            .map_err(classify)?;

        Ok(match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        })
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(doc! {})
            .await
            .map_err(classify)?;
        cursor.try_collect::<Vec<Document>>().await.map_err(classify)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(classify)
    }
}

fn classify(err: MongoError) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::Authentication { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => StoreError::Connection(err.to_string()),
        _ => StoreError::Persistence(err.to_string()),
    }
}
