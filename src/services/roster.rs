use crate::{db::DocumentStore, error::AppError};

pub struct RosterService;

impl RosterService {
    /// All player identifiers of the roster collection, in storage order.
    pub async fn list(store: &dyn DocumentStore, collection: &str) -> Result<Vec<String>, AppError> {
        let documents = store.find_all(collection).await?;

        let mut players = Vec::with_capacity(documents.len());
        for document in documents {
            match document.get_str("player_id") {
                Ok(player_id) => players.push(player_id.to_string()),
                Err(_) => tracing::warn!(
                    collection,
                    "Skipping roster document without a string player_id"
                ),
            }
        }
        Ok(players)
    }

    pub async fn contains(
        store: &dyn DocumentStore,
        collection: &str,
        player_id: &str,
    ) -> Result<bool, AppError> {
        Ok(Self::list(store, collection)
            .await?
            .iter()
            .any(|p| p == player_id))
    }

    /// Fails with a `player_id` validation error for unknown players.
    pub async fn ensure_listed(
        store: &dyn DocumentStore,
        collection: &str,
        player_id: &str,
    ) -> Result<(), AppError> {
        if Self::contains(store, collection, player_id).await? {
            Ok(())
        } else {
            Err(AppError::validation(
                "player_id",
                format!("Unknown player ID: {player_id}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;

    use super::*;
    use crate::db::MemoryStore;

    #[tokio::test]
    async fn empty_roster_is_not_an_error() {
        let store = MemoryStore::new();
        let players = RosterService::list(&store, "roster").await.unwrap();
        assert!(players.is_empty());
    }

    #[tokio::test]
    async fn keeps_storage_order_and_skips_malformed_documents() {
        let store = MemoryStore::new();
        store
            .seed(
                "roster",
                [
                    doc! { "player_id": "P002" },
                    doc! { "name": "no id" },
                    doc! { "player_id": 17 },
                    doc! { "player_id": "P001" },
                ],
            )
            .await;

        let players = RosterService::list(&store, "roster").await.unwrap();
        assert_eq!(players, vec!["P002", "P001"]);
    }

    #[tokio::test]
    async fn unreachable_store_is_a_connection_error() {
        let store = MemoryStore::new();
        store.set_offline(true);

        let err = RosterService::list(&store, "roster").await.unwrap_err();
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn ensure_listed_rejects_unknown_players() {
        let store = MemoryStore::new();
        store.seed("roster", [doc! { "player_id": "P001" }]).await;

        assert!(RosterService::ensure_listed(&store, "roster", "P001").await.is_ok());
        let err = RosterService::ensure_listed(&store, "roster", "P999")
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some("player_id"));
    }
}
