use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tokio::{sync::RwLock, time::Instant};
use uuid::Uuid;

use crate::{
    db::DocumentStore,
    error::{AppError, SessionStoreError},
    models::{
        meal::{MealElement, MealElementInput},
        session::SessionContext,
    },
    services::{roster::RosterService, validation},
};

/// Default lifetime of an idle session (12 hours).
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Persistence for session contexts. Each save refreshes the expiry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<SessionContext>, SessionStoreError>;
    async fn save(&self, session: &SessionContext) -> Result<(), SessionStoreError>;
    async fn remove(&self, id: Uuid) -> Result<(), SessionStoreError>;
    async fn ping(&self) -> Result<(), SessionStoreError>;
}

fn session_key(id: Uuid) -> String {
    format!("athlete_diary:session:{id}")
}

/// Sessions kept in Redis as JSON under a TTL (SETEX).
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection, ttl_seconds: u64) -> Self {
        Self { conn, ttl_seconds }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SessionContext>, SessionStoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = redis::cmd("GET")
            .arg(session_key(id))
            .query_async(&mut conn)
            .await?;
        Ok(raw.map(|r| serde_json::from_str(&r)).transpose()?)
    }

    async fn save(&self, session: &SessionContext) -> Result<(), SessionStoreError> {
        let payload = serde_json::to_string(session)?;
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("SETEX")
            .arg(session_key(session.id))
            .arg(self.ttl_seconds)
            .arg(payload)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("DEL")
            .arg(session_key(id))
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

/// Process-local sessions, for tests and single-instance development runs.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, (SessionContext, Instant)>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SessionContext>, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&id) {
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                sessions.remove(&id);
                Ok(None)
            }
            Some((session, _)) => Ok(Some(session.clone())),
            None => Ok(None),
        }
    }

    /// Expired sessions are swept on every save, so abandoned ones do not pile up.
    async fn save(&self, session: &SessionContext) -> Result<(), SessionStoreError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, (_, expires_at)| *expires_at > now);
        sessions.insert(session.id, (session.clone(), now + self.ttl));
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), SessionStoreError> {
        Ok(())
    }
}

pub struct SessionService;

impl SessionService {
    pub async fn start(sessions: &dyn SessionStore) -> Result<SessionContext, AppError> {
        let session = SessionContext::new();
        sessions.save(&session).await?;
        tracing::info!(session_id = %session.id, "Session started");
        Ok(session)
    }

    /// Select a player for the rest of the session. The player must be on the roster.
    pub async fn select_player(
        store: &dyn DocumentStore,
        roster_collection: &str,
        sessions: &dyn SessionStore,
        session: &mut SessionContext,
        player_id: Option<&str>,
    ) -> Result<(), AppError> {
        let player_id =
            validation::required_text("player_id", player_id, "Select your player ID.")?;
        RosterService::ensure_listed(store, roster_collection, &player_id).await?;

        session.select_player(player_id);
        sessions.save(session).await?;
        Ok(())
    }

    /// Validate one meal element and queue it for the next meal submission.
    pub async fn add_pending_element(
        sessions: &dyn SessionStore,
        session: &mut SessionContext,
        input: &MealElementInput,
    ) -> Result<MealElement, AppError> {
        let element = validation::meal_element("", input)?;
        session.push_pending(element.clone());
        sessions.save(session).await?;
        Ok(element)
    }

    pub async fn clear_pending_elements(
        sessions: &dyn SessionStore,
        session: &mut SessionContext,
    ) -> Result<(), AppError> {
        session.clear_pending();
        sessions.save(session).await?;
        Ok(())
    }

    /// Save the session after a record was written. The record is already
    /// stored, so a failing session backend is only logged.
    pub async fn remember(sessions: &dyn SessionStore, session: &SessionContext) {
        if let Err(e) = sessions.save(session).await {
            tracing::warn!(session_id = %session.id, "Failed to save session after submission: {e}");
        }
    }

    pub async fn end(sessions: &dyn SessionStore, id: Uuid) -> Result<(), AppError> {
        sessions.remove(id).await?;
        tracing::info!(session_id = %id, "Session ended");
        Ok(())
    }
}
