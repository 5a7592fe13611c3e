use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{error::AppError, models::session::SessionContext, AppState};

pub const SESSION_HEADER: &str = "X-Session-Id";

/// The caller's session, loaded from the `X-Session-Id` header.
#[derive(Debug, Clone)]
pub struct ActiveSession(pub SessionContext);

impl FromRequestParts<AppState> for ActiveSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Session("Missing X-Session-Id header".into()))?;

        let id = Uuid::parse_str(raw)
            .map_err(|_| AppError::Session("Invalid session identifier".into()))?;

        state
            .sessions
            .load(id)
            .await?
            .map(ActiveSession)
            .ok_or_else(|| AppError::Session("Session expired or not found".into()))
    }
}
