use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

/// Failures raised by the session backend (Redis or memory).
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Backend(#[from] redis::RedisError),
    #[error("Corrupt session payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error returned by services and handlers.
///
/// Every variant is recoverable from the user's point of view: fix the input and
/// resubmit, or try again once the database or session backend is back. Nothing here is retried
/// automatically.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or missing user input; `field` names the offending form field.
    #[error("{message}")]
    Validation { field: String, message: String },
    /// The document database could not be reached.
    #[error("Database unreachable: {0}")]
    Connection(String),
    /// The store rejected the write.
    #[error("Failed to save the record: {0}")]
    Persistence(String),
    /// Missing, malformed or expired session.
    #[error("{0}")]
    Session(String),
    /// The session backend (Redis) could not be reached.
    #[error("Session store unavailable: {0}")]
    SessionBackend(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Form field responsible for the error, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Session(_) => StatusCode::UNAUTHORIZED,
            Self::Connection(_) | Self::SessionBackend(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Connection(msg) => Self::Connection(msg),
            StoreError::Persistence(msg) => Self::Persistence(msg),
            StoreError::Serialization(e) => Self::Persistence(e.to_string()),
        }
    }
}

impl From<SessionStoreError> for AppError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::Backend(e) => Self::SessionBackend(e.to_string()),
            SessionStoreError::Decode(e) => {
                tracing::warn!("Discarding unreadable session payload: {e}");
                Self::Session("Session data could not be read. Start a new session.".into())
            }
        }
    }
}

/// Malformed request bodies become validation errors naming the offending field.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => {
                let (field, detail) = split_serde_path(&text);
                Self::validation(field, format!("Invalid value for {field}: {detail}"))
            }
            JsonRejection::MissingJsonContentType(_) => {
                Self::validation("body", "Expected a JSON body (Content-Type: application/json).")
            }
            _ => Self::validation("body", format!("Malformed JSON body: {text}")),
        }
    }
}

/// Split axum's "…target type: <path>: <message>" text into field and message.
/// Root-level errors carry no path; a missing field is named from the message.
fn split_serde_path(text: &str) -> (&str, &str) {
    let detail = text
        .split_once("target type: ")
        .map_or(text, |(_, rest)| rest);
    let detail = detail
        .rsplit_once(" at line ")
        .map_or(detail, |(msg, _)| msg);

    if let Some((path, message)) = detail.split_once(": ") {
        if !path.is_empty() && !path.contains(char::is_whitespace) {
            return (path, message);
        }
    }
    if let Some(name) = detail
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split_once('`'))
        .map(|(name, _)| name)
    {
        return (name, detail);
    }
    ("body", detail)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation { field, message } => json!({ "error": message, "field": field }),
            Self::Connection(_) => {
                tracing::error!("{}", self);
                json!({ "error": "Unable to reach the database. Please try again later." })
            }
            Self::Persistence(_) => {
                tracing::error!("{}", self);
                json!({ "error": "Failed to save your entry. Please try again." })
            }
            Self::Session(message) => json!({ "error": message }),
            Self::SessionBackend(_) => {
                tracing::error!("{}", self);
                json!({ "error": "Session storage is unavailable. Please try again later." })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_carries_field() {
        let err = AppError::validation("meal_elements[0].food_product", "Food element cannot be empty.");
        assert_eq!(err.field(), Some("meal_elements[0].food_product"));
        assert_eq!(err.to_string(), "Food element cannot be empty.");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn store_errors_map_onto_taxonomy() {
        let conn: AppError = StoreError::Connection("timeout".into()).into();
        assert!(conn.is_connection());
        assert_eq!(conn.status(), StatusCode::SERVICE_UNAVAILABLE);

        let write: AppError = StoreError::Persistence("duplicate key".into()).into();
        assert!(matches!(write, AppError::Persistence(_)));
        assert_eq!(write.field(), None);
    }

    #[test]
    fn session_failures_are_not_reported_as_database_outages() {
        let backend: AppError = SessionStoreError::Backend(redis::RedisError::from((
            redis::ErrorKind::IoError,
            "connection refused",
        )))
        .into();
        assert!(matches!(backend, AppError::SessionBackend(_)));
        assert!(!backend.is_connection());
        assert_eq!(backend.status(), StatusCode::SERVICE_UNAVAILABLE);

        let decode_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let corrupt: AppError = SessionStoreError::Decode(decode_err).into();
        assert!(matches!(corrupt, AppError::Session(_)));
        assert_eq!(corrupt.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn serde_paths_name_the_field() {
        assert_eq!(
            split_serde_path(
                "Failed to deserialize the JSON body into the target type: weight_before: \
                 invalid type: string \"72.5\", expected f64 at line 1 column 40"
            ),
            ("weight_before", "invalid type: string \"72.5\", expected f64")
        );
        assert_eq!(
            split_serde_path(
                "Failed to deserialize the JSON body into the target type: meal_elements[0].amount: \
                 invalid type: string \"lots\", expected f64 at line 1 column 90"
            )
            .0,
            "meal_elements[0].amount"
        );
        assert_eq!(
            split_serde_path(
                "Failed to deserialize the JSON body into the target type: missing field `player` at line 1 column 2"
            ),
            ("player", "missing field `player`")
        );
        assert_eq!(split_serde_path("something else entirely").0, "body");
    }
}
