// Library exports for the binary and tests
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use config::CollectionNames;
use db::DocumentStore;
use services::session::SessionStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub collections: Arc<CollectionNames>,
}
