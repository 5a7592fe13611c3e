use std::{sync::Arc, time::Duration};

use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use athlete_diary_api::{
    config::{Config, SessionBackend},
    db,
    middleware::session::SESSION_HEADER,
    routes,
    services::session::{MemorySessionStore, RedisSessionStore, SessionStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store = db::connect(&config).await?;

    let sessions: Arc<dyn SessionStore> = match config.session_backend {
        SessionBackend::Redis => {
            let client = redis::Client::open(config.redis_url.as_str())?;
            let conn = client.get_multiplexed_async_connection().await?;
            info!("Redis connected");
            Arc::new(RedisSessionStore::new(conn, config.session_ttl_seconds))
        }
        SessionBackend::Memory => {
            info!("Sessions kept in memory");
            Arc::new(MemorySessionStore::new(Duration::from_secs(
                config.session_ttl_seconds,
            )))
        }
    };

    let state = AppState {
        store,
        sessions,
        collections: Arc::new(config.collections.clone()),
    };

    // Allow the configured front-end origin; localhost is always allowed for development.
    let base_url = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") || o == base_url
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-session-id"),
        ]))
        .expose_headers([HeaderName::from_static("x-session-id")])
        .allow_origin(cors_origin);

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Athlete diary API listening on {} (session header: {})", addr, SESSION_HEADER);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
