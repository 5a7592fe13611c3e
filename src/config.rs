use std::env;

/// Where diary records and the roster are read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

/// Where session contexts are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Redis,
    Memory,
}

impl StorageBackend {
    /// Unset means MongoDB.
    pub fn parse(value: Option<&str>) -> anyhow::Result<Self> {
        match value {
            None | Some("mongo") => Ok(Self::Mongo),
            Some("memory") => Ok(Self::Memory),
            Some(other) => anyhow::bail!("Unsupported STORAGE_BACKEND: {}", other),
        }
    }
}

impl SessionBackend {
    /// Unset means Redis.
    pub fn parse(value: Option<&str>) -> anyhow::Result<Self> {
        match value {
            None | Some("redis") => Ok(Self::Redis),
            Some("memory") => Ok(Self::Memory),
            Some(other) => anyhow::bail!("Unsupported SESSION_BACKEND: {}", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollectionNames {
    pub roster: String,
    pub meal_diary_entries: String,
    pub weight_registration: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            roster: "roster".into(),
            meal_diary_entries: "meal_diary_entries".into(),
            weight_registration: "weight_registration".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub session_backend: SessionBackend,
    // MongoDB (only read when storage_backend is Mongo)
    pub mongo_uri: Option<String>,
    pub database_name: String,
    pub collections: CollectionNames,
    pub redis_url: String,
    pub session_ttl_seconds: u64,
    pub host: String,
    pub port: u16,
    pub app_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let storage_backend = StorageBackend::parse(env::var("STORAGE_BACKEND").ok().as_deref())?;
        let session_backend = SessionBackend::parse(env::var("SESSION_BACKEND").ok().as_deref())?;

        let (mongo_uri, database_name) = if storage_backend == StorageBackend::Mongo {
            (Some(mongo_uri()?), required("DATABASE_NAME")?)
        } else {
            (
                None,
                env::var("DATABASE_NAME").unwrap_or_else(|_| "athlete_diary".into()),
            )
        };

        let defaults = CollectionNames::default();

        Ok(Self {
            storage_backend,
            session_backend,
            mongo_uri,
            database_name,
            collections: CollectionNames {
                roster: env::var("ROSTER_COLLECTION").unwrap_or(defaults.roster),
                meal_diary_entries: env::var("MEAL_COLLECTION")
                    .unwrap_or(defaults.meal_diary_entries),
                weight_registration: env::var("WEIGHT_COLLECTION")
                    .unwrap_or(defaults.weight_registration),
            },
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into()),
            session_ttl_seconds: env::var("SESSION_TTL_SECONDS")
                .unwrap_or_else(|_| "43200".into())
                .parse()?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost".into()),
        })
    }
}

/// `MONGO_URI` wins; otherwise the Atlas SRV string is assembled from its parts.
fn mongo_uri() -> anyhow::Result<String> {
    if let Some(uri) = env::var("MONGO_URI").ok().filter(|s| !s.is_empty()) {
        return Ok(uri);
    }
    let username = required("MONGO_USERNAME")?;
    let password = required("MONGO_PASSWORD")?;
    let cluster_url = required("MONGO_CLUSTER_URL")?;
    Ok(srv_connection_string(&username, &password, &cluster_url))
}

pub fn srv_connection_string(username: &str, password: &str, cluster_url: &str) -> String {
    format!("mongodb+srv://{username}:{password}@{cluster_url}/")
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required env var: {}", key))
}
