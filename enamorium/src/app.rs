use actix_cors::Cors;
use actix_session::config::PersistentSession;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::{cookie, http};
use scylla::client::caching_session::CachingSession;
use serde::Deserialize;
use std::sync::Arc;
use std::{env, fs};

use crate::clients::Client;
use crate::errors::EnamoriumError;
use crate::store::{MemoryStore, ScyllaStore, Store};
use crate::utils::logger::log_warning;

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Scylla,
    Memory,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScyllaConfig {
    pub hosts: Vec<String>,
    pub keyspace: String,

    /// Create keyspace and tables on startup.
    #[serde(default)]
    pub migrate: bool,

    #[serde(default = "default_replication_factor")]
    pub replication_factor: u8,

    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
}

const MAX_SESSION_EXPIRATION_IN_DAYS: i64 = 3650;

fn default_replication_factor() -> u8 {
    1
}

fn default_connection_timeout_secs() -> u64 {
    3
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub port: u16,
    pub allowed_origin: String,
    pub secret_key: String,
    pub session_expiration_in_days: i64,

    #[serde(default)]
    pub cookie_secure: bool,

    #[serde(default)]
    pub store: StoreKind,

    pub scylla: Option<ScyllaConfig>,
}

impl Config {
    /// Reads `config.{ENV}.toml` from the working directory. `ENV` defaults to `development`.
    pub fn load() -> Result<Self, EnamoriumError> {
        dotenv::dotenv().ok();

        let env = env::var("ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config.{}.toml", env);

        let contents = fs::read_to_string(&config_file)
            .map_err(|e| EnamoriumError::ConfigError(format!("Unable to read {}: {}", config_file, e)))?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, EnamoriumError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), EnamoriumError> {
        if self.secret_key.len() < 64 {
            return Err(EnamoriumError::ConfigError(
                "secret_key must be at least 64 bytes".to_string(),
            ));
        }

        if !(1..=MAX_SESSION_EXPIRATION_IN_DAYS).contains(&self.session_expiration_in_days) {
            return Err(EnamoriumError::ConfigError(format!(
                "session_expiration_in_days must be between 1 and {}",
                MAX_SESSION_EXPIRATION_IN_DAYS
            )));
        }

        if self.store == StoreKind::Scylla {
            let scylla = self.scylla.as_ref().ok_or_else(|| {
                EnamoriumError::ConfigError("[scylla] is required when store = \"scylla\"".to_string())
            })?;

            let valid_keyspace = !scylla.keyspace.is_empty()
                && scylla
                    .keyspace
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_');

            if !valid_keyspace {
                return Err(EnamoriumError::ConfigError(format!(
                    "Invalid scylla keyspace: {:?}",
                    scylla.keyspace
                )));
            }
        }

        Ok(())
    }
}

#[derive(Clone)]
pub struct App {
    pub config: Config,
    pub store: Arc<dyn Store>,
    secret_key: Key,
}

impl App {
    pub async fn new() -> Result<Self, EnamoriumError> {
        let config = Config::load()?;

        let store: Arc<dyn Store> = match (&config.store, &config.scylla) {
            (StoreKind::Scylla, Some(scylla)) => {
                let db_session = CachingSession::init_client(scylla).await?;

                Arc::new(ScyllaStore::new(db_session))
            }
            (StoreKind::Scylla, None) => {
                return Err(EnamoriumError::ConfigError("Missing [scylla] config".to_string()));
            }
            (StoreKind::Memory, _) => {
                log_warning("Using in-memory store. Data is lost on restart.".to_string());

                Arc::new(MemoryStore::default())
            }
        };

        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn Store>) -> Result<Self, EnamoriumError> {
        let secret_key = Key::try_from(config.secret_key.as_bytes())
            .map_err(|e| EnamoriumError::ConfigError(format!("Invalid secret_key: {}", e)))?;

        Ok(Self {
            config,
            store,
            secret_key,
        })
    }

    /// Init processes that need to be run on startup
    pub fn init(&self) {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    pub fn cors(&self) -> Cors {
        Cors::default()
            .allowed_origin(self.config.allowed_origin.as_str())
            .supports_credentials()
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::ORIGIN,
                http::header::USER_AGENT,
                http::header::CONTENT_TYPE,
                http::header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            ])
            .expose_headers(vec![http::header::ACCESS_CONTROL_ALLOW_ORIGIN])
            .max_age(86400)
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    pub fn session_middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        let ttl = PersistentSession::default()
            .session_ttl(cookie::time::Duration::days(self.config.session_expiration_in_days));

        SessionMiddleware::builder(CookieSessionStore::default(), self.secret_key.clone())
            .session_lifecycle(ttl)
            .cookie_secure(self.config.cookie_secure)
            .build()
    }
}

#[cfg(test)]
impl Config {
    pub fn test() -> Self {
        Config {
            port: 0,
            allowed_origin: "http://localhost:3000".to_string(),
            secret_key: "x".repeat(64),
            session_expiration_in_days: 1,
            cookie_secure: false,
            store: StoreKind::Memory,
            scylla: None,
        }
    }
}
