use std::fmt;

use config::{Config, ConfigError, Environment};
use dotenv::dotenv;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Which listing store the server binds to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Mongodb,
    /// In-process store preloaded with the mock listings.
    Memory,
}

// Shape of the environment before the password is wrapped.
#[derive(Deserialize)]
struct RawConfig {
    port: u16,
    db_user: String,
    db_user_password: String,
    db_cluster: String,
    db_name: String,
    db_collection: String,
    db_backend: StoreBackend,
}

/// Server configuration, read from the process environment.
pub struct AppConfig {
    pub port: u16,
    pub db_user: String,
    pub db_user_password: SecretString,
    pub db_cluster: String,
    pub db_name: String,
    pub db_collection: String,
    pub db_backend: StoreBackend,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file first
        dotenv().ok();

        Self::from_env(Environment::default())
    }

    /// Reads configuration from the given environment source.
    ///
    /// `PORT`, `DB_USER`, `DB_USER_PASSWORD` and `DB_CLUSTER` are required.
    pub fn from_env(source: Environment) -> Result<Self, ConfigError> {
        let raw: RawConfig = Config::builder()
            .set_default("db_name", "main")?
            .set_default("db_collection", "test_listings")?
            .set_default("db_backend", "mongodb")?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        Ok(Self {
            port: raw.port,
            db_user: raw.db_user,
            db_user_password: SecretString::from(raw.db_user_password),
            db_cluster: raw.db_cluster,
            db_name: raw.db_name,
            db_collection: raw.db_collection,
            db_backend: raw.db_backend,
        })
    }

    /// The Atlas SRV connection string assembled from the credentials.
    pub fn connection_uri(&self) -> SecretString {
        SecretString::from(format!(
            "mongodb+srv://{}:{}@{}.mongodb.net",
            self.db_user,
            self.db_user_password.expose_secret(),
            self.db_cluster
        ))
    }
}

// Custom Debug implementation that masks the password
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("db_user", &self.db_user)
            .field("db_user_password", &"******") // Mask password
            .field("db_cluster", &self.db_cluster)
            .field("db_name", &self.db_name)
            .field("db_collection", &self.db_collection)
            .field("db_backend", &self.db_backend)
            .finish()
    }
}
