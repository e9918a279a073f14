use core_config::{ConfigError, FromEnv, file::load_json, server::ServerConfig};
use serde::Deserialize;
use std::path::Path;

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

/// On-disk layout of `--config` files
///
/// ```json
/// {
///   "db": { "server": "mongodb", "port": "27017", "username": "", "password": "", "dbname": "hellofresh" },
///   "address": "",
///   "port": "8080",
///   "timeout": 10
/// }
/// ```
#[derive(Deserialize)]
struct FileConfig {
    #[serde(default)]
    db: MongoConfig,
    #[serde(flatten)]
    server: ServerConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            mongodb: MongoConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }

    /// Database and server settings come from the file; the logging
    /// environment still comes from `APP_ENV`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file: FileConfig = load_json(path)?;

        Ok(Self {
            mongodb: file.db,
            server: file.server,
            environment: Environment::from_env(),
        })
    }
}
