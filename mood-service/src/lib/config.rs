use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Fallback token signing secret. Insecure on purpose: startup warns
/// loudly whenever it is still in use.
pub const DEFAULT_JWT_SECRET: &str = "default_jwt_secret_key_change_in_production";

/// Fallback MongoDB connection string (local development instance).
pub const DEFAULT_DATABASE_URI: &str = "mongodb://localhost:27017";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

/// MongoDB configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    pub user_collection: String,
    pub emotion_collection: String,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Token signing configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (DATABASE__URI, SERVER__PORT, JWT__SECRET, ...)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Hardcoded fallbacks — every key has one, so the service always
    ///    starts; `warn_on_insecure_defaults` flags the risky ones
    ///
    /// # Errors
    /// Returns error if a provided configuration value cannot be parsed
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.uri", DEFAULT_DATABASE_URI)?
            .set_default("database.name", "moodlog")?
            .set_default("database.user_collection", "users")?
            .set_default("database.emotion_collection", "emotions")?
            .set_default("server.port", 8080_i64)?
            .set_default("jwt.secret", DEFAULT_JWT_SECRET)?
            .set_default("jwt.expiration_hours", 72_i64)?
            // Layer on file configuration when present
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URI=mongodb://... overrides database.uri
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    /// Log a warning for every key still sitting on its hardcoded
    /// fallback. The signing secret is the one that matters; the rest are
    /// flagged so a misconfigured deployment is visible in the logs.
    pub fn warn_on_insecure_defaults(&self) {
        if self.jwt.secret == DEFAULT_JWT_SECRET {
            tracing::warn!(
                "jwt.secret not configured, signing tokens with the insecure default"
            );
        }
        if self.database.uri == DEFAULT_DATABASE_URI {
            tracing::warn!(
                uri = DEFAULT_DATABASE_URI,
                "database.uri not configured, using local default"
            );
        }
        if self.database.name == "moodlog" {
            tracing::warn!("database.name not configured, using default: moodlog");
        }
        if self.database.user_collection == "users" {
            tracing::warn!("database.user_collection not configured, using default: users");
        }
        if self.database.emotion_collection == "emotions" {
            tracing::warn!("database.emotion_collection not configured, using default: emotions");
        }
        if self.server.port == 8080 {
            tracing::warn!("server.port not configured, using default: 8080");
        }
    }
}
