//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use forum_core::SubjectKind;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub store: StoreBackend,
    /// Present whenever `store` is `Postgres`
    pub database: Option<DatabaseConfig>,
    /// Subjects registered up front when `store` is `Memory`
    pub memory_subjects: Vec<(SubjectKind, i64)>,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which reaction store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// In-process store; state is lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue("STORE_BACKEND", other.to_string())),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply the embedded schema at startup
    pub run_migrations: bool,
}

// Default value functions
fn default_app_name() -> String {
    "forum-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_run_migrations() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = lookup("APP_ENV")
            .map(|s| s.parse::<Environment>())
            .transpose()?
            .unwrap_or_default();

        let port = parse_or(&lookup, "API_PORT", default_port)?;

        let store = lookup("STORE_BACKEND")
            .map(|s| s.parse::<StoreBackend>())
            .transpose()?
            .unwrap_or_default();

        let database = match (store, lookup("DATABASE_URL")) {
            (_, Some(url)) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                run_migrations: parse_or(&lookup, "DATABASE_RUN_MIGRATIONS", default_run_migrations)?,
            }),
            (StoreBackend::Postgres, None) => return Err(ConfigError::MissingVar("DATABASE_URL")),
            (StoreBackend::Memory, None) => None,
        };

        let memory_subjects = match lookup("MEMORY_SUBJECTS") {
            Some(raw) => parse_subjects(&raw)?,
            None => Vec::new(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port,
            },
            store,
            database,
            memory_subjects,
        })
    }
}

/// Parse an optional variable, rejecting values that are present but malformed
fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Parse `post:1,comment:5` into subject keys
fn parse_subjects(raw: &str) -> Result<Vec<(SubjectKind, i64)>, ConfigError> {
    let invalid = || ConfigError::InvalidValue("MEMORY_SUBJECTS", raw.to_string());

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (kind, id) = entry.split_once(':').ok_or_else(invalid)?;
            let kind = match kind.trim() {
                "post" => SubjectKind::Post,
                "comment" => SubjectKind::Comment,
                _ => return Err(invalid()),
            };
            let id = id.trim().parse().map_err(|_| invalid())?;
            Ok((kind, id))
        })
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!("Production".parse::<Environment>().unwrap(), Environment::Production);
        assert!("prod".parse::<Environment>().is_err());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = AppConfig::from_source(source(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));
    }

    #[test]
    fn test_memory_backend_without_database() {
        let config = AppConfig::from_source(source(&[("STORE_BACKEND", "memory")])).unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert!(config.database.is_none());
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.app.name, "forum-server");
    }

    #[test]
    fn test_full_postgres_config() {
        let config = AppConfig::from_source(source(&[
            ("APP_ENV", "staging"),
            ("API_HOST", "0.0.0.0"),
            ("API_PORT", "9000"),
            ("DATABASE_URL", "postgres://localhost/forum"),
            ("DATABASE_MAX_CONNECTIONS", "8"),
            ("DATABASE_RUN_MIGRATIONS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.app.env, Environment::Staging);
        assert_eq!(config.api.address(), "0.0.0.0:9000");
        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/forum");
        assert_eq!(database.max_connections, 8);
        assert_eq!(database.min_connections, 5);
        assert!(!database.run_migrations);
    }

    #[test]
    fn test_memory_subjects() {
        let config = AppConfig::from_source(source(&[
            ("STORE_BACKEND", "memory"),
            ("MEMORY_SUBJECTS", "post:1, comment:5,"),
        ]))
        .unwrap();
        assert_eq!(
            config.memory_subjects,
            vec![(SubjectKind::Post, 1), (SubjectKind::Comment, 5)]
        );

        let err = AppConfig::from_source(source(&[
            ("STORE_BACKEND", "memory"),
            ("MEMORY_SUBJECTS", "thread:1"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("MEMORY_SUBJECTS", _)));
    }

    #[test]
    fn test_malformed_database_settings_rejected() {
        for (key, value) in [
            ("DATABASE_MAX_CONNECTIONS", "many"),
            ("DATABASE_MIN_CONNECTIONS", "-1"),
            ("DATABASE_RUN_MIGRATIONS", "yes"),
        ] {
            let err = AppConfig::from_source(source(&[
                ("DATABASE_URL", "postgres://localhost/forum"),
                (key, value),
            ]))
            .unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidValue(k, v) if *k == key && v == value),
                "{key}={value} gave {err}"
            );
        }
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = AppConfig::from_source(source(&[
            ("STORE_BACKEND", "memory"),
            ("API_PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("API_PORT", _)));
    }
}
