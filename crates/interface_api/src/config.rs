//! API configuration
//!
//! Settings come from built-in defaults overridden by environment variables
//! prefixed with `API_`. Nested keys use `__`, so the database host is
//! `API_POSTGRES__HOST`. A plain `DATABASE_URL` wins over the assembled URL.

use std::time::Duration;

use serde::Deserialize;

use infra_db::DatabaseConfig;

/// PostgreSQL connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub scheme: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    /// Database name; empty means `postgres`
    pub db: String,
    /// Full connection URL, used verbatim when set
    #[serde(default)]
    pub url: Option<String>,
}

impl Default for PostgresSettings {
    fn default() -> Self {
        Self {
            scheme: "postgres".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            db: "postgres".to_string(),
            url: None,
        }
    }
}

impl PostgresSettings {
    /// Returns the explicit URL or assembles one from the parts
    pub fn connection_url(&self) -> String {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return url.to_string();
        }

        let db = if self.db.is_empty() { "postgres" } else { &self.db };
        format!(
            "{}://{}:{}@{}:{}/{}",
            self.scheme, self.user, self.password, self.host, self.port, db
        )
    }
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Upper bound on pooled database connections
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// Seconds a request waits for a pooled connection
    pub acquire_timeout_secs: u32,
    /// Seconds before an idle connection is closed; 0 keeps it
    pub idle_timeout_secs: u32,
    /// Seconds before a connection is recycled; 0 keeps it
    pub max_lifetime_secs: u32,
    /// Database connection settings
    pub postgres: PostgresSettings,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            postgres: PostgresSettings::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut config = Self::from_environment(Self::environment())?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.postgres.url = Some(url);
        }

        Ok(config)
    }

    /// Loads configuration from defaults plus the given environment source
    pub fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .set_default("min_connections", i64::from(defaults.min_connections))?
            .set_default("acquire_timeout_secs", i64::from(defaults.acquire_timeout_secs))?
            .set_default("idle_timeout_secs", i64::from(defaults.idle_timeout_secs))?
            .set_default("max_lifetime_secs", i64::from(defaults.max_lifetime_secs))?
            .set_default("postgres.scheme", defaults.postgres.scheme)?
            .set_default("postgres.user", defaults.postgres.user)?
            .set_default("postgres.password", defaults.postgres.password)?
            .set_default("postgres.host", defaults.postgres.host)?
            .set_default("postgres.port", i64::from(defaults.postgres.port))?
            .set_default("postgres.db", defaults.postgres.db)?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// The `API_` environment source with `__` as the nesting separator
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix("API")
            .prefix_separator("_")
            .separator("__")
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the pool configuration for the configured database
    pub fn database_config(&self) -> DatabaseConfig {
        let seconds = |secs: u32| (secs > 0).then(|| Duration::from_secs(u64::from(secs)));

        DatabaseConfig::new(self.postgres.connection_url())
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(u64::from(self.acquire_timeout_secs)))
            .idle_timeout(seconds(self.idle_timeout_secs))
            .max_lifetime(seconds(self.max_lifetime_secs))
    }
}
