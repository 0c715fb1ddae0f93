use axum::http::HeaderValue;
use folio_db::DatabaseConfig;

use crate::auth::jwt::{expiry_from_now, JwtConfig, DEFAULT_TOKEN_EXPIRY_HOURS};

/// Resource names that may appear in `PROTECTED_RESOURCES`.
pub const RESOURCES: [&str; 3] = ["users", "books", "blogs"];

/// Errors raised while loading [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("PROTECTED_RESOURCES names an unknown resource: {0:?}")]
    UnknownResource(String),
}

/// Server configuration loaded once at startup and injected everywhere else.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8008`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Resources whose routes require a bearer token. Empty by default.
    pub protected_resources: Vec<String>,
    /// Relational store connection descriptor.
    pub database: DatabaseConfig,
    /// Token signing secret and lifetime.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    ///
    /// | Env Var                | Required | Default |
    /// |------------------------|----------|---------|
    /// | `HOST`                 | no       | `0.0.0.0` |
    /// | `PORT`                 | no       | `8008`  |
    /// | `CORS_ORIGINS`         | no       | `*`     |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`    |
    /// | `PROTECTED_RESOURCES`  | no       | (none)  |
    /// | `DB_HOST`              | **yes**  | --      |
    /// | `DB_PORT`              | **yes**  | --      |
    /// | `DB_USER`              | **yes**  | --      |
    /// | `DB_PASS`              | **yes**  | --      |
    /// | `DB_NAME`              | **yes**  | --      |
    /// | `DB_MAX_CONNECTIONS`   | no       | `20`    |
    /// | `SECRET_KEY`           | **yes**  | --      |
    /// | `TOKEN_EXPIRY_HOURS`   | no       | `2`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let host = or_default("HOST", "0.0.0.0");
        let port = parse("PORT", or_default("PORT", "8008"))?;

        let cors_origins = split_list(&or_default("CORS_ORIGINS", "*"));
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| o.as_str() != "*" && HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::Invalid {
                key: "CORS_ORIGINS",
                value: bad.clone(),
            });
        }

        let request_timeout_raw = or_default("REQUEST_TIMEOUT_SECS", "30");
        let request_timeout_secs: u64 = parse("REQUEST_TIMEOUT_SECS", request_timeout_raw.clone())?;
        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                value: request_timeout_raw,
            });
        }

        let protected_resources = split_list(&or_default("PROTECTED_RESOURCES", ""));
        if let Some(unknown) = protected_resources
            .iter()
            .find(|r| !RESOURCES.contains(&r.as_str()))
        {
            return Err(ConfigError::UnknownResource(unknown.clone()));
        }

        let database = DatabaseConfig {
            host: required("DB_HOST")?,
            port: parse("DB_PORT", required("DB_PORT")?)?,
            user: required("DB_USER")?,
            password: required("DB_PASS")?,
            name: required("DB_NAME")?,
            max_connections: parse("DB_MAX_CONNECTIONS", or_default("DB_MAX_CONNECTIONS", "20"))?,
        };

        let secret = required("SECRET_KEY")?;
        if secret.is_empty() {
            return Err(ConfigError::Invalid {
                key: "SECRET_KEY",
                value: secret,
            });
        }
        let expiry_raw = or_default("TOKEN_EXPIRY_HOURS", &DEFAULT_TOKEN_EXPIRY_HOURS.to_string());
        let token_expiry_hours: i64 = parse("TOKEN_EXPIRY_HOURS", expiry_raw.clone())?;
        if expiry_from_now(token_expiry_hours).is_none() {
            return Err(ConfigError::Invalid {
                key: "TOKEN_EXPIRY_HOURS",
                value: expiry_raw,
            });
        }
        let jwt = JwtConfig {
            secret,
            token_expiry_hours,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            protected_resources,
            database,
            jwt,
        })
    }

    /// Whether routes of `resource` require a bearer token.
    pub fn is_protected(&self, resource: &str) -> bool {
        self.protected_resources.iter().any(|r| r == resource)
    }

    /// Whether `CORS_ORIGINS` allows any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
