use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Where the catalog store lives.
///
/// A full connection string takes precedence over the component form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSource {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        name: String,
    },
}

/// Catalog store connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub source: DatabaseSource,
    /// Pool capacity; callers beyond it queue (default: `10`).
    pub max_connections: u32,
    /// How long a request waits for a pooled connection before failing
    /// (default: 5 s).
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Build sqlx connect options.
    ///
    /// Fails only when a `DATABASE_URL` cannot be parsed. The caller treats
    /// that as a degraded start rather than a fatal one.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.source {
            DatabaseSource::Url(url) => PgConnectOptions::from_str(url),
            DatabaseSource::Parts {
                host,
                port,
                user,
                password,
                name,
            } => {
                let options = PgConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .username(user)
                    .database(name);
                Ok(if password.is_empty() {
                    options
                } else {
                    options.password(password)
                })
            }
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Directory holding uploaded product images (default: `uploads`).
    pub upload_dir: PathBuf,
    /// Directory holding the storefront shell (default: `public`).
    pub public_dir: PathBuf,
    /// Maximum accepted request body, in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default     |
    /// |----------------------|-------------|
    /// | `HOST`               | `0.0.0.0`   |
    /// | `PORT`               | `3000`      |
    /// | `UPLOAD_DIR`         | `uploads`   |
    /// | `PUBLIC_DIR`         | `public`    |
    /// | `MAX_UPLOAD_BYTES`   | `10485760`  |
    /// | `DATABASE_URL`       | unset       |
    /// | `DB_HOST`            | `localhost` |
    /// | `DB_PORT`            | `5432`      |
    /// | `DB_USER`            | `postgres`  |
    /// | `DB_PASSWORD`        | empty       |
    /// | `DB_NAME`            | `showroom`  |
    /// | `DB_MAX_CONNECTIONS` | `10`        |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reading from an arbitrary source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = parse("PORT", "port number", var("PORT", "3000"))?;
        let upload_dir = PathBuf::from(var("UPLOAD_DIR", "uploads"));
        let public_dir = PathBuf::from(var("PUBLIC_DIR", "public"));
        let max_upload_bytes = parse(
            "MAX_UPLOAD_BYTES",
            "byte count",
            var("MAX_UPLOAD_BYTES", "10485760"),
        )?;

        let source = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => DatabaseSource::Url(url),
            None => DatabaseSource::Parts {
                host: var("DB_HOST", "localhost"),
                port: parse("DB_PORT", "port number", var("DB_PORT", "5432"))?,
                user: var("DB_USER", "postgres"),
                password: var("DB_PASSWORD", ""),
                name: var("DB_NAME", "showroom"),
            },
        };
        let max_connections = parse(
            "DB_MAX_CONNECTIONS",
            "connection count",
            var("DB_MAX_CONNECTIONS", "10"),
        )?;
        let acquire_timeout_secs: u64 = parse(
            "DB_ACQUIRE_TIMEOUT_SECS",
            "number of seconds",
            var("DB_ACQUIRE_TIMEOUT_SECS", "5"),
        )?;

        Ok(Self {
            host,
            port,
            upload_dir,
            public_dir,
            max_upload_bytes,
            database: DatabaseConfig {
                source,
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
        })
    }

    /// Path of the storefront shell served for unmatched routes.
    pub fn shell_path(&self) -> PathBuf {
        self.public_dir.join("index.html")
    }
}

fn parse<T: FromStr>(var: &'static str, expected: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        })
}
