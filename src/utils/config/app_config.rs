use crate::utils::errors::config_errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_DB_USER: &str = "root";
pub const DEFAULT_EXPORT_DIR: &str = "static/exports";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbDriver {
    MySql,
    Sqlite,
}

impl FromStr for DbDriver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(DbDriver::MySql),
            "sqlite" => Ok(DbDriver::Sqlite),
            other => Err(ConfigError::UnknownDriver(other.to_string())),
        }
    }
}

impl fmt::Display for DbDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MySql => write!(f, "mysql"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Connection descriptor. For the sqlite driver `database` is the file path and
/// host, port, user and password are ignored.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub driver: DbDriver,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

// Password never reaches logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("driver", &self.driver)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// Per-request connection overrides, as sent in the `db_config` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfigOverride {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
}

fn pick(base: &str, over: &Option<String>) -> String {
    match over {
        Some(value) if !value.is_empty() => value.clone(),
        _ => base.to_string(),
    }
}

impl DbConfig {
    /// Returns a copy where every field the override carries a non-empty value
    /// for is replaced. Empty strings, `null` and port `0` keep the base value.
    pub fn with_overrides(&self, overrides: &DbConfigOverride) -> DbConfig {
        DbConfig {
            driver: self.driver,
            host: pick(&self.host, &overrides.host),
            port: match overrides.port {
                Some(port) if port != 0 => port,
                _ => self.port,
            },
            user: pick(&self.user, &overrides.user),
            password: pick(&self.password, &overrides.password),
            database: pick(&self.database, &overrides.database),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    pub export_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// When set, download links are built from this instead of the request's Host header.
    pub public_base_url: Option<String>,
    pub log_level: String,
}

impl AppConfig {
    /// Reads the process environment once. See `from_lookup` for the variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup:
    /// - DB_DRIVER: mysql | sqlite (default mysql)
    /// - DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME
    /// - EXPORT_DIR: directory for generated files (default static/exports)
    /// - BIND_ADDR: listen address (default 0.0.0.0:5000)
    /// - PUBLIC_BASE_URL: optional base for download links
    /// - LOG_LEVEL: tracing filter (default info)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let driver = match lookup("DB_DRIVER") {
            Some(value) => value.parse()?,
            None => DbDriver::MySql,
        };

        let port = match lookup("DB_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "DB_PORT",
                value,
            })?,
            None => DEFAULT_DB_PORT,
        };

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                var: "BIND_ADDR",
                value: bind_raw.clone(),
            })?;

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(AppConfig {
            db: DbConfig {
                driver,
                host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
                port,
                user: lookup("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.to_string()),
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                database: lookup("DB_NAME").unwrap_or_default(),
            },
            export_dir: PathBuf::from(
                lookup("EXPORT_DIR").unwrap_or_else(|| DEFAULT_EXPORT_DIR.to_string()),
            ),
            bind_addr,
            public_base_url,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Creates the export directory (and parents) if it does not exist yet.
    pub fn ensure_export_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.export_dir)
    }
}
