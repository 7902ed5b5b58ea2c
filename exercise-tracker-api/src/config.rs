/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `HOST`: Host to bind to (default: 0.0.0.0)
/// - `PORT`: Port to bind to (default: 3000)
/// - `STORE_BACKEND`: `postgres` or `memory` (default: `postgres` when
///   `DATABASE_URL` is set, otherwise `memory`)
/// - `DATABASE_URL`: PostgreSQL connection string (required for `postgres`)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `DATABASE_MIN_CONNECTIONS`: Idle connections kept open (default: 1)
/// - `DATABASE_ACQUIRE_TIMEOUT_SECONDS`: Wait for a free connection (default: 30)
/// - `DATABASE_IDLE_TIMEOUT_SECONDS`: Close idle connections after this long,
///   `0` keeps them (default: 600)
/// - `PUBLIC_DIR`: Static asset directory (default: public)
/// - `INDEX_PAGE`: Landing page served at `/` (default: views/index.html)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `RUST_LOG`: Log filter (default:
///   exercise_tracker_api=debug,exercise_tracker_shared=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use exercise_tracker_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::{env, fmt, path::PathBuf, str::FromStr};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Record store configuration
    pub store: StoreConfig,

    /// Static file locations
    pub static_files: StaticFilesConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` allows any origin)
    pub cors_origins: Vec<String>,
}

/// Which record store backs the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Transient, process-local storage
    Memory,

    /// Durable PostgreSQL storage
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => anyhow::bail!("Unknown STORE_BACKEND {:?} (expected memory or postgres)", other),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Selected backend
    pub backend: StoreBackend,

    /// Database settings, present when the backend is `postgres`
    pub database: Option<DatabaseConfig>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Minimum number of connections in pool
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_seconds: u64,

    /// Idle connection timeout in seconds (`None` keeps idle connections)
    pub idle_timeout_seconds: Option<u64>,
}

/// Static file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticFilesConfig {
    /// Directory served for paths that match no API route
    pub public_dir: PathBuf,

    /// HTML page served at `/`
    pub index_page: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                cors_origins: vec!["*".to_string()],
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                database: None,
            },
            static_files: StaticFilesConfig {
                public_dir: PathBuf::from("public"),
                index_page: PathBuf::from("views/index.html"),
            },
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A numeric variable cannot be parsed
    /// - `STORE_BACKEND` names an unknown backend
    /// - The `postgres` backend is selected without `DATABASE_URL`
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.api.host);
        let port = parse_var(&lookup, "PORT", defaults.api.port)?;

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.api.cors_origins,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let backend = match lookup("STORE_BACKEND") {
            Some(raw) => raw.parse::<StoreBackend>()?,
            None if database_url.is_some() => StoreBackend::Postgres,
            None => StoreBackend::Memory,
        };

        let database = match backend {
            StoreBackend::Memory => None,
            StoreBackend::Postgres => {
                let url = database_url.ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL environment variable is required for the postgres backend")
                })?;
                let max_connections = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?;
                let min_connections = parse_var(&lookup, "DATABASE_MIN_CONNECTIONS", 1)?;
                let acquire_timeout_seconds =
                    parse_var(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECONDS", 30)?;
                let idle_timeout_seconds =
                    match parse_var(&lookup, "DATABASE_IDLE_TIMEOUT_SECONDS", 600)? {
                        0 => None,
                        seconds => Some(seconds),
                    };

                if min_connections > max_connections {
                    anyhow::bail!(
                        "DATABASE_MIN_CONNECTIONS ({}) exceeds DATABASE_MAX_CONNECTIONS ({})",
                        min_connections,
                        max_connections
                    );
                }

                Some(DatabaseConfig {
                    url,
                    max_connections,
                    min_connections,
                    acquire_timeout_seconds,
                    idle_timeout_seconds,
                })
            }
        };

        let public_dir = lookup("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_files.public_dir);
        let index_page = lookup("INDEX_PAGE")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_files.index_page);

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            store: StoreConfig { backend, database },
            static_files: StaticFilesConfig {
                public_dir,
                index_page,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Parses a numeric variable, falling back to `default` when unset
fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid {} {:?}: {}", key, raw, e)),
        None => Ok(default),
    }
}
