use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing::Level;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Empty means any origin.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub cors: CorsConfig,
}

fn default_log_level() -> String {
    "info".into()
}

impl ServerConfig {
    /// Parsed log level, falling back to `INFO` on unknown values.
    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait when opening or acquiring a connection.
    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Seconds a pooled connection may stay idle. `None` keeps it forever.
    #[serde(default)]
    pub idle_timeout_secs: Option<u64>,
    #[serde(default = "default_sqlx_logging")]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 {
    100
}
fn default_min_connections() -> u32 {
    5
}
fn default_timeout_secs() -> u64 {
    8
}
fn default_sqlx_logging() -> bool {
    true
}

impl DatabaseConfig {
    /// Pool settings suited to a local file or test database.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: default_timeout_secs(),
            idle_timeout_secs: None,
            sqlx_logging: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of issued tokens, in hours. Default: 7 days.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// When false, `AuthUser::require_permission` lets every authenticated caller through.
    #[serde(default)]
    pub enforce_roles: bool,
}

fn default_token_ttl_hours() -> i64 {
    24 * 7
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://classroom.db?mode=rwc")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CLASSROOM__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("CLASSROOM").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
