use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use tracing::info;

const CONFIG_DIR: &str = "config";
const DEFAULT_ENV: &str = "development";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration, loaded from `config/*.toml` profiles with
/// `APP__`-prefixed environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database connection URL
    pub database_url: String,

    /// JWT signing secret. No default: it must come from the environment or
    /// a config file.
    pub jwt_secret: String,

    /// Session token lifetime in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: i64,

    /// Server bind address
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Application environment (development, production, test)
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Whether to run database migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,

    /// CORS: comma-separated allowed origins (production)
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,

    /// Allow permissive CORS fallback outside development
    #[serde(default)]
    pub cors_allow_any_origin: bool,

    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_db_min_connections")]
    pub db_min_connections: u32,

    #[serde(default = "default_db_connect_timeout_secs")]
    pub db_connect_timeout_secs: u64,

    /// Flat tax rate applied by the standard totals recomputation
    #[serde(default)]
    pub default_tax_rate: f64,

    /// Days added to "now" for the default fulfillment date on cart lines
    #[serde(default = "default_delivery_lead_days")]
    pub delivery_lead_days: i64,

    /// Warehouse used when neither bins nor the warehouse list resolve one
    #[serde(default = "default_fallback_warehouse")]
    pub fallback_warehouse: String,

    #[serde(default = "default_customer_group")]
    pub default_customer_group: String,

    #[serde(default = "default_territory")]
    pub default_territory: String,

    #[serde(default)]
    pub newsletter_enabled: bool,

    #[serde(default)]
    pub newsletter_group: Option<String>,

    /// Directory scanned for backup files to ship to Google Drive
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,

    /// Seconds between discontinued-item sweeps; 0 disables the job
    #[serde(default = "default_sweep_interval_secs")]
    pub unpublish_sweep_interval_secs: u64,
}

fn default_jwt_expiration() -> i64 {
    3600
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
fn default_db_max_connections() -> u32 {
    10
}
fn default_db_min_connections() -> u32 {
    1
}
fn default_db_connect_timeout_secs() -> u64 {
    30
}
fn default_delivery_lead_days() -> i64 {
    7
}
fn default_fallback_warehouse() -> String {
    "Stores".to_string()
}
fn default_customer_group() -> String {
    "All Customer Groups".to_string()
}
fn default_territory() -> String {
    "All Territories".to_string()
}
fn default_backup_dir() -> String {
    "backups".to_string()
}
fn default_sweep_interval_secs() -> u64 {
    86_400
}

impl AppConfig {
    pub fn is_development(&self) -> bool {
        self.environment == "development" || self.environment == "test"
    }

    pub fn should_allow_permissive_cors(&self) -> bool {
        self.is_development() || self.cors_allow_any_origin
    }
}

/// Loads configuration for the profile named by `RUN_ENV`/`APP_ENV`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on defaults and environment variables",
            CONFIG_DIR
        );
    }

    let config = Config::builder()
        .set_default("database_url", "sqlite://storefront.db?mode=rwc")?
        .set_default("environment", run_env.as_str())?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    if config.get_string("jwt_secret").is_err() {
        return Err(ConfigError::NotFound(
            "jwt_secret must be set via APP__JWT_SECRET or a config file".to_string(),
        ));
    }

    config.try_deserialize()
}

/// Installs the global tracing subscriber. `RUST_LOG` wins over the
/// configured level when set.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_directive = format!("storefront_api={},tower_http=info", level);
    let filter = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let registry = tracing_subscriber::registry().with(EnvFilter::new(filter));
    if json {
        let _ = registry.with(fmt::layer().json()).try_init();
    } else {
        let _ = registry.with(fmt::layer()).try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expiration: default_jwt_expiration(),
            host: default_host(),
            port: default_port(),
            environment: "production".to_string(),
            log_level: default_log_level(),
            log_json: false,
            auto_migrate: false,
            cors_allowed_origins: None,
            cors_allow_any_origin: false,
            db_max_connections: default_db_max_connections(),
            db_min_connections: default_db_min_connections(),
            db_connect_timeout_secs: default_db_connect_timeout_secs(),
            default_tax_rate: 0.0,
            delivery_lead_days: default_delivery_lead_days(),
            fallback_warehouse: default_fallback_warehouse(),
            default_customer_group: default_customer_group(),
            default_territory: default_territory(),
            newsletter_enabled: false,
            newsletter_group: None,
            backup_dir: default_backup_dir(),
            unpublish_sweep_interval_secs: default_sweep_interval_secs(),
        }
    }

    #[test]
    fn permissive_cors_requires_development_or_override() {
        let mut cfg = minimal();
        assert!(!cfg.should_allow_permissive_cors());
        cfg.cors_allow_any_origin = true;
        assert!(cfg.should_allow_permissive_cors());
        cfg.cors_allow_any_origin = false;
        cfg.environment = "development".to_string();
        assert!(cfg.should_allow_permissive_cors());
    }
}
