use chrono::NaiveTime;
use serde::Deserialize;
use std::net::SocketAddr;

use domain::services::slot_grid::{PriceBand, ScheduleGrid, SlotDefaults};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    /// Booking intake and confirmation tuning
    pub booking: BookingConfig,
    /// Open-slot generator grid and pricing
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
}

impl DatabaseConfig {
    /// The pool configuration the persistence layer consumes.
    pub fn to_pool_config(&self) -> persistence::db::DatabaseConfig {
        persistence::db::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout_secs: self.connect_timeout_secs,
            idle_timeout_secs: self.idle_timeout_secs,
            busy_timeout_secs: self.busy_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Attempts for the confirmation transaction before giving up.
    #[serde(default = "default_confirmation_attempts")]
    pub confirmation_max_attempts: u32,

    /// Base backoff between confirmation attempts; doubles per attempt.
    #[serde(default = "default_confirmation_backoff")]
    pub confirmation_backoff_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Days ahead the generator covers by default.
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,

    /// Earliest class start, "HH:MM".
    #[serde(default = "default_first_start")]
    pub first_start: String,

    /// Latest class start, "HH:MM" (inclusive).
    #[serde(default = "default_last_start")]
    pub last_start: String,

    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,

    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,

    #[serde(default = "default_slot_max_players")]
    pub max_players: i64,

    /// Price band generated slots draw from; equal bounds fix the price.
    #[serde(default = "default_price_min")]
    pub price_min_cents: i64,

    #[serde(default = "default_price_max")]
    pub price_max_cents: i64,

    #[serde(default = "default_slot_level")]
    pub level: String,

    #[serde(default = "default_slot_category")]
    pub category: String,

    /// Whether the daily top-up job runs.
    #[serde(default = "default_topup_enabled")]
    pub topup_enabled: bool,
}

impl GeneratorConfig {
    /// Parse the configured time-of-day grid.
    pub fn schedule_grid(&self) -> Result<ScheduleGrid, ConfigValidationError> {
        let first_start = parse_grid_time(&self.first_start)?;
        let last_start = parse_grid_time(&self.last_start)?;
        Ok(ScheduleGrid {
            first_start,
            last_start,
            step_minutes: self.step_minutes,
            duration_minutes: self.duration_minutes,
        })
    }

    pub fn price_band(&self) -> PriceBand {
        PriceBand {
            min_cents: self.price_min_cents,
            max_cents: self.price_max_cents,
        }
    }

    pub fn slot_defaults(&self) -> SlotDefaults {
        SlotDefaults {
            max_players: self.max_players,
            level: self.level.clone(),
            category: self.category.clone(),
        }
    }
}

fn parse_grid_time(value: &str) -> Result<NaiveTime, ConfigValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        ConfigValidationError::InvalidValue(format!("Invalid grid time '{}', expected HH:MM", value))
    })
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_connections() -> u32 {
    8
}
fn default_min_connections() -> u32 {
    1
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_busy_timeout() -> u64 {
    5
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_confirmation_attempts() -> u32 {
    3
}
fn default_confirmation_backoff() -> u64 {
    25
}
fn default_days_ahead() -> u32 {
    14
}
fn default_first_start() -> String {
    "08:00".to_string()
}
fn default_last_start() -> String {
    "20:30".to_string()
}
fn default_step_minutes() -> u32 {
    30
}
fn default_duration_minutes() -> u32 {
    90
}
fn default_slot_max_players() -> i64 {
    4
}
fn default_price_min() -> i64 {
    4500
}
fn default_price_max() -> i64 {
    6000
}
fn default_slot_level() -> String {
    "open".to_string()
}
fn default_slot_category() -> String {
    "mixed".to_string()
}
fn default_topup_enabled() -> bool {
    true
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with PC__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("PC").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// This method creates a config entirely from defaults and overrides,
    /// without relying on config files (which may not be accessible during tests).
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        // Embed defaults directly to avoid file system dependency in tests
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30

            [database]
            url = ""
            max_connections = 8
            min_connections = 1
            connect_timeout_secs = 10
            idle_timeout_secs = 600
            busy_timeout_secs = 5

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []

            [booking]
            confirmation_max_attempts = 3
            confirmation_backoff_ms = 25

            [generator]
            days_ahead = 14
            first_start = "08:00"
            last_start = "20:30"
            step_minutes = 30
            duration_minutes = 90
            max_players = 4
            price_min_cents = 4500
            price_max_cents = 6000
            level = "open"
            category = "mixed"
            topup_enabled = false
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        // Database URL is required
        if self.database.url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "PC__DATABASE__URL environment variable must be set".to_string(),
            ));
        }

        // Validate port range
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        // Validate connection pool settings
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        if self.booking.confirmation_max_attempts == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "confirmation_max_attempts must be at least 1".to_string(),
            ));
        }

        // Validate the generator grid
        let grid = self.generator.schedule_grid()?;
        if grid.first_start > grid.last_start {
            return Err(ConfigValidationError::InvalidValue(
                "first_start must not be after last_start".to_string(),
            ));
        }
        if self.generator.step_minutes == 0 || self.generator.duration_minutes == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "step_minutes and duration_minutes must be positive".to_string(),
            ));
        }
        if self.generator.max_players < 1 {
            return Err(ConfigValidationError::InvalidValue(
                "max_players must be at least 1".to_string(),
            ));
        }
        if self.generator.price_min_cents < 0
            || self.generator.price_min_cents > self.generator.price_max_cents
        {
            return Err(ConfigValidationError::InvalidValue(
                "price band must be non-negative with min <= max".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .expect("Invalid socket address")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load_with_defaults() {
        let config = Config::load_for_test(&[("database.url", "sqlite://test.db")])
            .expect("Failed to load config");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.generator.days_ahead, 14);
        assert_eq!(config.booking.confirmation_max_attempts, 3);
    }

    #[test]
    fn test_config_env_override() {
        let config = Config::load_for_test(&[
            ("database.url", "sqlite://test.db"),
            ("server.port", "9000"),
            ("logging.level", "debug"),
        ])
        .expect("Failed to load config");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_validation_missing_db_url() {
        let config = Config::load_for_test(&[]).expect("Failed to load config");
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("PC__DATABASE__URL"));
    }

    #[test]
    fn test_config_validation_invalid_pool_settings() {
        let config = Config::load_for_test(&[
            ("database.url", "sqlite://test.db"),
            ("database.min_connections", "100"),
            ("database.max_connections", "10"),
        ])
        .expect("Failed to load config");

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("min_connections"));
    }

    #[test]
    fn test_config_validation_inverted_grid() {
        let config = Config::load_for_test(&[
            ("database.url", "sqlite://test.db"),
            ("generator.first_start", "21:00"),
            ("generator.last_start", "08:00"),
        ])
        .expect("Failed to load config");

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("first_start"));
    }

    #[test]
    fn test_config_validation_malformed_grid_time() {
        let config = Config::load_for_test(&[
            ("database.url", "sqlite://test.db"),
            ("generator.first_start", "eight"),
        ])
        .expect("Failed to load config");

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_schedule_grid_parses() {
        let config = Config::load_for_test(&[("database.url", "sqlite://test.db")])
            .expect("Failed to load config");

        let grid = config.generator.schedule_grid().unwrap();
        assert_eq!(grid.first_start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(grid.last_start, NaiveTime::from_hms_opt(20, 30, 0).unwrap());
        assert_eq!(grid.start_times().len(), 26);
    }

    #[test]
    fn test_socket_addr() {
        let config = Config::load_for_test(&[
            ("database.url", "sqlite://test.db"),
            ("server.host", "127.0.0.1"),
            ("server.port", "3000"),
        ])
        .expect("Failed to load config");

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }
}
