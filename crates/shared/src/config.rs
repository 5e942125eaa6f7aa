//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Reporting configuration.
    #[serde(default)]
    pub reports: ReportsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
///
/// Tokens are minted by the identity gateway that shares `secret`.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing and verifying tokens.
    pub secret: String,
    /// Token lifetime in seconds.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            token_expiry_secs: default_token_expiry(),
        }
    }
}

fn default_token_expiry() -> u64 {
    3600 // 1 hour
}

/// Reporting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// IANA time zone that defines the user's calendar (weeks, months, days).
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "Asia/Kolkata".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("XPENSIFY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment_applies_defaults() {
        temp_env::with_vars(
            [
                ("XPENSIFY__DATABASE__URL", Some("postgres://localhost/xpensify")),
                ("XPENSIFY__JWT__SECRET", Some("s3cret")),
                ("XPENSIFY__REPORTS__TIMEZONE", None::<&str>),
                ("XPENSIFY__SERVER__PORT", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/xpensify");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.jwt.secret, "s3cret");
                assert_eq!(config.jwt.token_expiry_secs, 3600);
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.reports.timezone, "Asia/Kolkata");
            },
        );
    }

    #[test]
    fn test_load_reads_timezone_override() {
        temp_env::with_vars(
            [
                ("XPENSIFY__DATABASE__URL", Some("postgres://localhost/xpensify")),
                ("XPENSIFY__JWT__SECRET", Some("s3cret")),
                ("XPENSIFY__REPORTS__TIMEZONE", Some("Europe/Berlin")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.reports.timezone, "Europe/Berlin");
            },
        );
    }

    #[test]
    fn test_load_fails_without_database_url() {
        temp_env::with_vars(
            [
                ("XPENSIFY__DATABASE__URL", None::<&str>),
                ("XPENSIFY__JWT__SECRET", Some("s3cret")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
