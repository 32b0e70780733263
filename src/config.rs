//! Application configuration module
//! Handles environment variable loading, configuration validation, and application settings

use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub jambopay: JamboPayConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served on GET requests, `index.html` as the default document.
    pub static_dir: String,
}

/// JamboPay upstream configuration
#[derive(Debug, Clone)]
pub struct JamboPayConfig {
    pub client_id: String,
    pub client_secret: String,
    pub base_url: String,
    /// Ordered endpoint paths tried until one answers with a 2xx.
    pub endpoint_paths: Vec<String>,
    pub timeout: Duration,
    pub merchant_name: String,
    pub reference_prefix: String,
    /// Public base URL used to build callback/redirect targets.
    pub public_base_url: String,
    /// The two upstream integrations disagree on whether a 1.00 floor applies.
    pub enforce_minimum_amount: bool,
    /// Likewise on the outbound header set.
    pub send_accept_header: bool,
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log format options
#[derive(Debug, Clone)]
pub enum LogFormat {
    Json,
    Plain,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenv::dotenv().ok();

        Ok(AppConfig {
            server: ServerConfig::from_env()?,
            jambopay: JamboPayConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.jambopay.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(ServerConfig {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue(
                "SERVER_PORT cannot be 0".to_string(),
            ));
        }

        if self.host.is_empty() {
            return Err(ConfigError::InvalidValue(
                "SERVER_HOST cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl JamboPayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Credentials are required from the environment; they must never
        // ship as source literals.
        let client_id = env::var("JAMBOPAY_CLIENT_ID")
            .map_err(|_| ConfigError::MissingVariable("JAMBOPAY_CLIENT_ID".to_string()))?;
        let client_secret = env::var("JAMBOPAY_CLIENT_SECRET")
            .map_err(|_| ConfigError::MissingVariable("JAMBOPAY_CLIENT_SECRET".to_string()))?;

        Ok(JamboPayConfig {
            client_id,
            client_secret,
            base_url: env::var("JAMBOPAY_BASE_URL")
                .unwrap_or_else(|_| "https://api.jambopay.com".to_string()),
            endpoint_paths: env::var("JAMBOPAY_ENDPOINT_PATHS")
                .unwrap_or_else(|_| "/v1/payments,/api/v1/payments,/checkout/api".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            timeout: Duration::from_secs(
                env::var("JAMBOPAY_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("JAMBOPAY_TIMEOUT_SECS".to_string()))?,
            ),
            merchant_name: env::var("JAMBOPAY_MERCHANT_NAME")
                .unwrap_or_else(|_| "Driveflow Enterprises Live Cred".to_string()),
            reference_prefix: env::var("JAMBOPAY_REFERENCE_PREFIX")
                .unwrap_or_else(|_| "DRIVEFLOW".to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "https://your-codespace-3000.app.github.dev".to_string()),
            enforce_minimum_amount: env::var("JAMBOPAY_ENFORCE_MINIMUM")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                != "false",
            send_accept_header: env::var("JAMBOPAY_SEND_ACCEPT_HEADER")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                == "true",
            user_agent: env::var("JAMBOPAY_USER_AGENT")
                .unwrap_or_else(|_| "Driveflow-Enterprises/1.0".to_string()),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(ConfigError::InvalidValue(
                "JamboPay credentials cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "JAMBOPAY_BASE_URL must be a valid URL".to_string(),
            ));
        }

        if self.endpoint_paths.is_empty() {
            return Err(ConfigError::InvalidValue(
                "JAMBOPAY_ENDPOINT_PATHS cannot be empty".to_string(),
            ));
        }

        if self.timeout.as_secs() == 0 {
            return Err(ConfigError::InvalidValue(
                "JAMBOPAY_TIMEOUT_SECS".to_string(),
            ));
        }

        Ok(())
    }

    /// Full candidate URLs in attempt order. Entries that are already
    /// absolute URLs are taken as-is; bare paths are joined to the base URL.
    pub fn endpoint_urls(&self) -> Vec<String> {
        self.endpoint_paths
            .iter()
            .map(|path| {
                if path.starts_with("http://") || path.starts_with("https://") {
                    path.clone()
                } else {
                    format!("{}{}", self.base_url.trim_end_matches('/'), path)
                }
            })
            .collect()
    }
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "plain".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Plain,
            },
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];
        if !valid_levels.contains(&self.level.to_uppercase().as_str()) {
            return Err(ConfigError::InvalidValue("LOG_LEVEL".to_string()));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),

    #[error("Invalid value for configuration: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jambopay_config() -> JamboPayConfig {
        JamboPayConfig {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            base_url: "https://api.jambopay.com".to_string(),
            endpoint_paths: vec!["/v1/payments".to_string()],
            timeout: Duration::from_secs(30),
            merchant_name: "Driveflow Enterprises Live Cred".to_string(),
            reference_prefix: "DRIVEFLOW".to_string(),
            public_base_url: "https://example.app.github.dev".to_string(),
            enforce_minimum_amount: true,
            send_accept_header: false,
            user_agent: "Driveflow-Enterprises/1.0".to_string(),
        }
    }

    #[test]
    fn test_server_config_validation() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            static_dir: "public".to_string(),
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_port_validation() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Invalid port
            static_dir: "public".to_string(),
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_jambopay_config_validation() {
        assert!(jambopay_config().validate().is_ok());
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let mut config = jambopay_config();
        config.client_secret = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_urls_join_base_and_paths() {
        let mut config = jambopay_config();
        config.base_url = "https://api.jambopay.com/".to_string();
        config.endpoint_paths = vec!["/v1/payments".to_string(), "/api/v1/payments".to_string()];

        assert_eq!(
            config.endpoint_urls(),
            vec![
                "https://api.jambopay.com/v1/payments".to_string(),
                "https://api.jambopay.com/api/v1/payments".to_string(),
            ]
        );
    }

    #[test]
    fn test_absolute_endpoint_paths_passed_through() {
        let mut config = jambopay_config();
        config.endpoint_paths = vec!["http://127.0.0.1:9999/v1/payments".to_string()];

        assert_eq!(
            config.endpoint_urls(),
            vec!["http://127.0.0.1:9999/v1/payments".to_string()]
        );
    }
}
