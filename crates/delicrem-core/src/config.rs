//! Configuration management for the Delicrem dashboard

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Page sizes for every dashboard list
    #[serde(default)]
    pub pages: PageConfig,

    /// Static file server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Page sizes per list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Orders shown per page
    #[serde(default = "default_orders_per_page")]
    pub orders: usize,

    /// Sales shown per page
    #[serde(default = "default_sales_per_page")]
    pub sales: usize,

    /// Products shown per page
    #[serde(default = "default_products_per_page")]
    pub products: usize,

    /// Users shown per page
    #[serde(default = "default_users_per_page")]
    pub users: usize,
}

/// Server configuration for the native static file server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the compiled front end
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    option_env!("DELICREM_API_URL")
        .unwrap_or("http://localhost:3000")
        .trim_end_matches('/')
        .to_string()
}

const fn default_orders_per_page() -> usize {
    5
}

const fn default_sales_per_page() -> usize {
    5
}

const fn default_products_per_page() -> usize {
    3
}

const fn default_users_per_page() -> usize {
    3
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            orders: default_orders_per_page(),
            sales: default_sales_per_page(),
            products: default_products_per_page(),
            users: default_users_per_page(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            pages: PageConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an optional `config` file and `DELICREM_*` variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("DELICREM").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check invariants the loader cannot express
    ///
    /// # Errors
    ///
    /// Returns an error if any page size is zero or the base URL is empty.
    pub fn validate(&self) -> crate::Result<()> {
        let sizes = [
            ("pages.orders", self.pages.orders),
            ("pages.sales", self.pages.sales),
            ("pages.products", self.pages.products),
            ("pages.users", self.pages.users),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, size)| *size == 0) {
            return Err(crate::Error::Configuration {
                message: format!("{name} must be greater than zero"),
            });
        }

        if self.api.base_url.trim().is_empty() {
            return Err(crate::Error::Configuration {
                message: "api.base_url must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert!(!config.api.base_url.ends_with('/'));
        assert_eq!(config.pages.orders, 5);
        assert_eq!(config.pages.sales, 5);
        assert_eq!(config.pages.products, 3);
        assert_eq!(config.pages.users, 3);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.static_dir, PathBuf::from("dist"));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "text");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = Config::default();
        config.pages.users = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pages.users"));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let mut config = Config::default();
        config.api.base_url = "  ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"pages": {"orders": 10}, "logging": {"format": "json"}}"#)
                .unwrap();

        assert_eq!(config.pages.orders, 10);
        assert_eq!(config.pages.products, 3);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
