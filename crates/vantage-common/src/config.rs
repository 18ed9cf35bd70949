//! Client configuration structures.
//!
//! Supports TOML deserialization with sensible defaults matching a stock
//! InFusion controller: TLS on, standard service ports, and the documented
//! per-service timeouts.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default TLS port of the Configuration (ACI) service.
pub const CONFIG_PORT_TLS: u16 = 2010;
/// Default plaintext port of the Configuration (ACI) service.
pub const CONFIG_PORT_PLAIN: u16 = 2001;
/// Default TLS port of the Host Command service.
pub const COMMAND_PORT_TLS: u16 = 3010;
/// Default plaintext port of the Host Command service.
pub const COMMAND_PORT_PLAIN: u16 = 3001;

/// Top-level client configuration for a single InFusion controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VantageConfig {
    /// Hostname or IP address of the controller.
    pub host: String,

    /// Username, if the controller requires authentication.
    pub username: Option<String>,

    /// Password, if the controller requires authentication.
    pub password: Option<String>,

    /// Configuration (ACI) service settings.
    pub config_service: ServiceConfig,

    /// Host Command service settings.
    pub command_service: ServiceConfig,

    /// Delay between reconnection attempts of the event connection.
    #[serde(with = "humantime_serde")]
    pub reconnect_delay: Duration,

    /// Page size used when enumerating configuration objects.
    pub page_size: u32,
}

impl Default for VantageConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: None,
            password: None,
            config_service: ServiceConfig {
                read_timeout: Duration::from_secs(60),
                ..ServiceConfig::default()
            },
            command_service: ServiceConfig::default(),
            reconnect_delay: Duration::from_secs(5),
            page_size: 50,
        }
    }
}

impl VantageConfig {
    /// Create a configuration for the given host with all defaults.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Create a configuration for the given host with credentials.
    pub fn with_credentials(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Serialize configuration to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Resolved port of the Configuration service.
    pub fn config_port(&self) -> u16 {
        self.config_service
            .resolved_port(CONFIG_PORT_TLS, CONFIG_PORT_PLAIN)
    }

    /// Resolved port of the Host Command service.
    pub fn command_port(&self) -> u16 {
        self.command_service
            .resolved_port(COMMAND_PORT_TLS, COMMAND_PORT_PLAIN)
    }
}

/// Per-service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Port override. When unset, the standard port for the service is used,
    /// picked by the TLS flag.
    pub port: Option<u16>,

    /// Whether to wrap the connection in TLS. The controller presents a
    /// self-signed certificate, so verification is always relaxed.
    pub tls: bool,

    /// Timeout for establishing the TCP (and TLS) connection.
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Timeout for a single read while waiting for a reply.
    #[serde(with = "humantime_serde")]
    pub read_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: None,
            tls: true,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(10),
        }
    }
}

impl ServiceConfig {
    /// Resolve the effective port given the service's standard ports.
    pub fn resolved_port(&self, default_tls: u16, default_plain: u16) -> u16 {
        self.port
            .unwrap_or(if self.tls { default_tls } else { default_plain })
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Serde helper module for `Duration` using humantime format.
mod humantime_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = humantime::format_duration(*duration).to_string();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        let config = VantageConfig::new("192.168.1.2");
        assert_eq!(config.config_port(), 2010);
        assert_eq!(config.command_port(), 3010);
    }

    #[test]
    fn test_plaintext_ports() {
        let mut config = VantageConfig::new("192.168.1.2");
        config.config_service.tls = false;
        config.command_service.tls = false;
        assert_eq!(config.config_port(), 2001);
        assert_eq!(config.command_port(), 3001);
    }

    #[test]
    fn test_port_override() {
        let mut config = VantageConfig::new("192.168.1.2");
        config.command_service.port = Some(13010);
        assert_eq!(config.command_port(), 13010);
    }

    #[test]
    fn test_default_timeouts() {
        let config = VantageConfig::default();
        assert_eq!(config.config_service.read_timeout, Duration::from_secs(60));
        assert_eq!(config.command_service.read_timeout, Duration::from_secs(10));
        assert_eq!(
            config.command_service.connect_timeout,
            Duration::from_secs(5)
        );
        assert_eq!(config.reconnect_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            host = "infusion.local"
            username = "admin"
            password = "secret"
            reconnect_delay = "10s"

            [command_service]
            tls = false
            read_timeout = "2s"
        "#;

        let config = VantageConfig::from_toml(toml).unwrap();
        assert_eq!(config.host, "infusion.local");
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert_eq!(config.reconnect_delay, Duration::from_secs(10));
        assert!(!config.command_service.tls);
        assert_eq!(config.command_service.read_timeout, Duration::from_secs(2));
        // Sections that were not overridden keep their defaults
        assert!(config.config_service.tls);
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = VantageConfig::with_credentials("host", "user", "pass");
        let toml = config.to_toml().unwrap();
        let parsed = VantageConfig::from_toml(&toml).unwrap();
        assert_eq!(parsed.host, "host");
        assert_eq!(parsed.username.as_deref(), Some("user"));
        assert_eq!(parsed.reconnect_delay, config.reconnect_delay);
    }
}
