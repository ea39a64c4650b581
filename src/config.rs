//! Configuration management for the hotel gateway
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::HotelGatewayError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the hotel gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotelGatewayConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend service endpoints
    #[serde(default)]
    pub services: ServicesConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Upper bound on handling a single request, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// PEM certificate; TLS is served only when both paths are set
    #[serde(default)]
    pub tls_cert_path: Option<String>,
    /// PEM private key
    #[serde(default)]
    pub tls_key_path: Option<String>,
}

/// Endpoints of the three backend services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_geo_endpoint")]
    pub geo: ServiceEndpoint,
    #[serde(default = "default_rate_endpoint")]
    pub rate: ServiceEndpoint,
    #[serde(default = "default_profile_endpoint")]
    pub profile: ServiceEndpoint,
}

/// Location and timeout of a single backend service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceEndpoint {
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_service_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_request_timeout() -> u32 {
    45
}

fn default_service_timeout() -> u32 {
    10
}

fn endpoint(base_url: &str) -> ServiceEndpoint {
    ServiceEndpoint {
        base_url: base_url.to_string(),
        timeout_seconds: default_service_timeout(),
    }
}

fn default_geo_endpoint() -> ServiceEndpoint {
    endpoint("http://localhost:8083")
}

fn default_rate_endpoint() -> ServiceEndpoint {
    endpoint("http://localhost:8084")
}

fn default_profile_endpoint() -> ServiceEndpoint {
    endpoint("http://localhost:8081")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            request_timeout_seconds: default_request_timeout(),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            geo: default_geo_endpoint(),
            rate: default_rate_endpoint(),
            profile: default_profile_endpoint(),
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

impl ServerConfig {
    /// Socket address string to bind to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Certificate and key paths when TLS is fully configured
    #[must_use]
    pub fn tls_paths(&self) -> Option<(&str, &str)> {
        match (&self.tls_cert_path, &self.tls_key_path) {
            (Some(cert), Some(key)) => Some((cert.as_str(), key.as_str())),
            _ => None,
        }
    }
}

impl HotelGatewayConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // e.g. HOTEL_GATEWAY_SERVICES__GEO__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("HOTEL_GATEWAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: HotelGatewayConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hotel-gateway").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        for service in [
            &mut self.services.geo,
            &mut self.services.rate,
            &mut self.services.profile,
        ] {
            if service.timeout_seconds == 0 {
                service.timeout_seconds = default_service_timeout();
            }
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_services()?;
        self.validate_server()?;
        self.validate_logging()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(HotelGatewayError::config("Server port must be non-zero").into());
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(
                HotelGatewayError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        // Three sequential backend calls must fit inside one request.
        let backend_budget = self.services.geo.timeout_seconds
            + self.services.rate.timeout_seconds
            + self.services.profile.timeout_seconds;
        if self.server.request_timeout_seconds <= backend_budget {
            return Err(HotelGatewayError::config(format!(
                "Request timeout ({}s) must be larger than the combined service timeouts ({}s)",
                self.server.request_timeout_seconds, backend_budget
            ))
            .into());
        }

        if self.server.tls_cert_path.is_some() != self.server.tls_key_path.is_some() {
            return Err(HotelGatewayError::config(
                "TLS requires both tls_cert_path and tls_key_path",
            )
            .into());
        }

        Ok(())
    }

    fn validate_services(&self) -> Result<()> {
        for (name, service) in [
            ("geo", &self.services.geo),
            ("rate", &self.services.rate),
            ("profile", &self.services.profile),
        ] {
            if !service.base_url.starts_with("http://") && !service.base_url.starts_with("https://")
            {
                return Err(HotelGatewayError::config(format!(
                    "The {name} service base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }

            if service.timeout_seconds > 300 {
                return Err(HotelGatewayError::config(format!(
                    "The {name} service timeout cannot exceed 300 seconds"
                ))
                .into());
            }
        }

        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(HotelGatewayError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(HotelGatewayError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
