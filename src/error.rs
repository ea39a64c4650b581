//! Error types and handling for the hotel gateway

use thiserror::Error;

/// Main error type for the hotel gateway
#[derive(Error, Debug)]
pub enum HotelGatewayError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A backend service could not be reached or reported itself unavailable
    #[error("{service} service unavailable: {message}")]
    Unavailable { service: String, message: String },

    /// A backend service answered with a non-success status
    #[error("{service} service error: {message}")]
    Api { service: String, message: String },

    /// A backend service answered with a body that could not be decoded
    #[error("Invalid response from {service} service: {message}")]
    InvalidResponse { service: String, message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl HotelGatewayError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new unavailable-service error
    pub fn unavailable<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Unavailable {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a new backend API error
    pub fn api<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Api {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid-response error
    pub fn invalid_response<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::InvalidResponse {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Whether the fault came from a backend service rather than from local input
    #[must_use]
    pub fn is_downstream(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { .. } | Self::Api { .. } | Self::InvalidResponse { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            HotelGatewayError::Config { .. } => {
                "Configuration error. Please check your config file and service URLs.".to_string()
            }
            HotelGatewayError::Unavailable { service, .. } => {
                format!("The {service} service is currently unavailable.")
            }
            HotelGatewayError::Api { service, .. }
            | HotelGatewayError::InvalidResponse { service, .. } => {
                format!("The {service} service returned an unexpected response.")
            }
            HotelGatewayError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            HotelGatewayError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            HotelGatewayError::General { message } => message.clone(),
        }
    }
}
