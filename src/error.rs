//! Error types and handling for `TourAI` application

use thiserror::Error;

/// Main error type for the `TourAI` application
#[derive(Error, Debug)]
pub enum TourAiError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream API communication errors
    #[error("API error ({service}): {message}")]
    Api { service: String, message: String },
}

impl TourAiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error attributed to an upstream service
    pub fn api<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Api {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TourAiError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TourAiError::Api { service, .. } => {
                format!("The {service} service is unavailable right now. Please try again later.")
            }
        }
    }
}
