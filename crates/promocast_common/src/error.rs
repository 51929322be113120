// --- File: crates/promocast_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all promocast errors.
///
/// Crate-specific errors convert into this type at the HTTP boundary.
#[derive(Error, Debug)]
pub enum PromocastError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Inbound data was rejected
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for PromocastError {
    fn status_code(&self) -> u16 {
        match self {
            PromocastError::HttpError(_) => 500,
            PromocastError::ParseError(_) => 400,
            PromocastError::ConfigError(_) => 500,
            PromocastError::AuthError(_) => 401,
            PromocastError::ValidationError(_) => 422,
            PromocastError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, PromocastError>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, PromocastError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| PromocastError::InternalError(format!("{}: {}", context, error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for PromocastError {
    fn from(err: reqwest::Error) -> Self {
        PromocastError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for PromocastError {
    fn from(err: serde_json::Error) -> Self {
        PromocastError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for PromocastError {
    fn from(err: std::io::Error) -> Self {
        PromocastError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> PromocastError {
    PromocastError::ValidationError(message.to_string())
}
