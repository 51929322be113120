//! Error types for the messaging crate.

use promocast_common::{validation_error, PromocastError};
use thiserror::Error;

/// Why an inbound payload did not produce a notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadRejection {
    /// One of `icon`, `title`, `short_desc` is absent or empty
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// `package` is absent or empty, so there is nowhere to send the user
    #[error("no target app in payload")]
    NoTargetApp,
}

/// Errors raised while talking to Firebase Cloud Messaging or setting up the
/// notification plumbing.
#[derive(Error, Debug)]
pub enum MessagingError {
    /// Error during authentication with Firebase
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to Firebase API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Error returned by the Firebase API
    #[error("Firebase API error: {0}")]
    ApiError(String),

    /// Messaging could not be initialized
    #[error("Firebase initialization failed: {0}")]
    InitFailure(String),

    /// The notification channel could not be created
    #[error("Notification channel creation failed: {0}")]
    ChannelCreationFailure(String),

    /// Topic subscribe or unsubscribe failed
    #[error("Topic subscription failed for '{topic}': {message}")]
    SubscriptionFailure { topic: String, message: String },
}

impl From<PayloadRejection> for PromocastError {
    fn from(rejection: PayloadRejection) -> Self {
        validation_error(rejection)
    }
}
