//! Authentication for the Firebase APIs.
//!
//! Access tokens come either from a Google service account key file, for which
//! an OAuth2 token with the FCM scope is requested, or from a token issued
//! out-of-band and passed in configuration.

use promocast_config::FirebaseConfig;
use std::path::Path;
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

use crate::error::MessagingError;

/// Scope required by FCM and the Instance ID API.
pub const FIREBASE_MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

/// Where access tokens come from.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Service account key file on disk
    ServiceAccount { key_path: String },
    /// Pre-issued bearer token
    Static(String),
}

impl Credentials {
    /// Pick credentials from configuration; a configured access token wins
    /// over a key file.
    pub fn from_config(config: &FirebaseConfig) -> Result<Self, MessagingError> {
        if let Some(token) = config.access_token.as_deref().filter(|t| !t.is_empty()) {
            return Ok(Credentials::Static(token.to_string()));
        }

        config
            .key_path
            .as_deref()
            .map(|key_path| Credentials::ServiceAccount {
                key_path: key_path.to_string(),
            })
            .ok_or_else(|| {
                MessagingError::ConfigError(
                    "Missing key_path or access_token in FirebaseConfig".to_string(),
                )
            })
    }

    /// Obtain an access token valid for [`FIREBASE_MESSAGING_SCOPE`].
    ///
    /// # Errors
    ///
    /// Fails if the key file cannot be read, the OAuth2 exchange fails or no
    /// token is returned.
    pub async fn access_token(&self) -> Result<String, MessagingError> {
        match self {
            Credentials::Static(token) => Ok(token.clone()),
            Credentials::ServiceAccount { key_path } => {
                let sa_key = read_service_account_key(Path::new(key_path))
                    .await
                    .map_err(|e| {
                        MessagingError::AuthError(format!("reading {}: {}", key_path, e))
                    })?;

                let auth = ServiceAccountAuthenticator::builder(sa_key)
                    .build()
                    .await
                    .map_err(|e| MessagingError::AuthError(e.to_string()))?;

                let auth_token = auth
                    .token(&[FIREBASE_MESSAGING_SCOPE])
                    .await
                    .map_err(|e| MessagingError::AuthError(e.to_string()))?;

                auth_token
                    .token()
                    .map(str::to_string)
                    .ok_or_else(|| MessagingError::AuthError("No token available".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token_wins_over_key_path() {
        let config = FirebaseConfig {
            key_path: Some("/etc/promocast/sa.json".to_string()),
            access_token: Some("ya29.token".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            Credentials::from_config(&config),
            Ok(Credentials::Static(token)) if token == "ya29.token"
        ));
    }

    #[test]
    fn test_missing_credentials_is_config_error() {
        let config = FirebaseConfig::default();
        assert!(matches!(
            Credentials::from_config(&config),
            Err(MessagingError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_unreadable_key_file_is_auth_error() {
        let credentials = Credentials::ServiceAccount {
            key_path: "/nonexistent/service-account.json".to_string(),
        };

        assert!(matches!(
            credentials.access_token().await,
            Err(MessagingError::AuthError(_))
        ));
    }
}
