//! Firebase Cloud Messaging topic client.
//!
//! Topic membership of a registration token is managed through the FCM
//! Instance ID API:
//!
//! - subscribe: `POST {base}/iid/v1/{token}/rel/topics/{topic}`
//! - unsubscribe: `POST {base}/iid/v1:batchRemove` with the topic and token in
//!   the body
//!
//! [`FcmTopicClient`] is the production [`MessagingTransport`].

use promocast_common::services::{BoxFuture, BoxedError, MessagingTransport};
use promocast_common::HTTP_CLIENT;
use promocast_config::FirebaseConfig;
use reqwest::{header, Client};
use serde::Serialize;
use tracing::debug;

use crate::auth::Credentials;
use crate::error::MessagingError;

/// Production Instance ID endpoint.
pub const IID_BASE_URL: &str = "https://iid.googleapis.com";

const TOPIC_PREFIX: &str = "/topics/";

/// Body of a batch add/remove request.
#[derive(Debug, Serialize)]
pub struct TopicBatchRequest {
    /// Topic in `/topics/{name}` form
    pub to: String,

    /// Registration tokens the relation is changed for
    pub registration_tokens: Vec<String>,
}

/// Client managing the topic subscriptions of one registration token.
pub struct FcmTopicClient {
    /// HTTP client for making requests to the Instance ID API
    client: Client,

    /// Firebase configuration, including the registration token
    config: FirebaseConfig,

    /// Base URL of the Instance ID API
    base_url: String,
}

impl FcmTopicClient {
    /// Creates a client against the production Instance ID API.
    pub fn new(config: FirebaseConfig) -> Self {
        Self::with_base_url(config, IID_BASE_URL)
    }

    /// Creates a client against another Instance ID endpoint.
    pub fn with_base_url(config: FirebaseConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            config,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn registration_token(&self) -> Result<&str, MessagingError> {
        self.config
            .registration_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                MessagingError::ConfigError(
                    "Missing registration_token in FirebaseConfig".to_string(),
                )
            })
    }

    async fn bearer(&self) -> Result<String, MessagingError> {
        let credentials = Credentials::from_config(&self.config)?;
        Ok(format!("Bearer {}", credentials.access_token().await?))
    }

    /// Checks configuration and that an access token can be obtained.
    pub async fn verify(&self) -> Result<(), MessagingError> {
        self.registration_token()?;
        self.bearer().await.map(|_| ())
    }

    /// Subscribes the configured registration token to `topic`.
    pub async fn subscribe_topic(&self, topic: &str) -> Result<(), MessagingError> {
        let topic = normalize_topic(topic)?;
        let token = self.registration_token()?;
        let url = format!("{}/iid/v1/{}/rel/topics/{}", self.base_url, token, topic);

        debug!("Subscribing registration token to topic '{}'", topic);

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.bearer().await?)
            .header("access_token_auth", "true")
            .header(header::CONTENT_LENGTH, 0)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(MessagingError::ApiError(error_text));
        }

        Ok(())
    }

    /// Removes the configured registration token from `topic`.
    pub async fn unsubscribe_topic(&self, topic: &str) -> Result<(), MessagingError> {
        let topic = normalize_topic(topic)?;
        let token = self.registration_token()?;
        let url = format!("{}/iid/v1:batchRemove", self.base_url);

        debug!("Unsubscribing registration token from topic '{}'", topic);

        let request = TopicBatchRequest {
            to: format!("{}{}", TOPIC_PREFIX, topic),
            registration_tokens: vec![token.to_string()],
        };

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.bearer().await?)
            .header("access_token_auth", "true")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(MessagingError::ApiError(error_text));
        }

        Ok(())
    }
}

impl MessagingTransport for FcmTopicClient {
    fn initialize(&self) -> BoxFuture<'_, (), BoxedError> {
        Box::pin(async move { self.verify().await.map_err(boxed) })
    }

    fn subscribe<'a>(&'a self, topic: &'a str) -> BoxFuture<'a, (), BoxedError> {
        Box::pin(async move { self.subscribe_topic(topic).await.map_err(boxed) })
    }

    fn unsubscribe<'a>(&'a self, topic: &'a str) -> BoxFuture<'a, (), BoxedError> {
        Box::pin(async move { self.unsubscribe_topic(topic).await.map_err(boxed) })
    }
}

fn boxed(err: MessagingError) -> BoxedError {
    BoxedError(Box::new(err))
}

/// Whether `topic` is a valid FCM topic name (`[a-zA-Z0-9-_.~%]+`).
pub fn is_valid_topic(topic: &str) -> bool {
    !topic.is_empty()
        && topic
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | '%'))
}

/// Strips an optional `/topics/` prefix and validates the remaining name.
pub fn normalize_topic(topic: &str) -> Result<&str, MessagingError> {
    let name = topic.strip_prefix(TOPIC_PREFIX).unwrap_or(topic);
    if is_valid_topic(name) {
        Ok(name)
    } else {
        Err(MessagingError::SubscriptionFailure {
            topic: topic.to_string(),
            message: "invalid topic name".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_names() {
        assert!(is_valid_topic("weekly_deals"));
        assert!(is_valid_topic("news-en.v2~%20"));
        assert!(!is_valid_topic(""));
        assert!(!is_valid_topic("two words"));
        assert!(!is_valid_topic("a/b"));
    }

    #[test]
    fn test_normalize_strips_prefix() {
        assert_eq!(normalize_topic("/topics/deals").unwrap(), "deals");
        assert_eq!(normalize_topic("deals").unwrap(), "deals");
        assert!(normalize_topic("/topics/").is_err());
    }
}
