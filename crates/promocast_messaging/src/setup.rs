//! Messaging setup: initialization, notification channel, topic membership.
//!
//! Everything here is fire-and-forget. Failures are logged and the remaining
//! steps still run; callers never see an error.

use std::sync::Arc;

use promocast_common::log_result;
use promocast_common::models::NotificationChannel;
use promocast_common::services::{MessagingTransport, NotificationPort};
use tokio::sync::OnceCell;
use tracing::{debug, error, warn};

use crate::error::MessagingError;

/// Public setup surface.
pub struct MessagingSetup {
    transport: Arc<dyn MessagingTransport>,
    notifier: Arc<dyn NotificationPort>,
    channel: NotificationChannel,
    initialized: OnceCell<()>,
}

impl MessagingSetup {
    pub fn new(
        transport: Arc<dyn MessagingTransport>,
        notifier: Arc<dyn NotificationPort>,
        channel: NotificationChannel,
    ) -> Self {
        Self {
            transport,
            notifier,
            channel,
            initialized: OnceCell::new(),
        }
    }

    /// Initialize messaging (once), make sure the notification channel
    /// exists, then subscribe to `topic`.
    pub async fn setup(&self, topic: &str) {
        if let Err(err) = self.ensure_initialized().await {
            error!("{}; continuing setup", err);
        }

        if let Err(err) = self.ensure_channel() {
            warn!("{}", err);
        }

        let result = self.transport.subscribe(topic).await.map_err(|err| {
            MessagingError::SubscriptionFailure {
                topic: topic.to_string(),
                message: err.to_string(),
            }
        });
        let _ = log_result(
            result,
            &format!("Subscribed to topic '{}'", topic),
            "Topic subscription request failed",
        );
    }

    /// Ask the transport to drop the subscription to `topic`.
    pub async fn remove_subscription(&self, topic: &str) {
        let result = self.transport.unsubscribe(topic).await.map_err(|err| {
            MessagingError::SubscriptionFailure {
                topic: topic.to_string(),
                message: err.to_string(),
            }
        });
        let _ = log_result(
            result,
            &format!("Unsubscribed from topic '{}'", topic),
            "Topic unsubscription request failed",
        );
    }

    /// Whether initialization has succeeded at least once.
    pub fn is_initialized(&self) -> bool {
        self.initialized.initialized()
    }

    /// Runs the transport initialization until it succeeds once; later calls
    /// return immediately. A failed attempt is retried on the next call.
    async fn ensure_initialized(&self) -> Result<(), MessagingError> {
        self.initialized
            .get_or_try_init(|| async {
                debug!("Initializing messaging transport");
                self.transport
                    .initialize()
                    .await
                    .map_err(|err| MessagingError::InitFailure(err.to_string()))
            })
            .await
            .map(|_| ())
    }

    fn ensure_channel(&self) -> Result<(), MessagingError> {
        self.notifier
            .ensure_channel(&self.channel)
            .map_err(|err| MessagingError::ChannelCreationFailure(err.to_string()))
    }
}
