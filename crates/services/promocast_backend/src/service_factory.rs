// --- File: crates/services/promocast_backend/src/service_factory.rs ---
//! Builds the platform ports from configuration.

use promocast_common::models::NotificationChannel;
use promocast_common::services::{
    AppRegistry, BoxFuture, BoxedError, ImageFetcher, MessagingTransport, NotificationPort,
};
use promocast_common::PromocastError;
use promocast_config::AppConfig;
use promocast_messaging::client::FcmTopicClient;
use promocast_messaging::display::TracingDisplay;
use promocast_messaging::image::HttpImageFetcher;
use promocast_messaging::registry::ConfiguredAppRegistry;
use promocast_messaging::MessagingError;
use std::sync::Arc;
use tracing::{info, warn};

/// The concrete ports the service runs with.
pub struct PlatformServices {
    pub notifier: Arc<dyn NotificationPort>,
    pub images: Arc<dyn ImageFetcher>,
    pub registry: Arc<dyn AppRegistry>,
    pub transport: Arc<dyn MessagingTransport>,
    pub channel: NotificationChannel,
}

impl PlatformServices {
    pub fn from_config(config: &AppConfig) -> Result<Self, PromocastError> {
        let messaging = &config.messaging;

        let transport: Arc<dyn MessagingTransport> = match &config.firebase {
            Some(firebase) => {
                info!("Using FCM topic client");
                Arc::new(FcmTopicClient::new(firebase.clone()))
            }
            None => {
                warn!("No firebase section configured; topic subscriptions will fail");
                Arc::new(UnconfiguredTransport)
            }
        };

        info!("{} installed app(s) configured", config.apps.len());

        Ok(Self {
            notifier: Arc::new(TracingDisplay::new()),
            images: Arc::new(HttpImageFetcher::new(
                messaging.image_timeout_secs,
                messaging.max_image_bytes,
            )?),
            registry: Arc::new(ConfiguredAppRegistry::new(&config.apps)),
            transport,
            channel: NotificationChannel {
                id: messaging.channel_id.clone(),
                name: messaging.channel_name.clone(),
                importance: messaging.channel_importance,
            },
        })
    }
}

/// Transport used when no Firebase credentials are configured.
struct UnconfiguredTransport;

impl UnconfiguredTransport {
    fn error() -> BoxedError {
        BoxedError(Box::new(MessagingError::ConfigError(
            "firebase section missing".to_string(),
        )))
    }
}

impl MessagingTransport for UnconfiguredTransport {
    fn initialize(&self) -> BoxFuture<'_, (), BoxedError> {
        Box::pin(async { Err(Self::error()) })
    }

    fn subscribe<'a>(&'a self, _topic: &'a str) -> BoxFuture<'a, (), BoxedError> {
        Box::pin(async { Err(Self::error()) })
    }

    fn unsubscribe<'a>(&'a self, _topic: &'a str) -> BoxFuture<'a, (), BoxedError> {
        Box::pin(async { Err(Self::error()) })
    }
}
