// --- File: crates/services/promocast_backend/src/app_state.rs ---
use promocast_common::PromocastError;
use promocast_config::AppConfig;
use promocast_messaging::composer::Composer;
use promocast_messaging::dispatcher::NotificationDispatcher;
use promocast_messaging::handlers::MessagingState;
use promocast_messaging::identity::NotificationIds;
use promocast_messaging::MessagingSetup;
use std::sync::Arc;

use crate::service_factory::PlatformServices;

/// Application state shared by the routes.
#[derive(Clone)]
pub struct AppState {
    /// The configuration loaded at startup.
    pub config: Arc<AppConfig>,

    /// Dispatcher and setup surface used by the messaging routes.
    pub messaging: Arc<MessagingState>,
}

impl AppState {
    /// Wire the pipeline from configuration.
    pub fn new(config: Arc<AppConfig>) -> Result<Self, PromocastError> {
        let services = PlatformServices::from_config(&config)?;

        let composer = Composer::new(
            Arc::clone(&services.notifier),
            services.images,
            config.messaging.channel_id.clone(),
        );
        let dispatcher = NotificationDispatcher::new(
            Arc::new(composer),
            services.registry,
            NotificationIds::time_seeded(),
            config.messaging.store_url_template.clone(),
        );
        let setup = MessagingSetup::new(services.transport, services.notifier, services.channel);

        Ok(Self {
            config,
            messaging: Arc::new(MessagingState {
                dispatcher: Arc::new(dispatcher),
                setup: Arc::new(setup),
            }),
        })
    }
}
