//! Entry point for inbound push messages.
//!
//! Validation and destination resolution run synchronously on the caller;
//! composition runs in its own task that exclusively owns the notification
//! until it has been displayed.

use std::collections::HashMap;
use std::sync::Arc;

use promocast_common::models::{ClickAction, LaunchTarget};
use promocast_common::services::AppRegistry;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::composer::{ComposeReport, Composer};
use crate::destination::DestinationResolver;
use crate::error::PayloadRejection;
use crate::identity::NotificationIds;
use crate::payload::{validate, NotificationPayload};

/// A message that passed validation and is being composed.
#[derive(Debug)]
pub struct Dispatched {
    pub notification_id: i32,
    pub target: LaunchTarget,
    pub task: JoinHandle<ComposeReport>,
}

/// Turns inbound payload maps into displayed notifications.
pub struct NotificationDispatcher {
    composer: Arc<Composer>,
    registry: Arc<dyn AppRegistry>,
    ids: NotificationIds,
    store_url_template: String,
}

impl NotificationDispatcher {
    pub fn new(
        composer: Arc<Composer>,
        registry: Arc<dyn AppRegistry>,
        ids: NotificationIds,
        store_url_template: impl Into<String>,
    ) -> Self {
        Self {
            composer,
            registry,
            ids,
            store_url_template: store_url_template.into(),
        }
    }

    /// Validate `raw` and start composing its notification in a new task.
    ///
    /// A rejected payload has no side effects: no identifier is consumed and
    /// nothing is displayed. Must be called from within a tokio runtime.
    pub fn dispatch(&self, raw: &HashMap<String, String>) -> Result<Dispatched, PayloadRejection> {
        let (notification_id, payload, click) = self.prepare(raw)?;
        let target = click.target.clone();

        let composer = Arc::clone(&self.composer);
        let task =
            tokio::spawn(async move { composer.compose(notification_id, &payload, click).await });

        Ok(Dispatched {
            notification_id,
            target,
            task,
        })
    }

    /// Validate `raw` and compose its notification on the current task.
    pub async fn handle_message(
        &self,
        raw: &HashMap<String, String>,
    ) -> Result<ComposeReport, PayloadRejection> {
        let (notification_id, payload, click) = self.prepare(raw)?;
        Ok(self.composer.compose(notification_id, &payload, click).await)
    }

    fn prepare(
        &self,
        raw: &HashMap<String, String>,
    ) -> Result<(i32, NotificationPayload, ClickAction), PayloadRejection> {
        let payload = validate(raw).inspect_err(|rejection| {
            warn!("Discarding push message: {}", rejection);
        })?;

        let resolver = DestinationResolver::new(self.registry.as_ref(), &self.store_url_template);
        let click = resolver.click_action(&payload.target_app);
        let notification_id = self.ids.next_id();

        debug!(
            "Push message accepted as notification {} -> {:?}",
            notification_id, click.target
        );

        Ok((notification_id, payload, click))
    }
}
