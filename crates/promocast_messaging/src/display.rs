//! Notification port that renders into the log.
//!
//! Used by the backend service, where there is no notification shade: every
//! display call becomes one structured `tracing` record.

use std::collections::HashMap;
use std::sync::Mutex;

use promocast_common::models::{NotificationChannel, NotificationContent, NotificationLayout};
use promocast_common::services::{BoxedError, NotificationPort};
use tracing::info;

/// Logs notifications and remembers the channels that were created.
#[derive(Debug, Default)]
pub struct TracingDisplay {
    channels: Mutex<HashMap<String, NotificationChannel>>,
}

impl TracingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of channels created so far.
    pub fn channel_count(&self) -> usize {
        self.channels.lock().map(|channels| channels.len()).unwrap_or(0)
    }
}

impl NotificationPort for TracingDisplay {
    fn display(&self, id: i32, content: &NotificationContent) {
        let (layout, icon_loaded, feature_loaded) = match &content.layout {
            NotificationLayout::Standard => (
                "standard",
                content.large_icon.is_some(),
                content.big_picture.is_some(),
            ),
            NotificationLayout::CrossPromotion { icon, feature } => {
                ("cross_promotion", icon.is_loaded(), feature.is_loaded())
            }
        };

        info!(
            notification_id = id,
            channel = %content.channel_id,
            layout,
            title = %content.title,
            body = %content.body,
            icon_loaded,
            feature_loaded,
            click = %content.click.uri,
            "notification displayed"
        );
    }

    fn ensure_channel(&self, channel: &NotificationChannel) -> Result<(), BoxedError> {
        let mut channels = self
            .channels
            .lock()
            .map_err(|_| BoxedError::from("channel registry poisoned"))?;

        if !channels.contains_key(&channel.id) {
            info!(
                "Creating notification channel '{}' ({:?})",
                channel.id, channel.importance
            );
            channels.insert(channel.id.clone(), channel.clone());
        }
        Ok(())
    }
}
