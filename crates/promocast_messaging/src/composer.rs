//! Notification composition.
//!
//! A [`PendingNotification`] moves through `Building → AwaitingImages(n) →
//! Displayed`. The composing future owns it exclusively; image fetches are
//! driven inside that future by a `FuturesUnordered`, so completions are
//! applied one at a time and need no locking.
//!
//! Display policy:
//! - Simple: one display call, issued by whichever completion resolves the
//!   last outstanding image (icon always, feature when present). A failed
//!   image only drops its visual element.
//! - Cross-promotion: an immediate display with placeholder slots, then one
//!   more display under the same id per completed fetch.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use promocast_common::models::{
    Bitmap, ClickAction, ImageSlot, NotificationContent, NotificationLayout,
};
use promocast_common::services::{BoxedError, ImageFetcher, NotificationPort};
use tracing::{debug, info, warn};

use crate::payload::{NotificationPayload, RenderMode};

/// Which image a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    Icon,
    Feature,
}

/// Composition progress of one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeState {
    Building,
    AwaitingImages(usize),
    Displayed,
}

/// Build-in-progress state of a single notification.
#[derive(Debug)]
pub struct PendingNotification {
    id: i32,
    mode: RenderMode,
    content: NotificationContent,
    icon_pending: bool,
    feature_pending: bool,
    state: ComposeState,
}

impl PendingNotification {
    /// Lay out the base content for `payload` in its render mode.
    pub fn new(id: i32, payload: &NotificationPayload, click: ClickAction, channel_id: &str) -> Self {
        let mode = payload.render_mode();
        let layout = match mode {
            RenderMode::Simple => NotificationLayout::Standard,
            RenderMode::CrossPromotion => NotificationLayout::CrossPromotion {
                icon: ImageSlot::Placeholder,
                feature: ImageSlot::Placeholder,
            },
        };

        Self {
            id,
            mode,
            content: NotificationContent {
                channel_id: channel_id.to_string(),
                title: payload.title.clone(),
                body: payload.short_desc.clone(),
                long_text: payload.long_desc.clone(),
                large_icon: None,
                big_picture: None,
                layout,
                click,
                auto_cancel: true,
            },
            icon_pending: false,
            feature_pending: false,
            state: ComposeState::Building,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn content(&self) -> &NotificationContent {
        &self.content
    }

    pub fn state(&self) -> ComposeState {
        self.state
    }

    /// Number of image fetches still outstanding.
    pub fn outstanding(&self) -> usize {
        usize::from(self.icon_pending) + usize::from(self.feature_pending)
    }

    fn await_images(&mut self, icon: bool, feature: bool) {
        self.icon_pending = icon;
        self.feature_pending = feature;
        self.state = ComposeState::AwaitingImages(self.outstanding());
    }

    /// Apply a finished fetch. Failure resolves the slot just like success;
    /// it only leaves the image out.
    pub fn apply(&mut self, role: ImageRole, result: Result<Bitmap, BoxedError>) {
        match role {
            ImageRole::Icon => self.icon_pending = false,
            ImageRole::Feature => self.feature_pending = false,
        }

        let bitmap = match result {
            Ok(bitmap) => bitmap,
            Err(err) => {
                warn!(
                    "Notification {}: {:?} image failed to load: {}",
                    self.id, role, err
                );
                return;
            }
        };

        match (&mut self.content.layout, role) {
            (NotificationLayout::Standard, ImageRole::Icon) => {
                self.content.large_icon = Some(bitmap);
            }
            (NotificationLayout::Standard, ImageRole::Feature) => {
                self.content.big_picture = Some(bitmap);
            }
            (NotificationLayout::CrossPromotion { icon, .. }, ImageRole::Icon) => {
                *icon = ImageSlot::Loaded(bitmap);
            }
            (NotificationLayout::CrossPromotion { feature, .. }, ImageRole::Feature) => {
                *feature = ImageSlot::Loaded(bitmap);
            }
        }
    }
}

/// Outcome of composing one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeReport {
    pub notification_id: i32,
    pub mode: RenderMode,
    pub display_calls: usize,
    pub images_requested: usize,
    pub images_loaded: usize,
}

/// Builds notifications and hands them to the notification port.
pub struct Composer {
    notifier: Arc<dyn NotificationPort>,
    images: Arc<dyn ImageFetcher>,
    channel_id: String,
}

type ImageFetch = BoxFuture<'static, (ImageRole, Result<Bitmap, BoxedError>)>;

impl Composer {
    pub fn new(
        notifier: Arc<dyn NotificationPort>,
        images: Arc<dyn ImageFetcher>,
        channel_id: impl Into<String>,
    ) -> Self {
        Self {
            notifier,
            images,
            channel_id: channel_id.into(),
        }
    }

    /// Compose and display the notification for `payload` under `id`.
    ///
    /// Resolves once the final display call has been issued. Never fails: an
    /// image that cannot be loaded is left out.
    pub async fn compose(
        &self,
        id: i32,
        payload: &NotificationPayload,
        click: ClickAction,
    ) -> ComposeReport {
        let mut pending = PendingNotification::new(id, payload, click, &self.channel_id);

        let mut fetches: FuturesUnordered<ImageFetch> = FuturesUnordered::new();
        fetches.push(self.fetch(ImageRole::Icon, payload.icon.clone()));
        if let Some(feature) = &payload.feature_image {
            fetches.push(self.fetch(ImageRole::Feature, feature.clone()));
        }
        let images_requested = fetches.len();
        pending.await_images(true, payload.feature_image.is_some());

        debug!(
            "Notification {} composing in {:?} mode, awaiting {} image(s)",
            id, pending.mode, images_requested
        );

        let mut display_calls = 0;
        if pending.mode == RenderMode::CrossPromotion {
            self.display(&pending);
            display_calls += 1;
        }

        let mut images_loaded = 0;
        while let Some((role, result)) = fetches.next().await {
            if result.is_ok() {
                images_loaded += 1;
            }
            pending.apply(role, result);
            pending.state = ComposeState::AwaitingImages(pending.outstanding());

            match pending.mode {
                RenderMode::CrossPromotion => {
                    self.display(&pending);
                    display_calls += 1;
                }
                RenderMode::Simple if pending.outstanding() == 0 => {
                    self.display(&pending);
                    display_calls += 1;
                }
                RenderMode::Simple => {}
            }
        }
        pending.state = ComposeState::Displayed;

        info!(
            "Notification {} displayed ({} of {} image(s) loaded, {} display call(s))",
            id, images_loaded, images_requested, display_calls
        );

        ComposeReport {
            notification_id: id,
            mode: pending.mode,
            display_calls,
            images_requested,
            images_loaded,
        }
    }

    fn fetch(&self, role: ImageRole, url: String) -> ImageFetch {
        let images = Arc::clone(&self.images);
        async move {
            let result = images.fetch(&url).await;
            (role, result)
        }
        .boxed()
    }

    fn display(&self, pending: &PendingNotification) {
        debug!(
            "Displaying notification {} (outstanding images: {})",
            pending.id,
            pending.outstanding()
        );
        self.notifier.display(pending.id, &pending.content);
    }
}
