// --- File: crates/promocast_common/src/models.rs ---

// Data structures shared between the platform ports and the composer:
// fetched images, notification channels, rendered notification content and
// launch targets.

use promocast_config::ChannelImportance;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fetched image, kept as the raw encoded bytes the server sent.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Encoded image data
    pub bytes: Vec<u8>,

    /// MIME type reported by the image source, e.g. `image/png`
    pub content_type: String,
}

impl Bitmap {
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Image bytes are noise in logs.
impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A notification channel notifications are posted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    pub importance: ChannelImportance,
}

/// Where a tap on the notification leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "package", rename_all = "snake_case")]
pub enum LaunchTarget {
    /// Launch the installed app
    OpenApp(String),
    /// Send the user to the store listing of the app
    OpenStoreListing(String),
}

impl LaunchTarget {
    /// The app identifier this target points at.
    pub fn package(&self) -> &str {
        match self {
            LaunchTarget::OpenApp(package) | LaunchTarget::OpenStoreListing(package) => package,
        }
    }
}

/// Click action attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickAction {
    pub target: LaunchTarget,

    /// Concrete URI the platform opens: the launch activity of the installed
    /// app, or the store listing URL.
    pub uri: String,
}

/// State of one image slot of the cross-promotion layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageSlot {
    #[default]
    Placeholder,
    Loaded(Bitmap),
}

impl ImageSlot {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ImageSlot::Loaded(_))
    }
}

/// Layout of the notification body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationLayout {
    /// Platform title/body layout with optional large icon and big picture
    Standard,
    /// Custom two-slot layout advertising another app
    CrossPromotion { icon: ImageSlot, feature: ImageSlot },
}

/// Everything needed to put a notification on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub channel_id: String,
    pub title: String,
    pub body: String,
    /// Expanded text, carried but not used by either layout
    pub long_text: Option<String>,
    pub large_icon: Option<Bitmap>,
    pub big_picture: Option<Bitmap>,
    pub layout: NotificationLayout,
    pub click: ClickAction,
    pub auto_cancel: bool,
}

impl NotificationContent {
    pub fn has_big_picture(&self) -> bool {
        self.big_picture.is_some()
    }
}

/// Result of asking the app registry about an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppLookup {
    Found(AppInfo),
    NotFound,
}

/// What the registry knows about an installed app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub package: String,
    pub enabled: bool,
    /// Entry point used to launch the app, if it has one
    pub launch_activity: Option<String>,
}
