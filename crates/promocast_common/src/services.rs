// --- File: crates/promocast_common/src/services.rs ---
//! Platform port abstractions.
//!
//! The composer never talks to a platform directly. Notification display, the
//! app registry, image loading and the messaging transport are reached through
//! these traits so the pipeline can run against fakes in tests and against
//! the concrete adapters in the backend.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::models::{AppLookup, Bitmap, NotificationChannel, NotificationContent};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

impl From<String> for BoxedError {
    fn from(message: String) -> Self {
        BoxedError(message.into())
    }
}

impl From<&str> for BoxedError {
    fn from(message: &str) -> Self {
        BoxedError(message.into())
    }
}

/// Asynchronous image loading.
///
/// One URL per call, single-shot; the caller never retries or cancels.
pub trait ImageFetcher: Send + Sync {
    /// Load the image at `url`.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Bitmap, BoxedError>;
}

/// Notification display and channel management.
pub trait NotificationPort: Send + Sync {
    /// Show `content` under `id`. Calling again with the same id replaces the
    /// notification shown under it.
    fn display(&self, id: i32, content: &NotificationContent);

    /// Create `channel` unless it already exists.
    fn ensure_channel(&self, channel: &NotificationChannel) -> Result<(), BoxedError>;
}

/// Lookup of installed apps.
pub trait AppRegistry: Send + Sync {
    /// Look up `package`. An unknown identifier is `AppLookup::NotFound`.
    fn lookup(&self, package: &str) -> AppLookup;
}

/// Push transport: initialization and topic membership.
pub trait MessagingTransport: Send + Sync {
    /// Prepare the transport for use.
    fn initialize(&self) -> BoxFuture<'_, (), BoxedError>;

    /// Subscribe this client to `topic`.
    fn subscribe<'a>(&'a self, topic: &'a str) -> BoxFuture<'a, (), BoxedError>;

    /// Unsubscribe this client from `topic`.
    fn unsubscribe<'a>(&'a self, topic: &'a str) -> BoxFuture<'a, (), BoxedError>;
}
