//! Push notification composition for promocast.
//!
//! This crate turns inbound push message payloads into displayed
//! notifications and manages the topic subscriptions that bring those
//! messages in.
//!
//! # Pipeline
//!
//! 1. [`payload::validate`] checks the raw key-value map.
//! 2. [`destination::DestinationResolver`] decides whether a tap opens the
//!    installed app or its store listing.
//! 3. [`composer::Composer`] lays out the notification in simple or
//!    cross-promotion mode, loads icon and feature image concurrently and
//!    displays it through the [`NotificationPort`](promocast_common::services::NotificationPort).
//!
//! [`dispatcher::NotificationDispatcher`] ties the steps together and gives
//! every message a unique display identifier.
//!
//! # Setup
//!
//! [`setup::MessagingSetup`] initializes the transport once, creates the
//! notification channel and subscribes to topics. The production transport
//! is [`client::FcmTopicClient`], which talks to the FCM Instance ID API.
//!
//! # Features
//!
//! - `openapi`: OpenAPI documentation of the HTTP routes
//!
//! # Example
//!
//! ```rust,no_run
//! use promocast_messaging::composer::Composer;
//! use promocast_messaging::dispatcher::NotificationDispatcher;
//! use promocast_messaging::display::TracingDisplay;
//! use promocast_messaging::identity::NotificationIds;
//! use promocast_messaging::image::HttpImageFetcher;
//! use promocast_messaging::registry::ConfiguredAppRegistry;
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! async fn show() -> Result<(), Box<dyn std::error::Error>> {
//!     let composer = Composer::new(
//!         Arc::new(TracingDisplay::new()),
//!         Arc::new(HttpImageFetcher::new(30, 5 * 1024 * 1024)?),
//!         "promocast_default",
//!     );
//!     let dispatcher = NotificationDispatcher::new(
//!         Arc::new(composer),
//!         Arc::new(ConfiguredAppRegistry::default()),
//!         NotificationIds::time_seeded(),
//!         "https://play.google.com/store/apps/details?id={package}",
//!     );
//!
//!     let mut data = HashMap::new();
//!     data.insert("icon".to_string(), "https://example.com/icon.png".to_string());
//!     data.insert("title".to_string(), "Sale".to_string());
//!     data.insert("short_desc".to_string(), "50% off".to_string());
//!     data.insert("package".to_string(), "com.example.app".to_string());
//!
//!     let report = dispatcher.handle_message(&data).await?;
//!     println!("displayed as {}", report.notification_id);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod composer;
pub mod destination;
pub mod dispatcher;
pub mod display;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod image;
pub mod payload;
pub mod registry;
pub mod routes;
pub mod setup;

// Re-export the routes function to be used by the backend service
pub use routes::routes;

pub use composer::{ComposeReport, Composer};
pub use dispatcher::NotificationDispatcher;
pub use error::{MessagingError, PayloadRejection};
pub use payload::{NotificationPayload, RenderMode};
pub use setup::MessagingSetup;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::MessagingApiDoc;
}
