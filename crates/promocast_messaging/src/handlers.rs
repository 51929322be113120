//! HTTP handlers for inbound push messages and topic management.
//!
//! The push transport (or anything standing in for it) posts the raw data map
//! of a message to `/messages`; topic membership is changed with
//! `PUT`/`DELETE /topics/{topic}`. Topic calls are fire-and-forget and answer
//! `202 Accepted` before the transport has been contacted.

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use promocast_common::models::LaunchTarget;
use promocast_common::{validation_error, PromocastError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::client::normalize_topic;
use crate::dispatcher::NotificationDispatcher;
use crate::setup::MessagingSetup;

/// Shared state for the messaging handlers
#[derive(Clone)]
pub struct MessagingState {
    /// Turns inbound payloads into notifications
    pub dispatcher: Arc<NotificationDispatcher>,

    /// Topic subscription surface
    pub setup: Arc<MessagingSetup>,
}

/// Request body for delivering a push message
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InboundMessage {
    /// The key-value data payload of the push message
    ///
    /// Recognised keys: `icon`, `title`, `short_desc`, `feature`, `long_desc`,
    /// `package`, `crossPromotion`.
    pub data: HashMap<String, String>,
}

/// Response body for an accepted push message
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageAccepted {
    /// Always true; rejected messages get an error body instead
    pub accepted: bool,

    /// Identifier the notification is displayed under
    pub notification_id: i32,

    /// `app` when a tap opens the installed app, `store` for the store listing
    pub destination: String,

    /// Target app identifier
    pub package: String,
}

/// Response body for topic requests
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TopicRequestAccepted {
    /// Topic name without the `/topics/` prefix
    pub topic: String,

    /// `subscribe` or `unsubscribe`
    pub action: String,
}

/// Handler for inbound push messages
///
/// # Responses
///
/// - 202 Accepted: the notification is being composed
/// - 422 Unprocessable Entity: required fields missing or no target app
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/messages",
    request_body = InboundMessage,
    responses(
        (status = 202, description = "Notification accepted", body = MessageAccepted),
        (status = 422, description = "Payload rejected")
    ),
    tag = "Messaging"
))]
pub async fn receive_message_handler(
    State(state): State<Arc<MessagingState>>,
    Json(message): Json<InboundMessage>,
) -> Response {
    debug!("Inbound push message with {} key(s)", message.data.len());

    match state.dispatcher.dispatch(&message.data) {
        Ok(dispatched) => {
            let destination = match &dispatched.target {
                LaunchTarget::OpenApp(_) => "app",
                LaunchTarget::OpenStoreListing(_) => "store",
            };

            (
                StatusCode::ACCEPTED,
                Json(MessageAccepted {
                    accepted: true,
                    notification_id: dispatched.notification_id,
                    destination: destination.to_string(),
                    package: dispatched.target.package().to_string(),
                }),
            )
                .into_response()
        }
        Err(rejection) => PromocastError::from(rejection).into_response(),
    }
}

/// Handler for subscribing to a topic
///
/// Runs the full setup (initialization, channel, subscription) in the
/// background.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/topics/{topic}",
    params(("topic" = String, Path, description = "Topic name")),
    responses(
        (status = 202, description = "Subscription requested", body = TopicRequestAccepted),
        (status = 422, description = "Invalid topic name")
    ),
    tag = "Messaging"
))]
pub async fn subscribe_topic_handler(
    State(state): State<Arc<MessagingState>>,
    Path(topic): Path<String>,
) -> Response {
    let topic = match normalize_topic(&topic) {
        Ok(name) => name.to_string(),
        Err(err) => return validation_error(err).into_response(),
    };

    info!("Subscription to topic '{}' requested", topic);
    let setup = Arc::clone(&state.setup);
    let background_topic = topic.clone();
    tokio::spawn(async move { setup.setup(&background_topic).await });

    accepted(topic, "subscribe")
}

/// Handler for unsubscribing from a topic
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/topics/{topic}",
    params(("topic" = String, Path, description = "Topic name")),
    responses(
        (status = 202, description = "Unsubscription requested", body = TopicRequestAccepted),
        (status = 422, description = "Invalid topic name")
    ),
    tag = "Messaging"
))]
pub async fn unsubscribe_topic_handler(
    State(state): State<Arc<MessagingState>>,
    Path(topic): Path<String>,
) -> Response {
    let topic = match normalize_topic(&topic) {
        Ok(name) => name.to_string(),
        Err(err) => return validation_error(err).into_response(),
    };

    info!("Removal of topic '{}' requested", topic);
    let setup = Arc::clone(&state.setup);
    let background_topic = topic.clone();
    tokio::spawn(async move { setup.remove_subscription(&background_topic).await });

    accepted(topic, "unsubscribe")
}

fn accepted(topic: String, action: &str) -> Response {
    (
        StatusCode::ACCEPTED,
        Json(TopicRequestAccepted {
            topic,
            action: action.to_string(),
        }),
    )
        .into_response()
}
