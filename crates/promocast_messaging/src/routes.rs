use axum::{
    routing::{post, put},
    Router,
};
use std::sync::Arc;
use tracing::info;

use crate::handlers::{
    receive_message_handler, subscribe_topic_handler, unsubscribe_topic_handler, MessagingState,
};

/// Create the messaging routes.
///
/// - `POST /messages` - deliver a push message payload
/// - `PUT /topics/{topic}` - set up messaging and subscribe to a topic
/// - `DELETE /topics/{topic}` - unsubscribe from a topic
pub fn routes(state: Arc<MessagingState>) -> Router {
    info!("Messaging routes initialized");

    Router::new()
        .route("/messages", post(receive_message_handler))
        .route(
            "/topics/{topic}",
            put(subscribe_topic_handler).delete(unsubscribe_topic_handler),
        )
        .with_state(state)
}
