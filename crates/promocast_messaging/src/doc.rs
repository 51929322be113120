// #![cfg(feature = "openapi")] // not needed as we do this in lib.rs already!
use utoipa::OpenApi;

use crate::handlers::{InboundMessage, MessageAccepted, TopicRequestAccepted};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::receive_message_handler,
        crate::handlers::subscribe_topic_handler,
        crate::handlers::unsubscribe_topic_handler,
    ),
    components(
        schemas(
            InboundMessage,
            MessageAccepted,
            TopicRequestAccepted,
        )
    ),
    tags(
        (name = "Messaging", description = "Push message intake and topic subscriptions")
    ),
    servers(
        (url = "/api", description = "promocast API server")
    )
)]
pub struct MessagingApiDoc;
