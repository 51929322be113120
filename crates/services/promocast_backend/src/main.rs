// File: services/promocast_backend/src/main.rs
use axum::{routing::get, Router};
use promocast_common::{logging, PromocastError};
use promocast_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

mod app_state;
mod service_factory;

use app_state::AppState;

#[tokio::main]
async fn main() -> Result<(), PromocastError> {
    if cfg!(debug_assertions) {
        logging::init_with_level(Level::DEBUG);
    } else {
        logging::init();
    }

    let config = Arc::new(
        load_config().map_err(|e| PromocastError::ConfigError(e.to_string()))?,
    );
    let state = AppState::new(Arc::clone(&config))?;

    // Subscribe to the default topic without holding up the listener.
    let setup = Arc::clone(&state.messaging.setup);
    let default_topic = config.messaging.default_topic.clone();
    tokio::spawn(async move {
        setup.setup(&default_topic).await;
    });

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the promocast API!" }))
        .merge(promocast_messaging::routes(Arc::clone(&state.messaging)));

    #[allow(unused_mut)] // mutated when openapi is enabled
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use promocast_messaging::openapi::MessagingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Promocast API",
                version = "0.1.0",
                description = "Push message intake and topic management"
            ),
            components(),
            tags((name = "Promocast", description = "Core service endpoints")),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(MessagingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
