use axum::{
    error_handling::HandleErrorLayer,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

use crate::error::handle_error;
use crate::handlers::health::health_check;
use crate::handlers::relay::{relay_registration, AppState};

pub fn create_router(app_state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/register", post(relay_registration))
        .with_state(app_state);

    // Everything else falls through to the page assets when they are configured
    let router = match static_dir {
        Some(dir) => {
            info!("Serving static assets from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    };

    // No request timeout: the outbound call is bounded only by the HTTP client
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_error))
            .load_shed()
            .concurrency_limit(64)
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer()),
    )
}

// Pages on other origins may post JSON to the relay
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}
