pub mod api;
pub mod config;
pub mod health;
pub mod logging;
pub mod middleware;
pub mod payments;

use crate::api::payments::PaymentsState;
use crate::api::static_files::StaticState;
use crate::payments::forwarder::JamboPayForwarder;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};

/// Assemble the application router.
///
/// One POST route for payment processing, a health probe, and a static-file
/// fallback for the browser form. Every response carries a permissive CORS
/// header so the form can be hosted cross-origin.
pub fn app(static_dir: &str, forwarder: Arc<JamboPayForwarder>) -> Router {
    let payments_state = Arc::new(PaymentsState { forwarder });
    let static_state = Arc::new(StaticState {
        root: Arc::from(static_dir),
    });

    Router::new()
        .route(
            "/process-payment",
            post(api::payments::process_payment).with_state(payments_state),
        )
        .route("/health", get(health::health))
        .fallback(api::static_files::serve_static)
        .with_state(static_state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(
                    middleware::logging::UuidRequestId,
                ))
                .layer(axum::middleware::from_fn(
                    middleware::logging::request_logging_middleware,
                ))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}
