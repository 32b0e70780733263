use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::payments::types::PaymentOutcome;

pub struct StaticState {
    pub root: Arc<str>,
}

/// Router fallback: GET/HEAD resolve against the static directory with
/// `index.html` as the default document; every other method on an unknown
/// path is a JSON 404, keeping the whole surface machine-readable.
pub async fn serve_static(State(state): State<Arc<StaticState>>, request: Request) -> Response {
    if request.method() == Method::GET || request.method() == Method::HEAD {
        let serve_dir = ServeDir::new(state.root.as_ref());
        match serve_dir.oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        }
    } else {
        not_found().into_response()
    }
}

fn not_found() -> (StatusCode, Json<PaymentOutcome>) {
    (
        StatusCode::NOT_FOUND,
        Json(PaymentOutcome::failure("Not found")),
    )
}
