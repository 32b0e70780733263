use axum::extract::rejection::StringRejection;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{info, warn};

use crate::payments::error::ForwardError;
use crate::payments::forwarder::JamboPayForwarder;
use crate::payments::types::PaymentOutcome;

pub struct PaymentsState {
    pub forwarder: Arc<JamboPayForwarder>,
}

/// POST /process-payment
///
/// Every completed call answers with the JSON envelope: body and validation
/// failures as 400, everything else (including upstream failures) as 200.
pub async fn process_payment(
    State(state): State<Arc<PaymentsState>>,
    body: Result<String, StringRejection>,
) -> impl IntoResponse {
    let body = match body {
        Ok(b) => b,
        Err(e) => {
            warn!(error = %e, "rejecting unreadable payment request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(PaymentOutcome::failure(format!("Invalid request body: {}", e))),
            );
        }
    };

    let payload: JsonValue = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "rejecting unparseable payment request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(PaymentOutcome::failure(format!("Invalid JSON body: {}", e))),
            );
        }
    };

    info!("new payment request received");

    let payment = match state.forwarder.validate(&payload) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "payment request failed validation");
            // The envelope carries the bare message, not the error prefix.
            let message = match &e {
                ForwardError::Validation { message, .. } => message.clone(),
                other => other.to_string(),
            };
            return (
                StatusCode::BAD_REQUEST,
                Json(PaymentOutcome::failure(message)),
            );
        }
    };

    let outcome = state.forwarder.forward(payment).await;
    info!(success = outcome.success, "payment request completed");
    (StatusCode::OK, Json(outcome))
}
