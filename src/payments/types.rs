use crate::payments::error::{ForwardError, ForwardResult};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Required inbound fields, in validation order. The first missing one wins.
pub const REQUIRED_FIELDS: [&str; 5] = ["amount", "currency", "email", "phone", "description"];

/// Presence check with falsy semantics: `null`, `""`, `0`, `false`, and
/// empty collections all count as missing. Browser forms routinely submit
/// empty strings and zeroes, and callers depend on those being rejected.
pub fn is_missing(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) => true,
        Some(JsonValue::Bool(b)) => !b,
        Some(JsonValue::Number(n)) => n.as_f64().map(|v| v == 0.0).unwrap_or(false),
        Some(JsonValue::String(s)) => s.is_empty(),
        Some(JsonValue::Array(a)) => a.is_empty(),
        Some(JsonValue::Object(o)) => o.is_empty(),
    }
}

/// A payment request that passed field and amount validation.
///
/// Field values stay as raw JSON so the upstream payload and the caller
/// envelope echo exactly what the client sent.
#[derive(Debug, Clone)]
pub struct ValidatedPayment {
    pub amount: JsonValue,
    pub currency: JsonValue,
    pub email: JsonValue,
    pub phone: JsonValue,
    pub description: JsonValue,
    pub amount_value: f64,
}

/// Validate the raw request body: required fields in fixed order, then the
/// amount itself. `enforce_minimum` reflects the upstream variant that
/// applies a 1.00 floor.
pub fn validate_payment_request(
    body: &JsonValue,
    enforce_minimum: bool,
) -> ForwardResult<ValidatedPayment> {
    for field in REQUIRED_FIELDS {
        if is_missing(body.get(field)) {
            return Err(ForwardError::Validation {
                message: format!("Missing required field: {}", field),
                field: Some(field.to_string()),
            });
        }
    }

    let amount = &body["amount"];
    let amount_value = match amount {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or(ForwardError::Validation {
        message: "Invalid amount format".to_string(),
        field: Some("amount".to_string()),
    })?;

    if enforce_minimum && amount_value < 1.0 {
        return Err(ForwardError::Validation {
            message: "Minimum payment amount is 1.00".to_string(),
            field: Some("amount".to_string()),
        });
    }

    Ok(ValidatedPayment {
        amount: amount.clone(),
        currency: body["currency"].clone(),
        email: body["email"].clone(),
        phone: body["phone"].clone(),
        description: body["description"].clone(),
        amount_value,
    })
}

/// JSON body sent to the JamboPay payments API.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundPayload {
    pub command: &'static str,
    pub action: &'static str,
    pub merchant: String,
    pub amount: JsonValue,
    pub currency: JsonValue,
    pub description: JsonValue,
    pub reference: String,
    pub email: JsonValue,
    pub phone: JsonValue,
    pub callback_url: String,
    pub redirect_url: String,
    pub metadata: PayloadMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct PayloadMetadata {
    pub customer_email: JsonValue,
    pub customer_phone: JsonValue,
    pub business: String,
    pub source: &'static str,
}

/// The uniform envelope returned to the original caller, whatever shape the
/// upstream answered with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub success: bool,
    #[serde(rename = "transactionId", skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(rename = "paymentUrl", skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "apiResponse", skip_serializing_if = "Option::is_none")]
    pub api_response: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<JsonValue>,
}

impl PaymentOutcome {
    pub fn failure(error: impl Into<String>) -> Self {
        PaymentOutcome {
            success: false,
            transaction_id: None,
            payment_url: None,
            message: None,
            amount: None,
            currency: None,
            status: None,
            timestamp: None,
            error: Some(error.into()),
            api_response: None,
            debug: None,
        }
    }

    pub fn failure_with_response(error: impl Into<String>, api_response: JsonValue) -> Self {
        PaymentOutcome {
            api_response: Some(api_response),
            ..Self::failure(error)
        }
    }
}
