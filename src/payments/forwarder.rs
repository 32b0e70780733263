use crate::config::JamboPayConfig;
use crate::payments::error::{ForwardError, ForwardResult};
use crate::payments::types::{
    validate_payment_request, OutboundPayload, PaymentOutcome, PayloadMetadata, ValidatedPayment,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Local;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde_json::{json, Value as JsonValue};
use tracing::{info, warn};

/// Validates inbound payment requests and relays them to the JamboPay API.
///
/// Delivery walks the configured candidate endpoints in order: any HTTP
/// response (success or not) ends the walk and is normalized; only
/// transport-level failures move on to the next candidate. All failure paths
/// come back as a `success: false` outcome, never as an error.
pub struct JamboPayForwarder {
    config: JamboPayConfig,
    endpoints: Vec<String>,
    http: Client,
}

impl JamboPayForwarder {
    pub fn new(config: JamboPayConfig) -> ForwardResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ForwardError::Network {
                message: format!("failed to initialize HTTP client: {}", e),
            })?;

        let endpoints = config.endpoint_urls();
        Ok(Self {
            config,
            endpoints,
            http,
        })
    }

    /// Field and amount validation, per the configured minimum-amount rule.
    pub fn validate(&self, body: &JsonValue) -> ForwardResult<ValidatedPayment> {
        validate_payment_request(body, self.config.enforce_minimum_amount)
    }

    fn generate_reference(&self) -> String {
        format!(
            "{}_{}",
            self.config.reference_prefix,
            Local::now().format("%Y%m%d%H%M%S")
        )
    }

    fn auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.config.client_id, self.config.client_secret);
        format!("Basic {}", BASE64.encode(credentials))
    }

    fn build_payload(&self, payment: &ValidatedPayment, reference: &str) -> OutboundPayload {
        let public_url = self.config.public_base_url.trim_end_matches('/');
        OutboundPayload {
            command: "request",
            action: "payment",
            merchant: self.config.merchant_name.clone(),
            amount: payment.amount.clone(),
            currency: payment.currency.clone(),
            description: payment.description.clone(),
            reference: reference.to_string(),
            email: payment.email.clone(),
            phone: payment.phone.clone(),
            callback_url: format!("{}/callback", public_url),
            redirect_url: format!("{}/success", public_url),
            metadata: PayloadMetadata {
                customer_email: payment.email.clone(),
                customer_phone: payment.phone.clone(),
                business: self.config.merchant_name.clone(),
                source: "jambopay-gateway",
            },
        }
    }

    /// Forward a validated payment upstream. Never fails: transport and
    /// upstream errors are folded into the returned outcome.
    pub async fn forward(&self, payment: ValidatedPayment) -> PaymentOutcome {
        let reference = self.generate_reference();
        let payload = self.build_payload(&payment, &reference);
        let auth = self.auth_header();

        let mut last_error: Option<ForwardError> = None;
        for (attempt, endpoint) in self.endpoints.iter().enumerate() {
            info!(endpoint = %endpoint, attempt = attempt + 1, reference = %reference,
                "sending payment request to JamboPay");

            let mut request = self
                .http
                .post(endpoint.as_str())
                .header(AUTHORIZATION, auth.as_str())
                .header(CONTENT_TYPE, "application/json")
                .header(USER_AGENT, self.config.user_agent.as_str());
            if self.config.send_accept_header {
                request = request.header(ACCEPT, "application/json");
            }

            match request.json(&payload).send().await {
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    info!(endpoint = %endpoint, status = %status, "JamboPay response received");
                    return self.normalize(
                        status.as_u16(),
                        &body,
                        &reference,
                        &payment,
                        endpoint,
                        attempt + 1,
                    );
                }
                Err(e) => {
                    let err = ForwardError::from_transport(e);
                    warn!(endpoint = %endpoint, attempt = attempt + 1, error = %err,
                        "candidate endpoint failed, trying next");
                    last_error = Some(err);
                }
            }
        }

        let err = last_error.unwrap_or(ForwardError::Network {
            message: "no candidate endpoints configured".to_string(),
        });
        PaymentOutcome::failure(err.to_string())
    }

    /// Fold an upstream HTTP response into the caller envelope.
    fn normalize(
        &self,
        status: u16,
        body: &str,
        reference: &str,
        payment: &ValidatedPayment,
        endpoint: &str,
        attempt: usize,
    ) -> PaymentOutcome {
        if status == 200 || status == 201 {
            let api_response: JsonValue = serde_json::from_str(body)
                .unwrap_or_else(|_| json!({ "raw": body }));

            let business_success = api_response["success"].as_bool() == Some(true)
                || api_response["status"].as_str() == Some("success");

            if business_success {
                let payment_url = ["payment_url", "checkout_url", "payment_link", "url"]
                    .into_iter()
                    .find_map(|key| api_response[key].as_str())
                    .map(|url| url.to_string());
                let upstream_status = api_response["status"]
                    .as_str()
                    .unwrap_or("initiated")
                    .to_string();

                return PaymentOutcome {
                    success: true,
                    transaction_id: Some(reference.to_string()),
                    payment_url,
                    message: Some("Payment initiated successfully".to_string()),
                    amount: Some(payment.amount.clone()),
                    currency: Some(payment.currency.clone()),
                    status: Some(upstream_status),
                    timestamp: Some(Local::now().to_rfc3339()),
                    error: None,
                    api_response: Some(api_response),
                    debug: Some(json!({ "endpoint": endpoint, "attempt": attempt })),
                };
            }

            let error_msg = api_response["message"]
                .as_str()
                .or_else(|| api_response["error"].as_str())
                .unwrap_or("Payment initiation failed");
            return PaymentOutcome::failure_with_response(
                format!("JamboPay API Error: {}", error_msg),
                api_response,
            );
        }

        let detail = serde_json::from_str::<JsonValue>(body)
            .ok()
            .and_then(|parsed| parsed["message"].as_str().map(|m| m.to_string()))
            .unwrap_or_else(|| body.to_string());
        PaymentOutcome::failure(format!(
            "API request failed: HTTP {} - {}",
            status, detail
        ))
    }
}
