use std::time::{Duration, Instant};

use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::Rng;
use serde_json::{Value, json};
use sha2::Sha256;
use uuid::Uuid;

use common::error::{AppError, Res};
use store::{Store, models::webhook::WebhookEvent};

use crate::dtos::webhook::WebhookEventResponse;
use crate::service::webhook::owned_webhook;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex HMAC-SHA256 of the request body.
pub const SIGNATURE_HEADER: &str = "X-Paygate-Signature";

/// Hex HMAC-SHA256 of the payload under the webhook's signing secret.
/// Receivers recompute this to authenticate deliveries.
pub fn sign_payload(secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    mac.finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Sample payload resembling what a live event of this type carries.
fn sample_payload(event_type: &str) -> Value {
    let mut rng = rand::rng();
    let payment_id = format!("pay_test_{}", rng.random_range(0..10_000));
    match event_type {
        "payment.failed" | "subscription.payment_failed" => {
            json!({ "paymentId": payment_id, "error": "card_declined" })
        }
        "payment.refunded" => {
            json!({ "paymentId": payment_id, "amount": rng.random_range(1..1000) * 100, "reason": "requested_by_customer" })
        }
        _ => json!({ "paymentId": payment_id, "amount": rng.random_range(1..1000) * 100 }),
    }
}

/// Fires one signed test event at the webhook URL and records the attempt.
///
/// Delivery failure is not an HTTP error for the caller: the recorded
/// event (with its error text) is the result either way. Only a missing
/// webhook is a 404.
pub async fn deliver_test_event(
    store: &Store,
    merchant_id: Uuid,
    webhook_id: Uuid,
    event_type: &str,
    timeout_secs: u64,
) -> Res<WebhookEventResponse> {
    let webhook = owned_webhook(store, merchant_id, webhook_id)?;
    if !webhook.event_types.iter().any(|e| e == event_type) {
        return Err(AppError::BadRequest(format!(
            "Webhook is not subscribed to {}",
            event_type
        )));
    }

    let event_id = Uuid::new_v4();
    let envelope = json!({
        "id": format!("evt_test_{}", event_id.simple()),
        "event": event_type,
        "isTest": true,
        "payload": sample_payload(event_type),
        "timestamp": Utc::now().to_rfc3339(),
    });
    let body = serde_json::to_vec(&envelope)
        .map_err(|e| AppError::Internal(format!("Payload serialization failed: {}", e)))?;
    let signature = sign_payload(&webhook.secret, &body);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;

    let started = Instant::now();
    let outcome = client
        .post(&webhook.url)
        .header("Content-Type", "application/json")
        .header(SIGNATURE_HEADER, signature)
        .body(body)
        .send()
        .await;
    let response_time_ms = started.elapsed().as_millis() as u64;

    let (success, status_code, error) = match outcome {
        Ok(response) if response.status().is_success() => {
            (true, response.status().as_u16(), None)
        }
        Ok(response) => (
            false,
            response.status().as_u16(),
            Some(format!("Endpoint returned {}", response.status())),
        ),
        Err(err) => (false, 0, Some(err.to_string())),
    };

    let event = store::webhook::record_delivery(
        store,
        WebhookEvent {
            id: event_id,
            webhook_id: webhook.id,
            event_type: event_type.to_string(),
            payload: envelope,
            success,
            status_code,
            response_time_ms,
            triggered_at: Utc::now(),
            error,
            is_test: true,
        },
    );
    Ok(WebhookEventResponse::from(event))
}
