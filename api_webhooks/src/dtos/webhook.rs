use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use store::models::webhook::{Webhook, WebhookEvent, WebhookStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebhookRequest {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub event_types: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestWebhookRequest {
    pub event_type: String,
}

#[derive(Debug, Deserialize)]
pub struct WebhookListParams {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_sort")]
    pub sort: String,
    pub search: Option<String>,
    /// Comma-separated status values, e.g. `status=active,failed`.
    pub status: Option<String>,
    /// Only webhooks subscribed to this event type.
    pub event: Option<String>,
}

fn default_size() -> usize {
    10
}
fn default_sort() -> String {
    "id,desc".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub secret: String,
    pub event_types: Vec<String>,
    pub status: WebhookStatus,
    pub enabled: bool,
    pub failed_attempts: u32,
    pub created_at: DateTime<Utc>,
    pub last_triggered: Option<DateTime<Utc>>,
}

impl From<Webhook> for WebhookResponse {
    fn from(webhook: Webhook) -> Self {
        WebhookResponse {
            status: webhook.status(),
            id: webhook.id,
            name: webhook.name,
            url: webhook.url,
            secret: webhook.secret,
            event_types: webhook.event_types,
            enabled: webhook.enabled,
            failed_attempts: webhook.failed_attempts,
            created_at: webhook.created_at,
            last_triggered: webhook.last_triggered,
        }
    }
}

/// Admin view of a webhook, one row of the cross-merchant monitoring
/// table. The signing secret stays with the owning merchant.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminWebhookResponse {
    pub id: Uuid,
    pub merchant_id: Uuid,
    pub merchant_name: String,
    pub name: String,
    pub url: String,
    pub event_types: Vec<String>,
    pub status: WebhookStatus,
    pub enabled: bool,
    pub failed_attempts: u32,
    pub created_at: DateTime<Utc>,
    pub last_triggered: Option<DateTime<Utc>>,
}

impl AdminWebhookResponse {
    pub fn new(webhook: Webhook, merchant_name: String) -> Self {
        AdminWebhookResponse {
            status: webhook.status(),
            id: webhook.id,
            merchant_id: webhook.merchant_id,
            merchant_name,
            name: webhook.name,
            url: webhook.url,
            event_types: webhook.event_types,
            enabled: webhook.enabled,
            failed_attempts: webhook.failed_attempts,
            created_at: webhook.created_at,
            last_triggered: webhook.last_triggered,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEventResponse {
    pub id: Uuid,
    pub webhook_id: Uuid,
    pub event_type: String,
    pub payload: Value,
    pub status: &'static str,
    pub status_code: u16,
    pub response_time_ms: u64,
    pub triggered_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub is_test: bool,
}

impl From<WebhookEvent> for WebhookEventResponse {
    fn from(event: WebhookEvent) -> Self {
        WebhookEventResponse {
            status: if event.success { "success" } else { "failed" },
            id: event.id,
            webhook_id: event.webhook_id,
            event_type: event.event_type,
            payload: event.payload,
            status_code: event.status_code,
            response_time_ms: event.response_time_ms,
            triggered_at: event.triggered_at,
            error: event.error,
            is_test: event.is_test,
        }
    }
}
