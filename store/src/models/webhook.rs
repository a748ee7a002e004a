use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use listview::ListRecord;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Consecutive failed deliveries before a webhook shows as "failed".
pub const FAILED_ATTEMPT_LIMIT: u32 = 3;

/// Event types a webhook can subscribe to.
pub const EVENT_TYPES: &[&str] = &[
    "payment.created",
    "payment.completed",
    "payment.failed",
    "payment.refunded",
    "subscription.payment_failed",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStatus {
    Active,
    Inactive,
    Failed,
}

impl WebhookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookStatus::Active => "active",
            WebhookStatus::Inactive => "inactive",
            WebhookStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Webhook {
    pub id: Uuid,
    pub merchant_id: Uuid,
    pub name: String,
    pub url: String,
    pub secret: String,
    pub event_types: Vec<String>,
    pub enabled: bool,
    pub failed_attempts: u32,
    pub created_at: DateTime<Utc>,
    pub last_triggered: Option<DateTime<Utc>>,
}

impl Webhook {
    pub fn status(&self) -> WebhookStatus {
        if self.failed_attempts >= FAILED_ATTEMPT_LIMIT {
            WebhookStatus::Failed
        } else if !self.enabled {
            WebhookStatus::Inactive
        } else {
            WebhookStatus::Active
        }
    }
}

impl ListRecord for Webhook {
    fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.url.to_lowercase().contains(&term)
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status().as_str().to_string()),
            _ => None,
        }
    }

    fn compare_by(&self, other: &Self, key: &str) -> Ordering {
        match key {
            // Random uuid ids; `id,desc` means "newest first" here.
            "id" | "createdAt" => self.created_at.cmp(&other.created_at),
            "name" => self.name.cmp(&other.name),
            "lastTriggered" => self.last_triggered.cmp(&other.last_triggered),
            _ => Ordering::Equal,
        }
    }
}

/// One recorded delivery attempt (live or test) against a webhook.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub id: Uuid,
    pub webhook_id: Uuid,
    pub event_type: String,
    pub payload: Value,
    pub success: bool,
    /// HTTP status of the endpoint's response, 0 when the request never
    /// completed (timeout, connection refused).
    pub status_code: u16,
    pub response_time_ms: u64,
    pub triggered_at: DateTime<Utc>,
    pub error: Option<String>,
    pub is_test: bool,
}
