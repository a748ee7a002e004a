use rand::Rng;
use uuid::Uuid;

use crate::{
    Store,
    models::webhook::{Webhook, WebhookEvent},
};

const ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// `whsec_`-prefixed signing secret, one per endpoint.
pub fn generate_webhook_secret() -> String {
    let mut rng = rand::rng();
    let tail: String = (0..32)
        .map(|_| ALNUM[rng.random_range(0..ALNUM.len())] as char)
        .collect();
    format!("whsec_{}", tail)
}

pub fn get_webhook(store: &Store, id: Uuid) -> Option<Webhook> {
    store.webhooks.get(&id).map(|w| w.clone())
}

pub fn webhooks_for_merchant(store: &Store, merchant_id: Uuid) -> Vec<Webhook> {
    store
        .webhooks
        .iter()
        .filter(|entry| entry.merchant_id == merchant_id)
        .map(|entry| entry.clone())
        .collect()
}

pub fn all_webhooks(store: &Store) -> Vec<Webhook> {
    store.webhooks.iter().map(|entry| entry.clone()).collect()
}

pub fn insert_webhook(store: &Store, webhook: Webhook) -> Webhook {
    store.webhooks.insert(webhook.id, webhook.clone());
    webhook
}

/// Removes the webhook and its recorded events.
pub fn delete_webhook(store: &Store, id: Uuid) -> Option<Webhook> {
    let removed = store.webhooks.remove(&id).map(|(_, webhook)| webhook);
    if removed.is_some() {
        store.webhook_events.retain(|_, event| event.webhook_id != id);
    }
    removed
}

pub fn toggle_webhook(store: &Store, id: Uuid) -> Option<Webhook> {
    store.webhooks.get_mut(&id).map(|mut entry| {
        entry.enabled = !entry.enabled;
        entry.clone()
    })
}

/// Records a delivery attempt and updates the endpoint's counters:
/// success stamps `last_triggered` and resets the failure streak, failure
/// extends it.
pub fn record_delivery(store: &Store, event: WebhookEvent) -> WebhookEvent {
    if let Some(mut webhook) = store.webhooks.get_mut(&event.webhook_id) {
        if event.success {
            webhook.failed_attempts = 0;
            webhook.last_triggered = Some(event.triggered_at);
        } else {
            webhook.failed_attempts += 1;
        }
    }
    store.webhook_events.insert(event.id, event.clone());
    event
}

/// Delivery history for one endpoint, newest first.
pub fn events_for_webhook(store: &Store, webhook_id: Uuid) -> Vec<WebhookEvent> {
    let mut events: Vec<WebhookEvent> = store
        .webhook_events
        .iter()
        .filter(|entry| entry.webhook_id == webhook_id)
        .map(|entry| entry.clone())
        .collect();
    events.sort_by(|a, b| b.triggered_at.cmp(&a.triggered_at));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn seeded_webhook(store: &Store) -> Webhook {
        insert_webhook(
            store,
            Webhook {
                id: Uuid::new_v4(),
                merchant_id: Uuid::new_v4(),
                name: "payments".into(),
                url: "https://example.com/hook".into(),
                secret: generate_webhook_secret(),
                event_types: vec!["payment.completed".into()],
                enabled: true,
                failed_attempts: 2,
                created_at: Utc::now(),
                last_triggered: None,
            },
        )
    }

    fn attempt(webhook_id: Uuid, success: bool) -> WebhookEvent {
        WebhookEvent {
            id: Uuid::new_v4(),
            webhook_id,
            event_type: "payment.completed".into(),
            payload: json!({"paymentId": "pay_1"}),
            success,
            status_code: if success { 200 } else { 0 },
            response_time_ms: 120,
            triggered_at: Utc::now(),
            error: if success { None } else { Some("timed out".into()) },
            is_test: true,
        }
    }

    #[test]
    fn successful_delivery_resets_failure_streak() {
        let store = Store::new();
        let webhook = seeded_webhook(&store);

        record_delivery(&store, attempt(webhook.id, true));
        let updated = get_webhook(&store, webhook.id).unwrap();
        assert_eq!(updated.failed_attempts, 0);
        assert!(updated.last_triggered.is_some());
    }

    #[test]
    fn failed_delivery_extends_streak() {
        let store = Store::new();
        let webhook = seeded_webhook(&store);

        record_delivery(&store, attempt(webhook.id, false));
        let updated = get_webhook(&store, webhook.id).unwrap();
        assert_eq!(updated.failed_attempts, 3);
        assert!(updated.last_triggered.is_none());
    }

    #[test]
    fn deleting_a_webhook_drops_its_history() {
        let store = Store::new();
        let webhook = seeded_webhook(&store);
        record_delivery(&store, attempt(webhook.id, true));
        assert_eq!(events_for_webhook(&store, webhook.id).len(), 1);

        delete_webhook(&store, webhook.id);
        assert!(get_webhook(&store, webhook.id).is_none());
        assert!(events_for_webhook(&store, webhook.id).is_empty());
    }
}
