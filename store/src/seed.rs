//! Sandbox fixtures. Shapes and example values mirror what the real
//! gateway returns; everything here is randomly generated and carries no
//! persistence guarantee.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use common::jwt::Role;
use rand::Rng;
use serde_json::json;
use uuid::Uuid;

use crate::{
    Store, key, transaction, user, webhook,
    models::{
        key::ApiKey,
        transaction::{PayMethod, Transaction, TxnStatus},
        user::User,
        webhook::{Webhook, WebhookEvent},
    },
};

use common::env_config::SeedAccounts;

const CUSTOMERS: &[&str] = &[
    "Hong Gildong",
    "Kim Cheolsu",
    "Lee Younghee",
    "Park Minsu",
    "Jung Jihoon",
    "Choi Jia",
    "Kang Dongwon",
    "Yoon Seora",
];

pub fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("password hashing failed")
        .to_string()
}

pub fn seed(store: &Store, accounts: &SeedAccounts) {
    let now = Utc::now();

    user::insert_user(
        store,
        User {
            id: Uuid::new_v4(),
            name: "Administrator".to_string(),
            email: accounts.admin_email.clone(),
            password_hash: hash_password(&accounts.admin_password),
            role: Role::Admin,
            created_at: now - Duration::days(365),
        },
    );
    let merchant = user::insert_user(
        store,
        User {
            id: Uuid::new_v4(),
            name: accounts.merchant_name.clone(),
            email: accounts.merchant_email.clone(),
            password_hash: hash_password(&accounts.merchant_password),
            role: Role::Merchant,
            created_at: now - Duration::days(180),
        },
    );

    seed_keys(store, merchant.id, &merchant.name);
    seed_webhooks(store, merchant.id);
    seed_transactions(store, 40);
}

fn seed_keys(store: &Store, merchant_id: Uuid, merchant_name: &str) {
    let now = Utc::now();
    let specs = [
        ("Production key", None, now - Duration::days(120)),
        ("Development key", Some(now + Duration::days(15)), now - Duration::days(60)),
        ("Legacy key", Some(now - Duration::days(30)), now - Duration::days(400)),
    ];
    for (name, expires_at, created_at) in specs {
        key::insert_key(
            store,
            ApiKey {
                id: Uuid::new_v4(),
                merchant_id,
                merchant_name: merchant_name.to_string(),
                name: name.to_string(),
                access_key: key::generate_access_key(),
                secret_key: key::generate_secret_key(),
                revoked: false,
                created_at,
                expires_at,
                last_used: Some(now - Duration::hours(6)),
            },
        );
    }
}

fn seed_webhooks(store: &Store, merchant_id: Uuid) {
    let now = Utc::now();

    let payments = webhook::insert_webhook(
        store,
        Webhook {
            id: Uuid::new_v4(),
            merchant_id,
            name: "Payment notifications".to_string(),
            url: "https://example.com/payment-webhook".to_string(),
            secret: webhook::generate_webhook_secret(),
            event_types: vec![
                "payment.created".to_string(),
                "payment.completed".to_string(),
                "payment.failed".to_string(),
            ],
            enabled: true,
            failed_attempts: 0,
            created_at: now - Duration::days(36),
            last_triggered: Some(now - Duration::days(1)),
        },
    );
    webhook::insert_webhook(
        store,
        Webhook {
            id: Uuid::new_v4(),
            merchant_id,
            name: "Refund processing".to_string(),
            url: "https://example.com/refund-webhook".to_string(),
            secret: webhook::generate_webhook_secret(),
            event_types: vec!["payment.refunded".to_string()],
            enabled: false,
            failed_attempts: 0,
            created_at: now - Duration::days(15),
            last_triggered: None,
        },
    );
    let failing = webhook::insert_webhook(
        store,
        Webhook {
            id: Uuid::new_v4(),
            merchant_id,
            name: "Error alerts".to_string(),
            url: "https://error-domain.com/webhook".to_string(),
            secret: webhook::generate_webhook_secret(),
            event_types: vec![
                "payment.failed".to_string(),
                "subscription.payment_failed".to_string(),
            ],
            enabled: true,
            failed_attempts: 3,
            created_at: now - Duration::days(70),
            last_triggered: Some(now - Duration::days(3)),
        },
    );

    store.webhook_events.insert(
        Uuid::new_v4(),
        WebhookEvent {
            id: Uuid::new_v4(),
            webhook_id: payments.id,
            event_type: "payment.completed".to_string(),
            payload: json!({ "paymentId": "pay_123", "amount": 15000 }),
            success: true,
            status_code: 200,
            response_time_ms: 230,
            triggered_at: now - Duration::days(1),
            error: None,
            is_test: false,
        },
    );
    store.webhook_events.insert(
        Uuid::new_v4(),
        WebhookEvent {
            id: Uuid::new_v4(),
            webhook_id: failing.id,
            event_type: "payment.failed".to_string(),
            payload: json!({ "paymentId": "pay_124", "error": "card_declined" }),
            success: false,
            status_code: 500,
            response_time_ms: 4500,
            triggered_at: now - Duration::days(3),
            error: Some("Endpoint timed out after 3000ms".to_string()),
            is_test: false,
        },
    );
}

fn seed_transactions(store: &Store, count: usize) {
    let mut rng = rand::rng();
    let now = Utc::now();

    for _ in 0..count {
        let status = match rng.random_range(0..10) {
            0..=6 => TxnStatus::Success,
            7..=8 => TxnStatus::Failed,
            _ => TxnStatus::Pending,
        };
        let method = if rng.random_bool(0.7) {
            PayMethod::Card
        } else {
            PayMethod::Vbank
        };
        transaction::insert_transaction(
            store,
            Transaction {
                id: format!("txn_{:010}", rng.random_range(0u64..10_000_000_000)),
                amount: rng.random_range(10..1000) * 100,
                status,
                method,
                customer: CUSTOMERS[rng.random_range(0..CUSTOMERS.len())].to_string(),
                date: now - Duration::minutes(rng.random_range(0..60 * 24 * 30)),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordVerifier, password_hash::PasswordHash};

    fn accounts() -> SeedAccounts {
        SeedAccounts {
            admin_email: "admin@paygate.test".into(),
            admin_password: "admin1234".into(),
            merchant_email: "merchant@paygate.test".into(),
            merchant_password: "merchant1234".into(),
            merchant_name: "Demo Store".into(),
        }
    }

    #[test]
    fn seed_populates_every_collection() {
        let store = Store::new();
        seed(&store, &accounts());

        assert_eq!(store.users.len(), 2);
        assert_eq!(store.api_keys.len(), 3);
        assert_eq!(store.webhooks.len(), 3);
        assert_eq!(store.webhook_events.len(), 2);
        assert_eq!(store.transactions.len(), 40);
    }

    #[test]
    fn seeded_passwords_verify() {
        let store = Store::new();
        seed(&store, &accounts());

        let merchant = user::get_user_by_email(&store, "merchant@paygate.test").unwrap();
        let parsed = PasswordHash::new(&merchant.password_hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"merchant1234", &parsed)
                .is_ok()
        );
    }
}
