//! In-memory data store for the sandbox.
//!
//! The real gateway keeps this state in its backend database; here it
//! lives in `DashMap`s seeded with mock data at startup and is gone on
//! restart.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use common::env_config::SeedAccounts;

pub mod key;
pub mod seed;
pub mod transaction;
pub mod user;
pub mod webhook;

pub mod models {
    pub mod key;
    pub mod transaction;
    pub mod user;
    pub mod webhook;
}

use models::key::ApiKey;
use models::transaction::Transaction;
use models::user::User;
use models::webhook::{Webhook, WebhookEvent};

#[derive(Debug, Default)]
pub struct Store {
    pub users: DashMap<Uuid, User>,
    pub api_keys: DashMap<Uuid, ApiKey>,
    pub webhooks: DashMap<Uuid, Webhook>,
    pub webhook_events: DashMap<Uuid, WebhookEvent>,
    pub transactions: DashMap<String, Transaction>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builds the store and seeds the sandbox fixtures.
pub fn setup(accounts: &SeedAccounts) -> Arc<Store> {
    let store = Store::new();
    seed::seed(&store, accounts);
    Arc::new(store)
}
