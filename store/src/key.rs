use rand::Rng;
use uuid::Uuid;

use crate::{Store, models::key::ApiKey};

const UPPER_ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

fn random_chars(charset: &[u8], len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| charset[rng.random_range(0..charset.len())] as char)
        .collect()
}

/// `AKIA`-prefixed access key id, as issued by the gateway.
pub fn generate_access_key() -> String {
    format!("AKIA{}", random_chars(UPPER_ALNUM, 16))
}

/// 40-character secret. Shown to the merchant exactly once, at creation.
pub fn generate_secret_key() -> String {
    random_chars(ALNUM, 40)
}

pub fn get_key(store: &Store, id: Uuid) -> Option<ApiKey> {
    store.api_keys.get(&id).map(|k| k.clone())
}

pub fn keys_for_merchant(store: &Store, merchant_id: Uuid) -> Vec<ApiKey> {
    store
        .api_keys
        .iter()
        .filter(|entry| entry.merchant_id == merchant_id)
        .map(|entry| entry.clone())
        .collect()
}

pub fn all_keys(store: &Store) -> Vec<ApiKey> {
    store.api_keys.iter().map(|entry| entry.clone()).collect()
}

pub fn insert_key(store: &Store, key: ApiKey) -> ApiKey {
    store.api_keys.insert(key.id, key.clone());
    key
}

/// Marks the key revoked and returns the updated record. Revoked keys
/// stay listed; the dashboard shows them with a `revoked` badge.
pub fn revoke_key(store: &Store, id: Uuid) -> Option<ApiKey> {
    store.api_keys.get_mut(&id).map(|mut entry| {
        entry.revoked = true;
        entry.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_credentials_have_expected_shape() {
        let access = generate_access_key();
        assert!(access.starts_with("AKIA"));
        assert_eq!(access.len(), 20);
        assert!(access.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

        let secret = generate_secret_key();
        assert_eq!(secret.len(), 40);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn consecutive_keys_differ() {
        assert_ne!(generate_access_key(), generate_access_key());
        assert_ne!(generate_secret_key(), generate_secret_key());
    }
}
