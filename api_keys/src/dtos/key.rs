use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use store::models::key::{ApiKey, KeyStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeyRequest {
    pub name: String,
    /// Days until expiry; omitted means the key never expires.
    pub expires_in_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct KeyListParams {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_sort")]
    pub sort: String,
    pub search: Option<String>,
    /// Comma-separated status values, e.g. `status=active,expiring`.
    pub status: Option<String>,
}

fn default_size() -> usize {
    10
}
fn default_sort() -> String {
    "id,desc".to_string()
}

/// Merchant view of a key. The secret is deliberately absent; it is only
/// ever shown in the creation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResponse {
    pub id: Uuid,
    pub name: String,
    pub access_key_id: String,
    pub status: KeyStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_used: Option<DateTime<Utc>>,
}

impl From<ApiKey> for KeyResponse {
    fn from(key: ApiKey) -> Self {
        KeyResponse {
            status: key.status(),
            id: key.id,
            name: key.name,
            access_key_id: key.access_key,
            created_at: key.created_at,
            expires_at: key.expires_at,
            last_used: key.last_used,
        }
    }
}

/// Creation response; the one place the secret crosses the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedKeyResponse {
    pub id: Uuid,
    pub name: String,
    pub access_key_id: String,
    pub secret_key: String,
    pub status: KeyStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<ApiKey> for CreatedKeyResponse {
    fn from(key: ApiKey) -> Self {
        CreatedKeyResponse {
            status: key.status(),
            id: key.id,
            name: key.name,
            access_key_id: key.access_key,
            secret_key: key.secret_key,
            created_at: key.created_at,
            expires_at: key.expires_at,
        }
    }
}

/// Admin view of a key, one row of the cross-merchant table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminKeyResponse {
    pub id: Uuid,
    pub merchant_id: Uuid,
    pub merchant_name: String,
    pub name: String,
    pub access_key: String,
    pub is_active: bool,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_used: Option<DateTime<Utc>>,
}

impl From<ApiKey> for AdminKeyResponse {
    fn from(key: ApiKey) -> Self {
        let is_active = matches!(key.status(), KeyStatus::Active | KeyStatus::Expiring);
        AdminKeyResponse {
            is_active,
            id: key.id,
            merchant_id: key.merchant_id,
            merchant_name: key.merchant_name,
            name: key.name,
            access_key: key.access_key,
            issued_at: key.created_at,
            expires_at: key.expires_at,
            last_used: key.last_used,
        }
    }
}
