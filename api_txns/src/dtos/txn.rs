use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use store::models::transaction::{PayMethod, Transaction, TxnStatus};

#[derive(Debug, Deserialize)]
pub struct TxnListParams {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_sort")]
    pub sort: String,
    /// Matches against the transaction id and the customer name.
    pub search: Option<String>,
    /// Comma-separated status values, e.g. `status=success,pending`.
    pub status: Option<String>,
    /// Comma-separated payment methods, e.g. `method=card`.
    pub method: Option<String>,
}

fn default_size() -> usize {
    10
}
fn default_sort() -> String {
    "date,desc".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxnResponse {
    pub id: String,
    pub amount: i64,
    pub status: TxnStatus,
    pub method: PayMethod,
    pub customer: String,
    pub date: DateTime<Utc>,
}

impl From<Transaction> for TxnResponse {
    fn from(txn: Transaction) -> Self {
        TxnResponse {
            id: txn.id,
            amount: txn.amount,
            status: txn.status,
            method: txn.method,
            customer: txn.customer,
            date: txn.date,
        }
    }
}

/// Chart feed for the admin dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    /// Sum of successful transaction amounts, in KRW.
    pub total_volume: i64,
    pub total_count: usize,
    pub status_counts: StatusCounts,
    /// Oldest day first, exactly seven entries ending today.
    pub volume_by_day: Vec<DailyVolume>,
    pub keys: Vec<KeySummary>,
}

#[derive(Debug, Serialize)]
pub struct StatusCounts {
    pub success: usize,
    pub failed: usize,
    pub pending: usize,
}

#[derive(Debug, Serialize)]
pub struct DailyVolume {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub volume: i64,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeySummary {
    pub merchant: String,
    pub access_key: String,
}
