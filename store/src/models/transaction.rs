use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use listview::ListRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnStatus {
    Success,
    Failed,
    Pending,
}

impl TxnStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnStatus::Success => "success",
            TxnStatus::Failed => "failed",
            TxnStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayMethod {
    Card,
    Vbank,
}

impl PayMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayMethod::Card => "card",
            PayMethod::Vbank => "vbank",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transaction {
    /// Display id, `txn_` followed by digits.
    pub id: String,
    /// Amount in KRW; the gateway deals in whole won.
    pub amount: i64,
    pub status: TxnStatus,
    pub method: PayMethod,
    pub customer: String,
    pub date: DateTime<Utc>,
}

impl ListRecord for Transaction {
    fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.id.to_lowercase().contains(&term)
            || self.customer.to_lowercase().contains(&term)
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.as_str().to_string()),
            "method" => Some(self.method.as_str().to_string()),
            _ => None,
        }
    }

    fn compare_by(&self, other: &Self, key: &str) -> Ordering {
        match key {
            "id" => self.id.cmp(&other.id),
            "date" => self.date.cmp(&other.date),
            "amount" => self.amount.cmp(&other.amount),
            "customer" => self.customer.cmp(&other.customer),
            _ => Ordering::Equal,
        }
    }
}
