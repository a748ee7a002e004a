use chrono::{Duration, Utc};
use store::Store;
use store::models::transaction::TxnStatus;

use crate::dtos::txn::{AnalyticsResponse, DailyVolume, KeySummary, StatusCounts};

/// Aggregates the transaction log into the dashboard chart feed.
/// Volume counts successful transactions only.
pub fn summarize(store: &Store) -> AnalyticsResponse {
    let txns = store::transaction::all_transactions(store);

    let mut counts = StatusCounts {
        success: 0,
        failed: 0,
        pending: 0,
    };
    let mut total_volume = 0i64;
    for txn in &txns {
        match txn.status {
            TxnStatus::Success => {
                counts.success += 1;
                total_volume += txn.amount;
            }
            TxnStatus::Failed => counts.failed += 1,
            TxnStatus::Pending => counts.pending += 1,
        }
    }

    let today = Utc::now().date_naive();
    let volume_by_day = (0..7)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            let mut volume = 0i64;
            let mut count = 0usize;
            for txn in &txns {
                if txn.date.date_naive() == day && txn.status == TxnStatus::Success {
                    volume += txn.amount;
                    count += 1;
                }
            }
            DailyVolume {
                date: day.format("%Y-%m-%d").to_string(),
                volume,
                count,
            }
        })
        .collect();

    let mut keys: Vec<KeySummary> = store::key::all_keys(store)
        .into_iter()
        .map(|key| KeySummary {
            merchant: key.merchant_name,
            access_key: key.access_key,
        })
        .collect();
    keys.sort_by(|a, b| a.merchant.cmp(&b.merchant).then(a.access_key.cmp(&b.access_key)));

    AnalyticsResponse {
        total_volume,
        total_count: txns.len(),
        status_counts: counts,
        volume_by_day,
        keys,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use store::models::transaction::{PayMethod, Transaction};

    #[test]
    fn summary_splits_by_status_and_day() {
        let store = store::setup(&common::env_config::SeedAccounts {
            admin_email: "admin@paygate.test".into(),
            admin_password: "admin1234".into(),
            merchant_email: "merchant@paygate.test".into(),
            merchant_password: "merchant1234".into(),
            merchant_name: "Demo Store".into(),
        });
        store.transactions.clear();

        let now = Utc::now();
        let txn = |id: &str, amount, status, days_ago| Transaction {
            id: id.to_string(),
            amount,
            status,
            method: PayMethod::Card,
            customer: "Park Jiyeon".into(),
            date: now - Duration::days(days_ago),
        };
        store::transaction::insert_transaction(&store, txn("txn_1", 5000, TxnStatus::Success, 0));
        store::transaction::insert_transaction(&store, txn("txn_2", 3000, TxnStatus::Success, 1));
        store::transaction::insert_transaction(&store, txn("txn_3", 9000, TxnStatus::Failed, 0));
        store::transaction::insert_transaction(&store, txn("txn_4", 2000, TxnStatus::Pending, 20));

        let summary = summarize(&store);
        assert_eq!(summary.total_count, 4);
        // Failed and pending amounts stay out of the volume.
        assert_eq!(summary.total_volume, 8000);
        assert_eq!(summary.status_counts.success, 2);
        assert_eq!(summary.status_counts.failed, 1);
        assert_eq!(summary.status_counts.pending, 1);

        assert_eq!(summary.volume_by_day.len(), 7);
        let today = summary.volume_by_day.last().unwrap();
        assert_eq!(today.volume, 5000);
        assert_eq!(today.count, 1);
        assert_eq!(summary.volume_by_day[5].volume, 3000);

        // Seeded merchant keys surface in the access-key table.
        assert_eq!(summary.keys.len(), 3);
        assert!(summary.keys.iter().all(|k| k.access_key.starts_with("AKIA")));
    }
}
