use crate::{Store, models::transaction::Transaction};

pub fn all_transactions(store: &Store) -> Vec<Transaction> {
    store
        .transactions
        .iter()
        .map(|entry| entry.clone())
        .collect()
}

pub fn insert_transaction(store: &Store, txn: Transaction) -> Transaction {
    store.transactions.insert(txn.id.clone(), txn.clone());
    txn
}
