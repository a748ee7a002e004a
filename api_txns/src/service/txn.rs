use common::http::PageResponse;
use listview::{ListQuery, SortSpec, select};
use store::Store;

use crate::dtos::txn::{TxnListParams, TxnResponse};
use crate::service::csv;

fn build_query(params: &TxnListParams) -> ListQuery {
    let sort = SortSpec::parse(&params.sort, "date");
    let mut query = ListQuery::new(&sort.key, sort.direction);
    query.page = params.page;
    query.page_size = params.size;
    query.search = params.search.clone();
    if let Some(status) = &params.status {
        query.filters.insert(
            "status".to_string(),
            status.split(',').map(|s| s.trim().to_string()).collect(),
        );
    }
    if let Some(method) = &params.method {
        query.filters.insert(
            "method".to_string(),
            method.split(',').map(|s| s.trim().to_string()).collect(),
        );
    }
    query
}

/// The transaction log, paged the way the admin table asks for it.
pub fn list_transactions(store: &Store, params: &TxnListParams) -> PageResponse<TxnResponse> {
    let txns = store::transaction::all_transactions(store);
    let page = select(&txns, &build_query(params));
    PageResponse {
        content: page
            .page_items
            .iter()
            .cloned()
            .map(TxnResponse::from)
            .collect(),
        page: params.page,
        size: params.size,
        total_pages: page.total_pages,
        total_count: page.total_count,
    }
}

/// The same filtered and sorted set as the listing, flattened to CSV
/// with no pagination applied.
pub fn export_transactions(store: &Store, params: &TxnListParams) -> String {
    let txns = store::transaction::all_transactions(store);
    let mut query = build_query(params);
    query.page = 0;
    query.page_size = usize::MAX;
    let page = select(&txns, &query);

    let rows = page.page_items.iter().map(|txn| {
        vec![
            Some(txn.id.clone()),
            Some(txn.amount.to_string()),
            Some(txn.status.as_str().to_string()),
            Some(txn.method.as_str().to_string()),
            Some(txn.customer.clone()),
            Some(txn.date.to_rfc3339()),
        ]
    });
    csv::render(
        &["id", "amount", "status", "method", "customer", "date"],
        rows,
    )
}
