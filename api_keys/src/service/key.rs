use chrono::{Duration, Utc};
use uuid::Uuid;

use common::{
    error::{AppError, Res},
    http::PageResponse,
};
use listview::{ListQuery, SortSpec, select};
use store::{Store, models::key::ApiKey};

use crate::dtos::key::{
    AdminKeyResponse, CreateKeyRequest, CreatedKeyResponse, KeyListParams, KeyResponse,
};

fn build_query(params: &KeyListParams) -> ListQuery {
    let sort = SortSpec::parse(&params.sort, "id");
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
    query
}

fn page_response<T>(items: Vec<T>, page: listview::ListPage<ApiKey>, params: &KeyListParams) -> PageResponse<T>
where
    T: serde::Serialize,
{
    PageResponse {
        content: items,
        page: params.page,
        size: params.size,
        total_pages: page.total_pages,
        total_count: page.total_count,
    }
}

/// Keys of one merchant, paged the way the dashboard table asks for them.
pub fn list_keys(
    store: &Store,
    merchant_id: Uuid,
    params: &KeyListParams,
) -> PageResponse<KeyResponse> {
    let keys = store::key::keys_for_merchant(store, merchant_id);
    let page = select(&keys, &build_query(params));
    let content = page.page_items.iter().cloned().map(KeyResponse::from).collect();
    page_response(content, page, params)
}

/// All keys across merchants, for the admin panel.
pub fn list_all_keys(store: &Store, params: &KeyListParams) -> PageResponse<AdminKeyResponse> {
    let keys = store::key::all_keys(store);
    let page = select(&keys, &build_query(params));
    let content = page
        .page_items
        .iter()
        .cloned()
        .map(AdminKeyResponse::from)
        .collect();
    page_response(content, page, params)
}

pub fn create_key(
    store: &Store,
    merchant_id: Uuid,
    req: CreateKeyRequest,
) -> Res<CreatedKeyResponse> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Key name is required".to_string()));
    }
    let now = Utc::now();
    let expires_at = match req.expires_in_days {
        None => None,
        Some(days) if days <= 0 => {
            return Err(AppError::BadRequest(
                "Expiry must be at least one day away".to_string(),
            ));
        }
        // Out-of-range arithmetic on chrono timestamps panics, so an
        // absurd horizon must be rejected here, not computed.
        Some(days) => Some(
            Duration::try_days(days)
                .and_then(|lifetime| now.checked_add_signed(lifetime))
                .ok_or_else(|| {
                    AppError::BadRequest("Expiry is too far in the future".to_string())
                })?,
        ),
    };

    let merchant = store::user::get_user(store, merchant_id)
        .ok_or_else(|| AppError::Unauthorized("Unknown account".to_string()))?;
    let key = store::key::insert_key(
        store,
        ApiKey {
            id: Uuid::new_v4(),
            merchant_id,
            merchant_name: merchant.name,
            name: name.to_string(),
            access_key: store::key::generate_access_key(),
            secret_key: store::key::generate_secret_key(),
            revoked: false,
            created_at: now,
            expires_at,
            last_used: None,
        },
    );
    Ok(CreatedKeyResponse::from(key))
}

/// Revokes a key owned by the calling merchant. A key belonging to
/// someone else looks like a missing key, not a forbidden one.
pub fn revoke_key(store: &Store, merchant_id: Uuid, key_id: Uuid) -> Res<KeyResponse> {
    let key = store::key::get_key(store, key_id)
        .filter(|key| key.merchant_id == merchant_id)
        .ok_or_else(|| AppError::NotFound("API key not found".to_string()))?;

    let revoked = store::key::revoke_key(store, key.id)
        .ok_or_else(|| AppError::NotFound("API key not found".to_string()))?;
    Ok(KeyResponse::from(revoked))
}
