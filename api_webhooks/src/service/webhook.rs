use chrono::Utc;
use uuid::Uuid;

use common::{
    error::{AppError, Res},
    http::PageResponse,
};
use listview::{ListQuery, SortSpec, select};
use store::{
    Store,
    models::webhook::{EVENT_TYPES, Webhook},
};

use crate::dtos::webhook::{
    AdminWebhookResponse, CreateWebhookRequest, WebhookEventResponse, WebhookListParams,
    WebhookResponse,
};

fn build_query(params: &WebhookListParams) -> ListQuery {
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

pub fn list_webhooks(
    store: &Store,
    merchant_id: Uuid,
    params: &WebhookListParams,
) -> PageResponse<WebhookResponse> {
    let mut webhooks = store::webhook::webhooks_for_merchant(store, merchant_id);
    // Event subscription is multi-valued, so it is narrowed here rather
    // than through the single-valued field filters.
    if let Some(event) = &params.event {
        webhooks.retain(|webhook| webhook.event_types.iter().any(|e| e == event));
    }

    let page = select(&webhooks, &build_query(params));
    PageResponse {
        content: page
            .page_items
            .iter()
            .cloned()
            .map(WebhookResponse::from)
            .collect(),
        page: params.page,
        size: params.size,
        total_pages: page.total_pages,
        total_count: page.total_count,
    }
}

/// Every endpoint across merchants, for the admin monitoring table.
pub fn list_all_webhooks(
    store: &Store,
    params: &WebhookListParams,
) -> PageResponse<AdminWebhookResponse> {
    let mut webhooks = store::webhook::all_webhooks(store);
    if let Some(event) = &params.event {
        webhooks.retain(|webhook| webhook.event_types.iter().any(|e| e == event));
    }

    let page = select(&webhooks, &build_query(params));
    let content = page
        .page_items
        .iter()
        .cloned()
        .map(|webhook| {
            let merchant_name = store::user::get_user(store, webhook.merchant_id)
                .map_or_else(|| "Unknown".to_string(), |user| user.name);
            AdminWebhookResponse::new(webhook, merchant_name)
        })
        .collect();
    PageResponse {
        content,
        page: params.page,
        size: params.size,
        total_pages: page.total_pages,
        total_count: page.total_count,
    }
}

pub fn create_webhook(
    store: &Store,
    merchant_id: Uuid,
    req: CreateWebhookRequest,
) -> Res<WebhookResponse> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Webhook name is required".to_string()));
    }
    if !req.url.starts_with("http://") && !req.url.starts_with("https://") {
        return Err(AppError::BadRequest(
            "Webhook URL must be an http(s) endpoint".to_string(),
        ));
    }
    if req.event_types.is_empty() {
        return Err(AppError::BadRequest(
            "At least one event type is required".to_string(),
        ));
    }
    if let Some(unknown) = req
        .event_types
        .iter()
        .find(|event| !EVENT_TYPES.contains(&event.as_str()))
    {
        return Err(AppError::BadRequest(format!(
            "Unknown event type: {}",
            unknown
        )));
    }

    let webhook = store::webhook::insert_webhook(
        store,
        Webhook {
            id: Uuid::new_v4(),
            merchant_id,
            name: name.to_string(),
            url: req.url,
            secret: store::webhook::generate_webhook_secret(),
            event_types: req.event_types,
            enabled: true,
            failed_attempts: 0,
            created_at: Utc::now(),
            last_triggered: None,
        },
    );
    Ok(WebhookResponse::from(webhook))
}

/// Looks up a webhook owned by the merchant; anything else is a 404.
pub fn owned_webhook(store: &Store, merchant_id: Uuid, id: Uuid) -> Res<Webhook> {
    store::webhook::get_webhook(store, id)
        .filter(|webhook| webhook.merchant_id == merchant_id)
        .ok_or_else(|| AppError::NotFound("Webhook not found".to_string()))
}

pub fn delete_webhook(store: &Store, merchant_id: Uuid, id: Uuid) -> Res<WebhookResponse> {
    let webhook = owned_webhook(store, merchant_id, id)?;
    let removed = store::webhook::delete_webhook(store, webhook.id)
        .ok_or_else(|| AppError::NotFound("Webhook not found".to_string()))?;
    Ok(WebhookResponse::from(removed))
}

pub fn toggle_webhook(store: &Store, merchant_id: Uuid, id: Uuid) -> Res<WebhookResponse> {
    let webhook = owned_webhook(store, merchant_id, id)?;
    let toggled = store::webhook::toggle_webhook(store, webhook.id)
        .ok_or_else(|| AppError::NotFound("Webhook not found".to_string()))?;
    Ok(WebhookResponse::from(toggled))
}

pub fn list_events(store: &Store, merchant_id: Uuid, id: Uuid) -> Res<Vec<WebhookEventResponse>> {
    let webhook = owned_webhook(store, merchant_id, id)?;
    Ok(store::webhook::events_for_webhook(store, webhook.id)
        .into_iter()
        .map(WebhookEventResponse::from)
        .collect())
}
