use std::sync::Arc;

use actix_web::{Responder, delete, get, post, web};

use common::{error::Res, http::Success, jwt::JwtClaims};
use store::Store;
use uuid::Uuid;

use crate::{
    dtos::key::{CreateKeyRequest, KeyListParams},
    service,
};

/// Paginated keys of the authenticated merchant.
#[get("")]
pub async fn get_keys(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<Store>>,
    params: web::Query<KeyListParams>,
) -> Res<impl Responder> {
    let page = service::key::list_keys(&store, claims.user_id, &params);
    Success::ok(page)
}

/// Issues a new key. The response is the only place the secret appears.
#[post("")]
pub async fn post_create_key(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<Store>>,
    req: web::Json<CreateKeyRequest>,
) -> Res<impl Responder> {
    let key = service::key::create_key(&store, claims.user_id, req.into_inner())?;
    Success::created(key)
}

/// Revokes a key. The key stays listed with a `revoked` status.
#[delete("/{id}")]
pub async fn delete_key(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<Store>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let key = service::key::revoke_key(&store, claims.user_id, path.into_inner())?;
    Success::ok_with("API key revoked", key)
}

/// Every key across merchants, for the admin panel.
#[get("")]
pub async fn get_all_keys(
    store: web::Data<Arc<Store>>,
    params: web::Query<KeyListParams>,
) -> Res<impl Responder> {
    let page = service::key::list_all_keys(&store, &params);
    Success::ok(page)
}
