use std::sync::Arc;

use actix_web::{Responder, post, web};

use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::{self, ClaimsSpec, Role, TokenKind};
use store::Store;

use crate::dtos::auth::{LoginRequest, LoginResponse, RefreshRequest};
use crate::services;

fn login(store: &Store, config: &Config, req: LoginRequest, role: Role) -> Res<LoginResponse> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Both email and password are required".to_string(),
        ));
    }

    let user = services::auth::authenticate(store, &req, role)?;
    let token = jwt::generate_token_pair(
        ClaimsSpec {
            user_id: user.id,
            role: user.role,
        },
        &config.jwt_config,
    )?;

    Ok(LoginResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    })
}

/// Merchant login. Returns the user profile plus a bearer/refresh token
/// pair; 400 when a field is missing, 401 on bad credentials.
#[post("/login")]
pub async fn post_login(
    store: web::Data<Arc<Store>>,
    config: web::Data<Arc<Config>>,
    req: web::Json<LoginRequest>,
) -> Res<impl Responder> {
    let response = login(&store, &config, req.into_inner(), Role::Merchant)?;
    Success::ok(response)
}

/// Admin login. Same contract as `/login` but only for admin accounts.
#[post("/admin/login")]
pub async fn post_admin_login(
    store: web::Data<Arc<Store>>,
    config: web::Data<Arc<Config>>,
    req: web::Json<LoginRequest>,
) -> Res<impl Responder> {
    let response = login(&store, &config, req.into_inner(), Role::Admin)?;
    Success::ok(response)
}

/// Exchanges a refresh token for a fresh token pair.
#[post("/refresh")]
pub async fn post_refresh(
    store: web::Data<Arc<Store>>,
    config: web::Data<Arc<Config>>,
    req: web::Json<RefreshRequest>,
) -> Res<impl Responder> {
    let claims = jwt::validate_jwt_kind(
        &req.refresh_token,
        &config.jwt_config.secret,
        TokenKind::Refresh,
    )?;

    // The account must still exist; sandbox resets invalidate old tokens.
    let user = store::user::get_user(&store, claims.user_id)
        .ok_or_else(|| AppError::Unauthorized("Unknown account".to_string()))?;

    let token = jwt::generate_token_pair(
        ClaimsSpec {
            user_id: user.id,
            role: user.role,
        },
        &config.jwt_config,
    )?;
    Success::ok(token)
}
