use actix_web::{HttpMessage, HttpResponse, dev::ServiceRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    env_config::JwtConfig,
    error::{AppError, Res},
};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Merchant,
    Admin,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtClaims {
    pub user_id: Uuid,
    pub role: Role,
    pub kind: TokenKind,
    pub exp: usize,
}

pub struct ClaimsSpec {
    pub user_id: Uuid,
    pub role: Role,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

fn encode(claims: &JwtClaims, secret: &str) -> Res<String> {
    jsonwebtoken::encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Generates a bearer/refresh token pair for the given user.
pub fn generate_token_pair(spec: ClaimsSpec, config: &JwtConfig) -> Res<TokenPair> {
    let now = Utc::now();
    let access_exp = (now + Duration::hours(config.expiration_hours)).timestamp() as usize;
    let refresh_exp =
        (now + Duration::hours(config.refresh_expiration_hours)).timestamp() as usize;

    let access_token = encode(
        &JwtClaims {
            user_id: spec.user_id,
            role: spec.role,
            kind: TokenKind::Access,
            exp: access_exp,
        },
        &config.secret,
    )?;
    let refresh_token = encode(
        &JwtClaims {
            user_id: spec.user_id,
            role: spec.role,
            kind: TokenKind::Refresh,
            exp: refresh_exp,
        },
        &config.secret,
    )?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        expires_in: config.expiration_hours * 3600,
    })
}

/// Extracts claims object from JWT token.
/// Requires JWT secret.
pub fn validate_jwt(token: &str, secret: &str) -> Res<JwtClaims> {
    let token_data = jsonwebtoken::decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Like `validate_jwt`, but only accepts tokens of the given kind.
/// A refresh token presented as a bearer token (or vice versa) is a 401.
pub fn validate_jwt_kind(token: &str, secret: &str, kind: TokenKind) -> Res<JwtClaims> {
    let claims = validate_jwt(token, secret)?;
    if claims.kind != kind {
        return Err(AppError::Unauthorized("Wrong token type".to_string()));
    }
    Ok(claims)
}

pub fn get_jwt_claims_or_error(req: &ServiceRequest) -> Result<JwtClaims, HttpResponse> {
    if let Some(jwt_claims_res) = req.extensions().get::<Res<JwtClaims>>() {
        match jwt_claims_res {
            Ok(claims) => Ok(claims.clone()),
            Err(app_error) => Err(app_error.to_http_response()),
        }
    } else {
        Err(
            AppError::Unauthorized("No authorization token provided".to_string())
                .to_http_response(),
        )
    }
}
