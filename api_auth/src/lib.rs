use actix_web::web;
use middleware::admin::RequireAdmin;
use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod admin;
    pub mod auth;
}

pub mod routes {
    pub mod auth;
}

mod services {
    pub(crate) mod auth;
}

pub mod dtos {
    pub mod auth;
}

pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::post_login)
        .service(routes::auth::post_admin_login)
        .service(routes::auth::post_refresh)
}

/// Validates the bearer token and stashes the claims on the request.
pub fn auth_middleware(jwt_secret: &str) -> AuthMiddleware {
    AuthMiddleware::new(jwt_secret.to_string())
}

/// Rejects non-admin callers. Mount inside an `auth_middleware` scope.
pub fn admin_middleware() -> RequireAdmin {
    RequireAdmin::new()
}
