use std::{future::Future, pin::Pin, rc::Rc, sync::Arc};

use actix_web::{
    Error, HttpMessage, HttpResponse,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::{Ready, ok};

use common::{
    error::Res,
    jwt::{self, JwtClaims, TokenKind},
};

/// Bearer-token guard. Validates the `Authorization: Bearer` header
/// against the local JWT secret and inserts the claims into the request
/// extensions for handlers and the request logger.
pub struct AuthMiddleware {
    jwt_secret: Rc<String>,
}

impl AuthMiddleware {
    pub fn new(jwt_secret: String) -> Self {
        AuthMiddleware {
            jwt_secret: Rc::new(jwt_secret),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Arc::new(service),
            jwt_secret: self.jwt_secret.clone(),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Arc<S>,
    jwt_secret: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token_value = req
            .headers()
            .get("Authorization")
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer ").map(|t| t.to_string()));

        let jwt_secret = self.jwt_secret.clone();
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            let Some(token) = token_value else {
                let response = HttpResponse::Unauthorized()
                    .json(serde_json::json!({
                        "success": false,
                        "message": "No authorization token provided. Please log in."
                    }))
                    .map_into_boxed_body();
                return Ok(req.into_response(response));
            };

            // Only access tokens open the dashboard; refresh tokens are
            // accepted by /auth/refresh alone.
            match jwt::validate_jwt_kind(&token, &jwt_secret, TokenKind::Access) {
                Ok(claims) => {
                    // Twice: the plain claims feed `web::ReqData` in
                    // handlers, the Res wrapper feeds the request logger.
                    req.extensions_mut()
                        .insert::<Res<JwtClaims>>(Ok(claims.clone()));
                    req.extensions_mut().insert(claims);
                    srv.call(req).await.map(|res| res.map_into_boxed_body())
                }
                Err(_) => {
                    let response = HttpResponse::Unauthorized()
                        .json(serde_json::json!({
                            "success": false,
                            "message": "Invalid or expired token"
                        }))
                        .map_into_boxed_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}
