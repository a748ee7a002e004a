use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    Error, HttpResponse,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::{Ready, ok};

use common::jwt::{Role, get_jwt_claims_or_error};

/// Role guard for `/admin` scopes. Expects `AuthMiddleware` to have run
/// already; anything without admin claims gets a 403.
pub struct RequireAdmin {}

impl RequireAdmin {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for RequireAdmin {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAdmin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = RequireAdminService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RequireAdminService {
            service: Arc::new(service),
        })
    }
}

pub struct RequireAdminService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAdminService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claims = get_jwt_claims_or_error(&req);
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            match claims {
                Ok(claims) if claims.role == Role::Admin => {
                    srv.call(req).await.map(|res| res.map_into_boxed_body())
                }
                Ok(_) => {
                    let response = HttpResponse::Forbidden()
                        .json(serde_json::json!({
                            "success": false,
                            "message": "Admin privileges required"
                        }))
                        .map_into_boxed_body();
                    Ok(req.into_response(response))
                }
                Err(response) => Ok(req.into_response(response)),
            }
        })
    }
}
