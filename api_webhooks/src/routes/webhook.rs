use std::sync::Arc;

use actix_web::{Responder, delete, get, post, web};
use uuid::Uuid;

use common::{env_config::Config, error::Res, http::Success, jwt::JwtClaims};
use store::Store;

use crate::{
    dtos::webhook::{CreateWebhookRequest, TestWebhookRequest, WebhookListParams},
    service,
};

/// Paginated webhooks of the authenticated merchant.
#[get("")]
pub async fn get_webhooks(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<Store>>,
    params: web::Query<WebhookListParams>,
) -> Res<impl Responder> {
    let page = service::webhook::list_webhooks(&store, claims.user_id, &params);
    Success::ok(page)
}

/// Registers a new endpoint. The signing secret is generated server-side.
#[post("")]
pub async fn post_create_webhook(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<Store>>,
    req: web::Json<CreateWebhookRequest>,
) -> Res<impl Responder> {
    let webhook = service::webhook::create_webhook(&store, claims.user_id, req.into_inner())?;
    Success::created(webhook)
}

#[delete("/{id}")]
pub async fn delete_webhook(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<Store>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let webhook = service::webhook::delete_webhook(&store, claims.user_id, path.into_inner())?;
    Success::ok_with("Webhook deleted", webhook)
}

/// Flips the enabled flag. A re-enabled endpoint keeps its failure count.
#[post("/{id}/toggle")]
pub async fn post_toggle_webhook(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<Store>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let webhook = service::webhook::toggle_webhook(&store, claims.user_id, path.into_inner())?;
    Success::ok(webhook)
}

/// Fires a signed sample event at the endpoint and returns the recorded
/// attempt. A failing endpoint still yields a 200 with the failure details.
#[post("/{id}/test")]
pub async fn post_test_webhook(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<Store>>,
    config: web::Data<Arc<Config>>,
    path: web::Path<Uuid>,
    req: web::Json<TestWebhookRequest>,
) -> Res<impl Responder> {
    let event = service::delivery::deliver_test_event(
        &store,
        claims.user_id,
        path.into_inner(),
        &req.event_type,
        config.webhook_timeout_secs,
    )
    .await?;
    Success::ok(event)
}

/// Every webhook across merchants, for the admin monitoring table.
#[get("")]
pub async fn get_all_webhooks(
    store: web::Data<Arc<Store>>,
    params: web::Query<WebhookListParams>,
) -> Res<impl Responder> {
    let page = service::webhook::list_all_webhooks(&store, &params);
    Success::ok(page)
}

/// Delivery history for one endpoint, newest first.
#[get("/{id}/events")]
pub async fn get_webhook_events(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<Arc<Store>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let events = service::webhook::list_events(&store, claims.user_id, path.into_inner())?;
    Success::ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use common::env_config::{JwtConfig, SeedAccounts};
    use common::jwt::{self, ClaimsSpec, Role};
    use serde_json::{Value, json};

    const SECRET: &str = "test-secret";

    fn seed_accounts() -> SeedAccounts {
        SeedAccounts {
            admin_email: "admin@paygate.test".into(),
            admin_password: "admin1234".into(),
            merchant_email: "merchant@paygate.test".into(),
            merchant_password: "merchant1234".into(),
            merchant_name: "Demo Store".into(),
        }
    }

    fn test_config() -> Arc<Config> {
        Arc::new(Config {
            environment: "development".into(),
            server_host: "127.0.0.1".into(),
            server_port: 0,
            num_workers: 1,
            cors_allowed_origin: "http://localhost:3000".into(),
            console_logging_enabled: false,
            jwt_config: JwtConfig {
                secret: SECRET.into(),
                expiration_hours: 1,
                refresh_expiration_hours: 336,
            },
            seed_accounts: seed_accounts(),
            webhook_timeout_secs: 1,
        })
    }

    fn bearer(store: &Store, email: &str, role: Role) -> String {
        let user = store::user::get_user_by_email(store, email).unwrap();
        let pair = jwt::generate_token_pair(
            ClaimsSpec {
                user_id: user.id,
                role,
            },
            &test_config().jwt_config,
        )
        .unwrap();
        format!("Bearer {}", pair.access_token)
    }

    macro_rules! app {
        ($store:expr) => {{
            test::init_service(
                App::new()
                    .app_data(web::Data::new($store.clone()))
                    .app_data(web::Data::new(test_config()))
                    .service(
                        web::scope("/api")
                            .wrap(api_auth::auth_middleware(SECRET))
                            .service(crate::mount_webhooks()),
                    ),
            )
            .await
        }};
    }

    macro_rules! admin_app {
        ($store:expr) => {{
            test::init_service(
                App::new()
                    .app_data(web::Data::new($store.clone()))
                    .app_data(web::Data::new(test_config()))
                    .service(
                        web::scope("/api/admin")
                            .wrap(api_auth::admin_middleware())
                            .wrap(api_auth::auth_middleware(SECRET))
                            .service(crate::mount_admin_webhooks()),
                    ),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn listing_requires_a_token() {
        let store = store::setup(&seed_accounts());
        let app = app!(store);
        let req = test::TestRequest::get().uri("/api/webhooks").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 401);
    }

    #[actix_web::test]
    async fn listing_includes_seeded_endpoints() {
        let store = store::setup(&seed_accounts());
        let token = bearer(&store, "merchant@paygate.test", Role::Merchant);
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/webhooks?sort=name,asc")
            .insert_header(("Authorization", token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["totalCount"], json!(3));
        let content = body["data"]["content"].as_array().unwrap();
        assert_eq!(content[0]["name"], json!("Error alerts"));
        assert_eq!(content[0]["status"], json!("failed"));
        assert!(content[0]["secret"].as_str().unwrap().starts_with("whsec_"));
    }

    #[actix_web::test]
    async fn status_filter_narrows_the_page() {
        let store = store::setup(&seed_accounts());
        let token = bearer(&store, "merchant@paygate.test", Role::Merchant);
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/webhooks?status=failed")
            .insert_header(("Authorization", token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["totalCount"], json!(1));
        assert_eq!(body["data"]["content"][0]["name"], json!("Error alerts"));
    }

    #[actix_web::test]
    async fn admin_listing_spans_merchants() {
        let store = store::setup(&seed_accounts());
        let admin_token = bearer(&store, "admin@paygate.test", Role::Admin);
        let merchant_token = bearer(&store, "merchant@paygate.test", Role::Merchant);
        let app = admin_app!(store);

        let req = test::TestRequest::get()
            .uri("/api/admin/webhooks?sort=name,asc&status=failed")
            .insert_header(("Authorization", admin_token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["totalCount"], json!(1));
        let row = &body["data"]["content"][0];
        assert_eq!(row["name"], json!("Error alerts"));
        assert_eq!(row["merchantName"], json!("Demo Store"));
        assert_eq!(row["status"], json!("failed"));
        assert!(row.get("secret").is_none());

        let req = test::TestRequest::get()
            .uri("/api/admin/webhooks")
            .insert_header(("Authorization", merchant_token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 403);
    }

    #[actix_web::test]
    async fn create_validates_url_and_events() {
        let store = store::setup(&seed_accounts());
        let token = bearer(&store, "merchant@paygate.test", Role::Merchant);
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/api/webhooks")
            .insert_header(("Authorization", token.clone()))
            .set_json(json!({
                "name": "Bad",
                "url": "ftp://example.com/hook",
                "eventTypes": ["payment.created"],
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 400);

        let req = test::TestRequest::post()
            .uri("/api/webhooks")
            .insert_header(("Authorization", token.clone()))
            .set_json(json!({
                "name": "Bad",
                "url": "https://example.com/hook",
                "eventTypes": ["payment.exploded"],
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 400);

        let req = test::TestRequest::post()
            .uri("/api/webhooks")
            .insert_header(("Authorization", token))
            .set_json(json!({
                "name": "Settlement sync",
                "url": "https://example.com/hook",
                "eventTypes": ["payment.completed", "payment.refunded"],
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["enabled"], json!(true));
        assert_eq!(body["data"]["status"], json!("active"));
    }

    #[actix_web::test]
    async fn toggle_then_delete_round_trip() {
        let store = store::setup(&seed_accounts());
        let token = bearer(&store, "merchant@paygate.test", Role::Merchant);
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/api/webhooks")
            .insert_header(("Authorization", token.clone()))
            .set_json(json!({
                "name": "Temp",
                "url": "https://example.com/hook",
                "eventTypes": ["payment.created"],
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/webhooks/{}/toggle", id))
            .insert_header(("Authorization", token.clone()))
            .to_request();
        let toggled: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(toggled["data"]["enabled"], json!(false));
        assert_eq!(toggled["data"]["status"], json!("inactive"));

        let req = test::TestRequest::delete()
            .uri(&format!("/api/webhooks/{}", id))
            .insert_header(("Authorization", token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 200);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/webhooks/{}", id))
            .insert_header(("Authorization", token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn foreign_webhook_reads_as_missing() {
        let store = store::setup(&seed_accounts());
        let merchant_token = bearer(&store, "merchant@paygate.test", Role::Merchant);
        let admin_token = bearer(&store, "admin@paygate.test", Role::Admin);
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/webhooks")
            .insert_header(("Authorization", merchant_token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["data"]["content"][0]["id"].as_str().unwrap().to_string();

        // The admin account owns no webhooks, so another merchant's
        // endpoint is indistinguishable from a missing one.
        let req = test::TestRequest::delete()
            .uri(&format!("/api/webhooks/{}", id))
            .insert_header(("Authorization", admin_token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn failed_test_delivery_still_returns_the_event() {
        let store = store::setup(&seed_accounts());
        let token = bearer(&store, "merchant@paygate.test", Role::Merchant);
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/api/webhooks")
            .insert_header(("Authorization", token.clone()))
            .set_json(json!({
                "name": "Unreachable",
                "url": "http://127.0.0.1:1/hook",
                "eventTypes": ["payment.created"],
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/webhooks/{}/test", id))
            .insert_header(("Authorization", token.clone()))
            .set_json(json!({ "eventType": "payment.created" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["status"], json!("failed"));
        assert_eq!(body["data"]["statusCode"], json!(0));
        assert_eq!(body["data"]["isTest"], json!(true));
        assert!(body["data"]["error"].is_string());

        // The failure is on the endpoint's record.
        let req = test::TestRequest::get()
            .uri(&format!("/api/webhooks/{}/events", id))
            .insert_header(("Authorization", token))
            .to_request();
        let events: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(events["data"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_delivery_rejects_unsubscribed_events() {
        let store = store::setup(&seed_accounts());
        let token = bearer(&store, "merchant@paygate.test", Role::Merchant);
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/api/webhooks")
            .insert_header(("Authorization", token.clone()))
            .set_json(json!({
                "name": "Payments only",
                "url": "http://127.0.0.1:1/hook",
                "eventTypes": ["payment.created"],
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/webhooks/{}/test", id))
            .insert_header(("Authorization", token))
            .set_json(json!({ "eventType": "payment.refunded" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 400);
    }
}
