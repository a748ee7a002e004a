use std::sync::Arc;

use actix_web::{HttpResponse, Responder, get, web};

use common::{error::Res, http::Success};
use store::Store;

use crate::{dtos::txn::TxnListParams, service};

/// Paginated transaction log for the admin panel.
#[get("")]
pub async fn get_transactions(
    store: web::Data<Arc<Store>>,
    params: web::Query<TxnListParams>,
) -> Res<impl Responder> {
    let page = service::txn::list_transactions(&store, &params);
    Success::ok(page)
}

/// The filtered log as a CSV download, skipping the JSON envelope.
#[get("/export")]
pub async fn get_transactions_export(
    store: web::Data<Arc<Store>>,
    params: web::Query<TxnListParams>,
) -> Res<impl Responder> {
    let csv = service::txn::export_transactions(&store, &params);
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"transactions.csv\"",
        ))
        .body(csv))
}

#[get("")]
pub async fn get_analytics(store: web::Data<Arc<Store>>) -> Res<impl Responder> {
    let summary = service::analytics::summarize(&store);
    Success::ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use common::env_config::{JwtConfig, SeedAccounts};
    use common::jwt::{self, ClaimsSpec, Role};
    use serde_json::Value;

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

    fn bearer(store: &Store, email: &str, role: Role) -> String {
        let user = store::user::get_user_by_email(store, email).unwrap();
        let pair = jwt::generate_token_pair(
            ClaimsSpec {
                user_id: user.id,
                role,
            },
            &JwtConfig {
                secret: SECRET.into(),
                expiration_hours: 1,
                refresh_expiration_hours: 336,
            },
        )
        .unwrap();
        format!("Bearer {}", pair.access_token)
    }

    macro_rules! app {
        ($store:expr) => {{
            test::init_service(
                App::new().app_data(web::Data::new($store.clone())).service(
                    web::scope("/api/admin")
                        .wrap(api_auth::admin_middleware())
                        .wrap(api_auth::auth_middleware(SECRET))
                        .service(crate::mount_admin_txns())
                        .service(crate::mount_admin_analytics()),
                ),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn merchants_cannot_read_the_log() {
        let store = store::setup(&seed_accounts());
        let token = bearer(&store, "merchant@paygate.test", Role::Merchant);
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/admin/transactions")
            .insert_header(("Authorization", token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 403);
    }

    #[actix_web::test]
    async fn log_pages_with_default_sort() {
        let store = store::setup(&seed_accounts());
        let token = bearer(&store, "admin@paygate.test", Role::Admin);
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/admin/transactions?size=5")
            .insert_header(("Authorization", token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], serde_json::json!(true));
        let data = &body["data"];
        assert_eq!(data["content"].as_array().unwrap().len(), 5);
        assert_eq!(data["totalCount"].as_u64().unwrap(), 40);
        assert_eq!(data["totalPages"].as_u64().unwrap(), 8);

        // Default sort is newest first.
        let dates: Vec<&str> = data["content"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["date"].as_str().unwrap())
            .collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[actix_web::test]
    async fn export_streams_csv() {
        let store = store::setup(&seed_accounts());
        let token = bearer(&store, "admin@paygate.test", Role::Admin);
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/admin/transactions/export")
            .insert_header(("Authorization", token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 200);
        assert!(
            res.headers()
                .get("content-type")
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("text/csv")
        );
        let body = test::read_body(res).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.starts_with("id,amount,status,method,customer,date"));
        assert_eq!(text.lines().count(), 41);
    }

    #[actix_web::test]
    async fn analytics_covers_a_week() {
        let store = store::setup(&seed_accounts());
        let token = bearer(&store, "admin@paygate.test", Role::Admin);
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/admin/analytics")
            .insert_header(("Authorization", token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let data = &body["data"];
        assert_eq!(data["volumeByDay"].as_array().unwrap().len(), 7);
        assert_eq!(data["totalCount"].as_u64().unwrap(), 40);
        assert_eq!(data["keys"].as_array().unwrap().len(), 3);
        assert!(data["statusCounts"]["success"].as_u64().is_some());
    }
}
