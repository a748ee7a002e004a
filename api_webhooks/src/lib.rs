use actix_web::web;

pub mod routes {
    pub mod webhook;
}

mod service {
    pub(crate) mod delivery;
    pub(crate) mod webhook;
}

mod dtos {
    pub(crate) mod webhook;
}

/// Merchant-facing webhook management, mounted behind the auth middleware.
pub fn mount_webhooks() -> actix_web::Scope {
    web::scope("/webhooks")
        .service(routes::webhook::get_webhooks)
        .service(routes::webhook::post_create_webhook)
        .service(routes::webhook::delete_webhook)
        .service(routes::webhook::post_toggle_webhook)
        .service(routes::webhook::post_test_webhook)
        .service(routes::webhook::get_webhook_events)
}

/// Cross-merchant webhook listing, mounted behind the admin middleware.
pub fn mount_admin_webhooks() -> actix_web::Scope {
    web::scope("/webhooks").service(routes::webhook::get_all_webhooks)
}
