use actix_web::web;

pub mod routes {
    pub mod key;
}

mod service {
    pub(crate) mod key;
}

mod dtos {
    pub(crate) mod key;
}

/// Merchant-facing key management, mounted behind the auth middleware.
pub fn mount_keys() -> actix_web::Scope {
    web::scope("/api-keys")
        .service(routes::key::get_keys)
        .service(routes::key::post_create_key)
        .service(routes::key::delete_key)
}

/// Cross-merchant key listing for the admin panel.
pub fn mount_admin_keys() -> actix_web::Scope {
    web::scope("/api-keys").service(routes::key::get_all_keys)
}
