use actix_web::web;

pub mod routes {
    pub mod txn;
}

mod service {
    pub(crate) mod analytics;
    pub(crate) mod csv;
    pub(crate) mod txn;
}

mod dtos {
    pub(crate) mod txn;
}

/// Admin transaction log, mounted behind the admin middleware.
pub fn mount_admin_txns() -> actix_web::Scope {
    web::scope("/transactions")
        .service(routes::txn::get_transactions)
        .service(routes::txn::get_transactions_export)
}

/// Admin dashboard analytics feed.
pub fn mount_admin_analytics() -> actix_web::Scope {
    web::scope("/analytics").service(routes::txn::get_analytics)
}
