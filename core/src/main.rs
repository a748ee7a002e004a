mod cors;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // seed the in-memory sandbox data
    let store = store::setup(&config.seed_accounts);

    HttpServer::new(move || {
        let secret = config_data.jwt_config.secret.clone();
        App::new()
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .wrap(logger::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(
                web::scope("/api")
                    .service(api_auth::mount_auth())
                    .service(
                        web::scope("")
                            .wrap(api_auth::auth_middleware(&secret))
                            .service(api_keys::mount_keys())
                            .service(api_webhooks::mount_webhooks())
                            .service(
                                web::scope("/admin")
                                    .wrap(api_auth::admin_middleware())
                                    .service(api_keys::mount_admin_keys())
                                    .service(api_webhooks::mount_admin_webhooks())
                                    .service(api_txns::mount_admin_txns())
                                    .service(api_txns::mount_admin_analytics()),
                            ),
                    ),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
