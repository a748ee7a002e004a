use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// Holds everything read from the environment at startup: bind address,
/// worker count, CORS origin, JWT options, seeded sandbox accounts and
/// the webhook test-delivery timeout.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Configuration for JWT (JSON Web Token) authentication.
    pub jwt_config: JwtConfig,
    /// Credentials for the seeded sandbox accounts.
    pub seed_accounts: SeedAccounts,
    /// Timeout in seconds for outbound webhook test deliveries.
    pub webhook_timeout_secs: u64,
}

#[derive(Clone, Debug)]
/// Configuration for JSON Web Token (JWT) authentication.
pub struct JwtConfig {
    /// The secret key used to sign and verify JWTs.
    pub secret: String,
    /// The expiration time for access tokens in hours.
    pub expiration_hours: i64,
    /// The expiration time for refresh tokens in hours.
    pub refresh_expiration_hours: i64,
}

#[derive(Clone, Debug)]
/// Login credentials the store seeds at startup. This is a sandbox
/// service; the defaults exist so it runs with an empty environment.
pub struct SeedAccounts {
    pub admin_email: String,
    pub admin_password: String,
    pub merchant_email: String,
    pub merchant_password: String,
    pub merchant_name: String,
}

impl JwtConfig {
    /// Creates a new `JwtConfig` instance from environment variables.
    ///
    /// - `JWT_SECRET`: Required. The secret key for JWT signing.
    /// - `JWT_EXPIRATION_HOURS`: Optional. Defaults to 1 hour.
    /// - `JWT_REFRESH_EXPIRATION_HOURS`: Optional. Defaults to 336 hours (14 days).
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or an expiration value cannot be
    /// parsed as a number.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        JwtConfig {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a valid number"),
            refresh_expiration_hours: env::var("JWT_REFRESH_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "336".to_string())
                .parse()
                .expect("JWT_REFRESH_EXPIRATION_HOURS must be a valid number"),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// Required:
    /// - `JWT_SECRET` (via `JwtConfig::from_env()`)
    ///
    /// Optional (with defaults):
    /// - `ENVIRONMENT`: "development"
    /// - `IP`: "127.0.0.1"
    /// - `PORT`: 8080
    /// - `WORKERS`: 4
    /// - `CORS_ALLOWED_ORIGIN`: "http://localhost:3000"
    /// - `ENABLE_CONSOLE_LOGGING`: true
    /// - `WEBHOOK_TIMEOUT_SECS`: 3
    /// - `SEED_ADMIN_EMAIL` / `SEED_ADMIN_PASSWORD`
    /// - `SEED_MERCHANT_EMAIL` / `SEED_MERCHANT_PASSWORD` / `SEED_MERCHANT_NAME`
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            jwt_config: JwtConfig::from_env(),
            seed_accounts: SeedAccounts {
                admin_email: env::var("SEED_ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@paygate.test".to_string()),
                admin_password: env::var("SEED_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "admin1234".to_string()),
                merchant_email: env::var("SEED_MERCHANT_EMAIL")
                    .unwrap_or_else(|_| "merchant@paygate.test".to_string()),
                merchant_password: env::var("SEED_MERCHANT_PASSWORD")
                    .unwrap_or_else(|_| "merchant1234".to_string()),
                merchant_name: env::var("SEED_MERCHANT_NAME")
                    .unwrap_or_else(|_| "Demo Store".to_string()),
            },
            webhook_timeout_secs: env::var("WEBHOOK_TIMEOUT_SECS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
        })
    }
}
