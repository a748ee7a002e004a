pub mod env_config;
pub mod error;
pub mod http;
pub mod jwt;

pub use error::{AppError, Res};
pub use http::Success;
pub use jwt::JwtClaims;
