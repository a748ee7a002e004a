use actix_web::HttpResponse;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    // === APPLICATION ERRORS ===
    #[error("Authorization error: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn envelope(message: &str) -> serde_json::Value {
        serde_json::json!({ "success": false, "message": message })
    }

    pub fn to_http_response(&self) -> HttpResponse {
        let is_dev = cfg!(debug_assertions);

        let to_internal_json = |err_msg: &str| {
            if is_dev {
                Self::envelope(err_msg)
            } else {
                Self::envelope("Internal server error")
            }
        };

        match self {
            // === CONVERSION ERRORS ===
            AppError::Jwt(_) => {
                HttpResponse::Unauthorized().json(Self::envelope("Invalid or expired token"))
            }
            AppError::Reqwest(error) => {
                log::error!("Reqwest error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }

            // === APPLICATION ERRORS ===
            AppError::Unauthorized(_) => {
                HttpResponse::Unauthorized().json(Self::envelope(&self.to_string()))
            }
            AppError::Forbidden(_) => {
                HttpResponse::Forbidden().json(Self::envelope(&self.to_string()))
            }
            AppError::NotFound(_) => {
                HttpResponse::NotFound().json(Self::envelope(&self.to_string()))
            }
            AppError::BadRequest(_) => {
                HttpResponse::BadRequest().json(Self::envelope(&self.to_string()))
            }
            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}
