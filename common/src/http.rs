use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use super::error::Res;

/// The response envelope the dashboard expects on every endpoint.
#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// One page of a listing, as the dashboard tables consume it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T: Serialize> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

pub struct Success;
impl Success {
    pub fn ok<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Ok().json(Envelope {
            success: true,
            message: "OK".to_string(),
            data: Some(body),
        }))
    }

    pub fn ok_with<T: Serialize>(message: &str, body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Ok().json(Envelope {
            success: true,
            message: message.to_string(),
            data: Some(body),
        }))
    }

    pub fn created<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Created().json(Envelope {
            success: true,
            message: "Created".to_string(),
            data: Some(body),
        }))
    }
}
