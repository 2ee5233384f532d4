//! 路径参数提取器：非法 ID 直接返回统一格式的 400 响应

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 从路径参数 `{id}` 中提取的正整数 ID
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

fn invalid_id(message: &str) -> actix_web::Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("id") {
            None => Err(invalid_id("Missing id in path")),
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) if id > 0 => Ok(SafeIDI64(id)),
                _ => Err(invalid_id("Invalid id in path")),
            },
        };
        ready(result)
    }
}
