use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_staff(
    service: &StaffService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_staff(id).await {
        Ok(Some(staff)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            staff,
            "Staff member retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StaffNotFound,
            "Staff member not found",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
