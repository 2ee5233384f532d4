use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::current_teacher;
use crate::models::ApiResponse;
use crate::services::teachers::TeacherService;

pub async fn my_profile(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match current_teacher(service, request).await {
        Ok(ctx) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ctx.teacher,
            "Teacher profile retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}
