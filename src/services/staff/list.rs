use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::models::{
    ApiResponse,
    staff::{StaffListParams, StaffListQuery},
};

pub async fn list_staff(
    service: &StaffService,
    query: StaffListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_staff_with_pagination(StaffListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Staff list retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to retrieve staff list: {}", e);
            Ok(e.to_response())
        }
    }
}
