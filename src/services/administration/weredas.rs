use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AdministrationService, bad_request};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    administration::{CreateWeredaRequest, UpdateWeredaRequest, WeredaListResponse},
};
use crate::utils::validate::require_non_blank;

fn wereda_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::WeredaNotFound,
        "Wereda not found",
    ))
}

fn validate_literacy_rate(rate: Option<f64>) -> Result<(), &'static str> {
    match rate {
        Some(rate) if !(0.0..=100.0).contains(&rate) => {
            Err("literacy_rate must be between 0 and 100")
        }
        _ => Ok(()),
    }
}

impl AdministrationService {
    /// 创建人为当前用户
    pub async fn create_wereda(
        &self,
        req: CreateWeredaRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let Some(user_id) = RequireJWT::extract_user_id(request) else {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized access, please login",
            )));
        };
        if let Err(msg) = require_non_blank(&req.name, "name") {
            return Ok(bad_request(ErrorCode::ValidationFailed, msg));
        }
        if let Err(msg) = validate_literacy_rate(req.literacy_rate) {
            return Ok(bad_request(ErrorCode::ValidationFailed, msg));
        }

        match self.get_storage(request).create_wereda(req, user_id).await {
            Ok(wereda) => {
                tracing::info!("Wereda {} created by user {}", wereda.name, user_id);
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(wereda, "Wereda created successfully")))
            }
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn list_weredas(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).list_weredas().await {
            Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                WeredaListResponse { items },
                "Weredas retrieved successfully",
            ))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_wereda(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_wereda(id).await {
            Ok(Some(wereda)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(wereda, "Wereda retrieved successfully"))),
            Ok(None) => Ok(wereda_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_wereda(
        &self,
        id: i64,
        req: UpdateWeredaRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = validate_literacy_rate(req.literacy_rate) {
            return Ok(bad_request(ErrorCode::ValidationFailed, msg));
        }

        match self.get_storage(request).update_wereda(id, req).await {
            Ok(Some(wereda)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(wereda, "Wereda updated successfully"))),
            Ok(None) => Ok(wereda_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_wereda(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_wereda(id).await {
            Ok(true) => Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Wereda deleted successfully"))),
            Ok(false) => Ok(wereda_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literacy_rate_range() {
        assert!(validate_literacy_rate(None).is_ok());
        assert!(validate_literacy_rate(Some(64.5)).is_ok());
        assert!(validate_literacy_rate(Some(101.0)).is_err());
    }
}
