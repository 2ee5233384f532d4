use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AdministrationService, bad_request};
use crate::models::{
    ApiResponse, ErrorCode,
    administration::{CreateSchoolRequest, SchoolListParams, SchoolListQuery, UpdateSchoolRequest},
};
use crate::utils::validate::{require_non_blank, validate_email};

fn school_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::SchoolNotFound,
        "School not found",
    ))
}

impl AdministrationService {
    pub async fn create_school(
        &self,
        mut req: CreateSchoolRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = require_non_blank(&req.name, "name")
            .and_then(|_| require_non_blank(&req.code, "code"))
        {
            return Ok(bad_request(ErrorCode::ValidationFailed, msg));
        }
        if let Some(ref email) = req.email
            && let Err(msg) = validate_email(email)
        {
            return Ok(bad_request(ErrorCode::ValidationFailed, msg));
        }
        let storage = self.get_storage(request);

        if let Some(wereda_id) = req.wereda_id {
            match storage.get_wereda(wereda_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Ok(bad_request(
                        ErrorCode::WeredaNotFound,
                        format!("Wereda {wereda_id} does not exist"),
                    ));
                }
                Err(e) => return Ok(e.to_response()),
            }
        }
        req.code = req.code.trim().to_uppercase();

        match storage.create_school(req).await {
            Ok(school) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(school, "School created successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn list_schools(
        &self,
        params: SchoolListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self
            .get_storage(request)
            .list_schools_with_pagination(SchoolListQuery::from(params))
            .await
        {
            Ok(response) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(response, "Schools retrieved successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_school(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_school(id).await {
            Ok(Some(school)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(school, "School retrieved successfully"))),
            Ok(None) => Ok(school_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_school(
        &self,
        id: i64,
        mut req: UpdateSchoolRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Some(ref email) = req.email
            && let Err(msg) = validate_email(email)
        {
            return Ok(bad_request(ErrorCode::ValidationFailed, msg));
        }
        req.code = req.code.map(|code| code.trim().to_uppercase());

        match self.get_storage(request).update_school(id, req).await {
            Ok(Some(school)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(school, "School updated successfully"))),
            Ok(None) => Ok(school_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_school(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_school(id).await {
            Ok(true) => Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("School deleted successfully"))),
            Ok(false) => Ok(school_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }
}
